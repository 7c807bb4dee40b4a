use std::path::Path;

use crate::error::ConfigError;
use crate::game::BoardSettings;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rules: BoardSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            rules: BoardSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.size < 2 {
            return Err(ConfigError::Validation("rules.size must be >= 2".into()));
        }
        if self.rules.size > 64 {
            return Err(ConfigError::Validation("rules.size must be <= 64".into()));
        }
        if self.rules.minimum_combine_length < 2 {
            return Err(ConfigError::Validation(
                "rules.minimum_combine_length must be >= 2".into(),
            ));
        }
        if self.rules.minimum_combine_length > self.rules.size {
            return Err(ConfigError::Validation(
                "rules.minimum_combine_length must be <= rules.size".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[rules]
size = 10
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.rules.size, 10);
        // Other fields should be defaults
        assert_eq!(config.rules.minimum_combine_length, 3);
        assert!(!config.rules.allow_diagonal_placement);
        assert!(config.rules.auto_upgrade);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.rules.size, 8);
        assert_eq!(config.rules.minimum_combine_length, 3);
    }

    #[test]
    fn test_validation_rejects_tiny_board() {
        let mut config = AppConfig::default();
        config.rules.size = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_board() {
        let mut config = AppConfig::default();
        config.rules.size = 65;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_short_combine_length() {
        let mut config = AppConfig::default();
        config.rules.minimum_combine_length = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_combine_length_beyond_board() {
        let mut config = AppConfig::default();
        config.rules.size = 4;
        config.rules.minimum_combine_length = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.rules.size, 8);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[rules]
size = 12
allow_diagonal_placement = true
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.rules.size, 12);
        assert!(config.rules.allow_diagonal_placement);
        // Others are defaults
        assert_eq!(config.rules.minimum_combine_length, 3);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_config.toml");
        std::fs::write(&path, "[rules]\nsize = 0\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
