use std::path::PathBuf;

use crate::game::Position;

/// Errors raised by the board rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// A ring placement was attempted where `can_place_ring` is false.
    #[error("invalid ring placement at {position}")]
    InvalidPlacement { position: Position },

    /// An upgrade was attempted with no qualifying combinable run, or with
    /// a target cell outside the candidate list.
    #[error("invalid upgrade at {position}")]
    InvalidUpgrade { position: Position },
}

/// Errors that can occur when decoding a game snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed game snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("snapshot holds {actual} cells for a {size}x{size} board")]
    CellCount { size: usize, actual: usize },
}

/// Errors returned by the room store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("unknown room '{0}'")]
    UnknownRoom(String),

    #[error("participant is not part of this room")]
    NotParticipant,

    #[error("it is not this participant's turn")]
    NotYourTurn,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_error_display() {
        let err = RulesError::InvalidPlacement {
            position: Position::new(3, 5),
        };
        assert_eq!(err.to_string(), "invalid ring placement at (3, 5)");
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::UnknownRoom("ABCD1234".to_string());
        assert_eq!(err.to_string(), "unknown room 'ABCD1234'");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("rules.size must be >= 2".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: rules.size must be >= 2"
        );
    }
}
