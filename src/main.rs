use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use ring_tactics::config::AppConfig;
use ring_tactics::ui::App;

/// Play Ring Tactics in the terminal (two players, one keyboard).
#[derive(Parser)]
#[command(name = "ring_tactics", about = "Ring/tower/laser strategy on a grid")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the board side length
    #[arg(long)]
    size: Option<usize>,

    /// Override the minimum combine run length
    #[arg(long)]
    combine: Option<usize>,

    /// Allow diagonal growth for placements
    #[arg(long)]
    diagonal: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(size) = cli.size {
        config.rules.size = size;
    }
    if let Some(combine) = cli.combine {
        config.rules.minimum_combine_length = combine;
    }
    if cli.diagonal {
        config.rules.allow_diagonal_placement = true;
    }
    config.validate().context("validating configuration")?;

    run(config).context("running game")
}

fn run(config: AppConfig) -> Result<()> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let mut app = App::new(config.rules);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    Ok(res?)
}
