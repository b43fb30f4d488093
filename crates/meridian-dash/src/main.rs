//! Meridian admin dashboard
//!
//! Usage:
//!   meridian                       Open the dashboard
//!   meridian --page colors         Open on the color picker
//!   meridian --dark                Force dark mode for this session
//!   meridian --config <file>       Use a specific preferences file

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use meridian_charts::DisplayMode;
use meridian_dash::{DashConfig, LaunchOptions, Page};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Dashboard CLI arguments
#[derive(Debug, Parser)]
#[command(name = "meridian", version, about = "Meridian admin dashboard")]
struct Cli {
    /// Preferences file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force dark mode
    #[arg(long, conflicts_with = "light")]
    dark: bool,

    /// Force light mode
    #[arg(long)]
    light: bool,

    /// Page shown at startup
    #[arg(long, value_enum, default_value_t = StartPage::Dashboard)]
    page: StartPage,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StartPage {
    Dashboard,
    Colors,
}

impl From<StartPage> for Page {
    fn from(page: StartPage) -> Self {
        match page {
            StartPage::Dashboard => Page::Dashboard,
            StartPage::Colors => Page::Colors,
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("meridian_dash={level},meridian_charts={level}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let mut config = DashConfig::load(cli.config.as_deref());
    if cli.dark {
        config.display_mode = DisplayMode::Dark;
    } else if cli.light {
        config.display_mode = DisplayMode::Light;
    }
    debug!(?config, "starting dashboard v{}", meridian_dash::VERSION);

    meridian_dash::launch(LaunchOptions {
        config,
        config_path: cli.config,
        page: cli.page.into(),
    })?;
    Ok(())
}
