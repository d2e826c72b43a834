pub mod app;
pub mod config;
pub mod engine;
pub mod i18n;
pub mod input;
pub mod types;
pub mod ui;
pub mod wizard;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use app::App;
use config::{load_config, Config};
use engine::{Catalog, Engine, LocalEngine};

#[derive(Parser, Debug)]
#[command(author, version, about = "Create a new engine project", long_about = None)]
struct Args {
    /// Config file (defaults to ./config.yaml, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// YAML catalog of systems and plugins
    #[arg(long, env = "PROJECT_WIZARD_CATALOG")]
    catalog: Option<PathBuf>,

    /// YAML locale file overriding the built-in strings
    #[arg(long)]
    locale: Option<PathBuf>,

    /// Pre-fill the project location
    #[arg(short, long)]
    path: Option<String>,
}

fn setup_logging(config: &Config) -> Result<()> {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = config.logging.log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("cannot create log directory {}", log_dir.display()))?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("wizard.log"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("project_wizard={}", config.logging.level).into()),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if args.catalog.is_some() {
        config.catalog = args.catalog;
    }
    if args.locale.is_some() {
        config.locale = args.locale;
    }
    setup_logging(&config)?;

    let catalog = Catalog::load_or_builtin(config.catalog.as_deref())?;
    tracing::info!(plugins = catalog.plugins.len(), "catalog loaded");

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let engine = Arc::new(
        LocalEngine::new(events_tx, config.locale.clone()).with_overwrite(config.overwrite),
    );

    // Strings are resolved before any interaction is wired up
    let lm = engine.request_localization(&i18n::WIZARD_KEYS).await?;

    let terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture)?;

    let app = App::new(config, catalog, lm, engine, events_rx, args.path.as_deref());
    let app_result = app.run(terminal);

    crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture)?;
    ratatui::restore();

    if let Some(created) = app_result? {
        println!("{}: {}", created.status.message(), created.directory.display());
    }
    Ok(())
}
