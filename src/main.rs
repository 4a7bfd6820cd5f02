use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use skillbook::app::{App, AppEvent};
use skillbook::catalog::DataSource;
use skillbook::config::Config;
use skillbook::ui;

/// Get the config directory path (~/.config/skillbook/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("skillbook"))
}

#[derive(Parser, Debug)]
#[command(
    name = "skillbook",
    version,
    about = "Terminal browser for job skill catalogs"
)]
struct Args {
    /// Dataset to load: a JSON file path or an http(s) URL
    #[arg(long, value_name = "PATH|URL")]
    dataset: Option<String>,

    /// Job key or `search?q=...` token to open at startup
    #[arg(long, value_name = "TOKEN")]
    open: Option<String>,

    /// Config file (default: ~/.config/skillbook/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal is in raw mode while running)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            builder.with_writer(std::sync::Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_ref())?;

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(dataset) = args.dataset {
        config.dataset = dataset;
    }
    if let Some(open) = args.open {
        config.open = open;
    }

    let source = DataSource::parse(&config.dataset)
        .with_context(|| format!("Invalid dataset location '{}'", config.dataset))?;
    tracing::info!(source = %source, open = %config.open, "Starting");

    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut app = App::new(source, &config, event_tx).context("Failed to create application")?;
    app.spawn_load();

    ui::run(&mut app, event_rx).await?;

    Ok(())
}
