use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use lobpick::config::{PickerConfig, SourceKind};
use lobpick::controller::SelectionController;
use lobpick::source::{DataSource, DirSource, HttpSource};
use lobpick::store::{FileStore, MemoryStore, PersistenceStore};

#[derive(Parser)]
#[command(name = "lobpick", about = "Pick a line of business, then an app, see its package.")]
struct Cli {
    /// Config file (defaults to .lobpick/config.yaml, then ~/.lobpick/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fetch tables over HTTP from this base URL
    #[arg(long, conflicts_with = "data_dir")]
    base_url: Option<String>,

    /// Read tables from this directory
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Directory for the saved selection
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Keep the selection in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Write logs here (the TUI otherwise discards them)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Load, restore the saved selection, and print it
    Show,
    /// Forget the saved selection
    Clear,
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("lobpick=info".parse()?);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        // The terminal belongs to the TUI.
        None if interactive => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<PickerConfig> {
    let mut config = match &cli.config {
        Some(path) => PickerConfig::load_file(path)
            .ok_or_else(|| anyhow!("config file not found: {}", path.display()))?,
        None => PickerConfig::load(),
    };

    if let Some(url) = &cli.base_url {
        config.source.base_url = Some(url.clone());
        config.source.data_dir = None;
    }
    if let Some(dir) = &cli.data_dir {
        config.source.base_url = None;
        config.source.data_dir = Some(dir.clone());
    }
    if let Some(dir) = &cli.state_dir {
        config.store.dir = Some(dir.clone());
    }
    Ok(config)
}

fn build_controller(config: &PickerConfig, ephemeral: bool) -> SelectionController {
    let source: Arc<dyn DataSource> = match config.source.kind() {
        SourceKind::Http(url) => Arc::new(HttpSource::new(url)),
        SourceKind::Dir(dir) => Arc::new(DirSource::new(dir)),
    };
    let store: Box<dyn PersistenceStore> = if ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::new(config.state_dir()))
    };

    SelectionController::new(source, store)
        .with_resources(config.resources.clone())
        .with_store_key(config.store.key.clone())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.command.is_none())?;

    let config = resolve_config(&cli)?;
    let mut controller = build_controller(&config, cli.ephemeral);
    info!(source = %controller.source().describe(), "lobpick starting");

    match cli.command {
        None => lobpick::tui::runner::run_tui(controller).await,
        Some(Command::Show) => {
            controller.reload().await?;
            let view = controller.view();
            println!("{}", view.summary);
            println!("{}", view.status.text);
            Ok(())
        }
        Some(Command::Clear) => {
            controller.clear();
            println!("{}", controller.view().status.text);
            Ok(())
        }
    }
}
