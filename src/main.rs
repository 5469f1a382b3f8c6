use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{ConfigCommand, DashboardCommand, RemoteCommand, SnapshotCommand};
use feesync::config::Config;
use feesync::db::{init_db, SheetStore};
use feesync::sync;

#[derive(Parser)]
#[command(name = "feesync")]
#[command(version)]
#[command(about = "Sheet-backed sync store for a fee management app", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create all sheets and reset the admin sheet to the default account
    Init,

    /// Export or import snapshots against the local store
    Snapshot(SnapshotCommand),

    /// Push to or pull from a sync server
    Remote(RemoteCommand),

    /// Show the dashboard from the last sync
    Dashboard(DashboardCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feesync=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Init) => {
            let store = open_store(&config).await?;
            sync::initialize(&store, Utc::now()).await?;
            println!(
                "Initialized sheet store at {}",
                config.database_path.value.display()
            );
            println!("Sheets: {}", store.sheet_names().await?.join(", "));
            println!("Default admin: admin / admin123");
        }
        Some(Commands::Snapshot(cmd)) => {
            let store = open_store(&config).await?;
            cmd.run(&store).await?;
        }
        Some(Commands::Remote(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Dashboard(cmd)) => {
            let store = open_store(&config).await?;
            cmd.run(&store).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

async fn open_store(config: &Config) -> Result<SheetStore, sqlx::Error> {
    let pool = init_db(&config.database_path.value).await?;
    Ok(SheetStore::new(pool))
}
