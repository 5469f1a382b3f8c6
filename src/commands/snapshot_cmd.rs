//! Local snapshot commands working directly on the sheet store.

use chrono::Utc;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use feesync::db::SheetStore;
use feesync::sync::{self, SyncSummary};

#[derive(Args)]
pub struct SnapshotCommand {
    #[command(subcommand)]
    pub command: SnapshotSubcommand,
}

#[derive(Subcommand)]
pub enum SnapshotSubcommand {
    /// Print the stored sheets as a snapshot
    Export {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replace every sheet with a snapshot read from a JSON file
    Import {
        /// Snapshot file
        file: PathBuf,
    },
}

impl SnapshotCommand {
    pub async fn run(&self, store: &SheetStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            SnapshotSubcommand::Export { output } => {
                let view = sync::read_snapshot(store, Utc::now()).await?;
                let json = serde_json::to_string_pretty(&view)?;
                match output {
                    Some(path) => {
                        std::fs::write(path, json)?;
                        println!("Exported snapshot to {}", path.display());
                    }
                    None => println!("{}", json),
                }
                Ok(())
            }

            SnapshotSubcommand::Import { file } => {
                let payload = std::fs::read(file)?;
                let summary = sync::write_snapshot(store, &payload).await?;
                print_summary(&summary);
                Ok(())
            }
        }
    }
}

fn print_summary(summary: &SyncSummary) {
    println!("Data synced successfully");
    for (sheet, count) in &summary.records {
        println!("  {:<16} {} row(s)", sheet.title(), count);
    }
    println!("\nTimestamp: {}", sync::iso_timestamp(summary.synced_at));
}
