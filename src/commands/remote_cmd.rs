//! Remote commands for pushing to and pulling from a sync server.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use feesync::client::SyncClient;
use feesync::config::Config;

/// Talk to a running sync server
#[derive(Args)]
pub struct RemoteCommand {
    /// Server URL (overrides config)
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: RemoteSubcommand,
}

#[derive(Subcommand)]
pub enum RemoteSubcommand {
    /// Check the server is reachable
    Status,

    /// Send a snapshot file, replacing the server's state
    Push {
        /// Snapshot file
        file: PathBuf,
    },

    /// Fetch the server's state as a snapshot
    Pull {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

impl RemoteCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let url = self
            .server
            .clone()
            .unwrap_or_else(|| config.server_url.value.clone());
        let client = SyncClient::new(&url);

        match &self.command {
            RemoteSubcommand::Status => {
                let health = client.check_server().await?;
                println!("Server: {}", url);
                println!("Status: {} (version {})", health.status, health.version);
                Ok(())
            }

            RemoteSubcommand::Push { file } => {
                let payload = std::fs::read_to_string(file)?;
                let receipt = client.push_raw(payload).await?;
                println!("{}", receipt.message);
                println!("Timestamp: {}", receipt.timestamp);
                Ok(())
            }

            RemoteSubcommand::Pull { output } => {
                let view = client.pull().await?;
                let json = serde_json::to_string_pretty(&view)?;
                match output {
                    Some(path) => {
                        std::fs::write(path, json)?;
                        println!(
                            "Pulled {} student(s), {} payment(s) to {}",
                            view.students.len(),
                            view.payments.len(),
                            path.display()
                        );
                    }
                    None => println!("{}", json),
                }
                Ok(())
            }
        }
    }
}
