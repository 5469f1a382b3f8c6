use clap::Args;

use feesync::db::SheetStore;
use feesync::sync;

use super::OutputFormat;

/// Show the dashboard computed by the last sync
#[derive(Args)]
pub struct DashboardCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl DashboardCommand {
    pub async fn run(&self, store: &SheetStore) -> Result<(), Box<dyn std::error::Error>> {
        let view = sync::read_dashboard(store).await?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&view)?);
            }
            OutputFormat::Text => {
                if view.metrics.is_empty() {
                    println!("No sync recorded yet");
                    return Ok(());
                }

                println!("{}", sync::dashboard::DASHBOARD_TITLE);
                if let Some(at) = &view.last_synced {
                    println!("Last synced: {}", at);
                }
                println!();
                println!("{:<24}  VALUE", "METRIC");
                println!("{}", "-".repeat(40));
                for metric in &view.metrics {
                    println!(
                        "{:<24}  {}",
                        metric.metric,
                        feesync::sheet::cell::text(&metric.value)
                    );
                }
            }
        }
        Ok(())
    }
}
