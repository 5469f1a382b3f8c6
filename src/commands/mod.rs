mod config_cmd;
mod dashboard_cmd;
mod remote_cmd;
mod snapshot_cmd;

pub use config_cmd::ConfigCommand;
pub use dashboard_cmd::DashboardCommand;
pub use remote_cmd::RemoteCommand;
pub use snapshot_cmd::SnapshotCommand;

use clap::ValueEnum;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
