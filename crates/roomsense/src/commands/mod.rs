//! Command dispatch: bridges CLI args -> core handlers -> output formatting.

pub mod bridge;
pub mod config_cmd;
pub mod devices;
pub mod series;

use roomsense_core::ServiceConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    service: &ServiceConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Temperature(args) => {
            series::handle(service, series::SeriesKind::Temperature, args, global).await
        }
        Command::Humidity(args) => {
            series::handle(service, series::SeriesKind::Humidity, args, global).await
        }
        Command::Motion(args) => {
            series::handle(service, series::SeriesKind::Motion, args, global).await
        }
        Command::Busyness(args) => series::handle_busyness(service, args, global).await,
        Command::Devices => devices::handle(service, global).await,
        Command::Bridge => bridge::handle(service).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config/completions reached API dispatch".into(),
        )),
    }
}
