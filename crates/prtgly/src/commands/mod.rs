//! Command dispatch: bridges CLI args -> engine queries -> output formatting.

pub mod config_cmd;
pub mod containers;
pub mod objects;
pub mod sensors;
pub mod supporting;
pub mod util;

use prtgly_core::{CancellationToken, ObjectEngine};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    engine: &ObjectEngine,
    global: &GlobalOpts,
    cancel: CancellationToken,
) -> Result<(), CliError> {
    match cmd {
        Command::Objects(args) => objects::handle(engine, args, global, cancel).await,
        Command::Sensors(args) => sensors::handle(engine, args, global, cancel).await,
        Command::Devices(args) => containers::devices(engine, args, global, cancel).await,
        Command::Groups(args) => containers::groups(engine, args, global, cancel).await,
        Command::Probes(args) => containers::probes(engine, args, global, cancel).await,
        Command::Notifications(args) => supporting::notifications(engine, args, global, cancel).await,
        Command::Schedules(args) => supporting::schedules(engine, args, global, cancel).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
