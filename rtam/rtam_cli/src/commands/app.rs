//! Application lifecycle commands
//!
//! Launch, terminate, exit and status reports for a single application.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, ValueEnum};
use rtam_core::{Outcome, StatusMask};
use rtam_runtime::Manager;

/// Arguments for the launch command
#[derive(Args, Debug)]
pub struct LaunchArgs {
    /// Application name
    pub name: String,

    /// Bound on dependency waits in milliseconds, at least 1; defaults to
    /// the configured timeout
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,
}

/// Arguments for commands that take only an application name
#[derive(Args, Debug)]
pub struct NameArgs {
    /// Application name
    pub name: String,
}

/// Whether the status bits are set or cleared
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusAction {
    Set,
    Clear,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Application name
    pub name: String,

    /// Status bits, e.g. `started` or `started,resuming`
    pub bits: StatusMask,

    /// Set or clear the bits
    #[clap(value_enum)]
    pub action: StatusAction,
}

fn report<W: Write>(
    out: &mut W,
    verb: &str,
    name: &str,
    result: rtam_core::Result<()>,
) -> Result<Outcome> {
    let outcome = Outcome::from(&result);
    writeln!(out, "{} {}: {}", verb, name, outcome)?;
    if let Err(err) = result {
        if outcome == Outcome::Fail {
            eprintln!("error: {}", err);
        }
    }
    Ok(outcome)
}

/// Implementation of the launch command
pub fn execute_launch<W: Write>(manager: &Manager, args: &LaunchArgs, out: &mut W) -> Result<Outcome> {
    let result = match args.timeout_ms {
        Some(ms) => manager.launch_with_timeout(&args.name, Some(Duration::from_millis(ms))),
        None => manager.launch(&args.name),
    };
    report(out, "launch", &args.name, result)
}

/// Implementation of the terminate command
pub fn execute_terminate<W: Write>(manager: &Manager, args: &NameArgs, out: &mut W) -> Result<Outcome> {
    report(out, "terminate", &args.name, manager.terminate(&args.name))
}

/// Implementation of the exit command
pub fn execute_exit<W: Write>(manager: &Manager, args: &NameArgs, out: &mut W) -> Result<Outcome> {
    report(out, "exit", &args.name, manager.exit(&args.name))
}

/// Implementation of the status command
pub fn execute_status<W: Write>(manager: &Manager, args: &StatusArgs, out: &mut W) -> Result<Outcome> {
    let set = args.action == StatusAction::Set;
    report(
        out,
        "status",
        &args.name,
        manager.set_status(&args.name, args.bits, set),
    )
}
