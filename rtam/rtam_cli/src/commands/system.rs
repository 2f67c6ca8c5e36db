//! System commands
//!
//! Listings and the interactive shell.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser};
use rtam_core::Outcome;
use rtam_runtime::Manager;

use super::Commands;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the process snapshot as JSON
    #[clap(long)]
    pub json: bool,
}

/// One line of shell input
#[derive(Parser, Debug)]
#[clap(no_binary_name = true)]
struct ShellLine {
    #[clap(subcommand)]
    command: Commands,
}

/// Implementation of the list command
pub fn execute_list<W: Write>(manager: &Manager, args: &ListArgs, out: &mut W) -> Result<Outcome> {
    if args.json {
        let json = serde_json::to_string_pretty(&manager.processes())
            .context("Failed to serialize process list")?;
        writeln!(out, "{}", json)?;
    } else {
        write!(out, "{}", manager.list_processes())?;
    }
    Ok(Outcome::Ok)
}

/// Implementation of the apps command
pub fn execute_apps<W: Write>(manager: &Manager, out: &mut W) -> Result<Outcome> {
    write!(out, "{}", manager.list_apps())?;
    Ok(Outcome::Ok)
}

/// Read commands line by line until end of input or `quit`. Per-line
/// failures are reported and the shell keeps going.
pub fn run_shell<R: BufRead, W: Write>(manager: &Manager, input: R, out: &mut W) -> Result<Outcome> {
    for line in input.lines() {
        let line = line.context("Failed to read shell input")?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == "quit" {
            break;
        }

        let parsed = match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(err) => {
                writeln!(out, "{}", err.to_string().trim_end())?;
                continue;
            }
        };

        if let Commands::Shell = parsed.command {
            writeln!(out, "already in a shell")?;
            continue;
        }

        super::execute(manager, parsed.command, out)?;
        out.flush()?;
    }

    Ok(Outcome::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtam_runtime::RuntimeConfig;

    use crate::demo::IMAGE;

    fn run(script: &str) -> String {
        let manager = Manager::init(&IMAGE, RuntimeConfig::default()).unwrap();
        let mut out = Vec::new();
        run_shell(&manager, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_shell_runs_commands() {
        let output = run("launch wifi\nexit wifi\nlist\n");

        assert!(output.contains("launch wifi: ok"), "{}", output);
        assert!(output.contains("exit wifi: ok"), "{}", output);
        assert!(output.contains("wifi"), "{}", output);
    }

    #[test]
    fn test_shell_stops_at_quit() {
        let output = run("# comment\n\nquit\nlaunch wifi\n");
        assert!(!output.contains("launch wifi"), "{}", output);
    }

    #[test]
    fn test_shell_reports_bad_lines() {
        let output = run("frobnicate\nshell\nlaunch bluetooth\n");

        assert!(output.contains("frobnicate"), "{}", output);
        assert!(output.contains("already in a shell"), "{}", output);
        assert!(output.contains("launch bluetooth: ok"), "{}", output);
    }
}
