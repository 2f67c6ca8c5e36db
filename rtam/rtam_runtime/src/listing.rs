//! Text listings for shells and consoles.

use std::fmt::Write;

use crate::app::registry::AppRegistry;
use crate::app::table::ProcessInfo;

fn flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn start_mode(auto_start: bool) -> &'static str {
    if auto_start {
        "auto"
    } else {
        "manual"
    }
}

/// One row per process with its status bits and autostart flag
pub fn render_processes(processes: &[ProcessInfo]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<8} {:<8} {:<10} {}",
        "name", "started", "resuming", "processing", "auto"
    );
    let _ = writeln!(
        out,
        "{:<12} {:<8} {:<8} {:<10} {}",
        "----", "-------", "--------", "----------", "----"
    );

    for process in processes {
        let _ = writeln!(
            out,
            "{:<12} {:<8} {:<8} {:<10} {}",
            process.name,
            flag(process.started),
            flag(process.resuming),
            flag(process.processing),
            start_mode(process.auto_start)
        );
    }

    out
}

/// One row per declared application, in registry order
pub fn render_apps(registry: &AppRegistry, processes: &[ProcessInfo]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12} {:<10} {}", "name", "status", "auto");
    let _ = writeln!(out, "{:<12} {:<10} {}", "----", "------", "----");

    for app in registry.iter() {
        let status = if app.interface.is_none() {
            "n/a"
        } else {
            processes
                .iter()
                .find(|p| p.name == app.name)
                .map_or("stopped", |p| p.state.as_str())
        };

        let _ = writeln!(
            out,
            "{:<12} {:<10} {}",
            app.name,
            status,
            start_mode(app.is_auto_start())
        );
    }

    out
}
