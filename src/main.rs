mod analytics;
mod backup;
mod config;
mod ipc;
mod model;
mod payroll;
mod seed;
mod slots;
mod store;
#[cfg(test)]
mod testutil;
mod workspace;

use std::io::{self, BufRead, Write};

fn main() {
    // stdout carries responses, so logs go to stderr (env_logger's default).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = config::DaemonConfig::from_env();
    log::info!("staffdeskd {} starting", env!("CARGO_PKG_VERSION"));

    let mut state = ipc::AppState::new(config);
    if let Some(path) = state.config.workspace.clone() {
        if let Err(e) = state.open_workspace(&path) {
            log::error!(
                "could not open startup workspace {}: {:#}",
                path.to_string_lossy(),
                e
            );
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                log::error!("stdin read failed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                log::warn!("dropping unparseable request: {}", e);
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(stdout, "{}", resp);
        let _ = stdout.flush();
    }
    log::info!("stdin closed, shutting down");
}
