// Snakepit bot host harness
//
// Reads one JSON host event per line on stdin and answers every map update
// with one JSON line on stdout. Connecting to the game server is left to
// whatever pipes events in.

use log::{error, info, warn};
use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use snakepit_bot::bot::Bot;
use snakepit_bot::config::Config;
use snakepit_bot::debug_logger::DebugLogger;
use snakepit_bot::session::GameSession;
use snakepit_bot::types::HostEvent;

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    // Logs go to stderr, stdout carries move responses only
    env_logger::init();

    info!("Starting Snakepit bot...");

    let config = match env::args().nth(1) {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        }),
        None => Config::load_or_default(),
    };
    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);
    let mut session = GameSession::new(Bot::new(config), logger);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (line_num, line) in stdin.lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                process::exit(1);
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let event: HostEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                warn!("Skipping unparseable event on line {}: {}", line_num + 1, e);
                continue;
            }
        };

        match session.handle(&event) {
            Ok(Some(response)) => {
                let json = match serde_json::to_string(&response) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("Failed to serialize move: {}", e);
                        process::exit(1);
                    }
                };
                if let Err(e) = writeln!(out, "{}", json).and_then(|_| out.flush()) {
                    error!("Failed to write move: {}", e);
                    process::exit(1);
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!("Cannot compute a move: {}", e);
                process::exit(1);
            }
        }
    }

    info!("Input closed, shutting down");
}
