// Debug logging module for per-tick decision logs
//
// Each tick's map snapshot, the tick state going in and the chosen move are
// appended to a JSONL file so that the replay tool can re-run the decision
// later. Write failures are logged and otherwise ignored.

use log::error;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Arc;

use crate::types::{Direction, MapSnapshot, TickState};

/// Represents a single debug log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DebugLogEntry {
    pub tick: i64,
    pub self_id: String,
    pub tick_state: TickState,
    pub chosen_move: Direction,
    pub score: i64,
    pub map: MapSnapshot,
    pub timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<..>> so clones write to the same file
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<BufWriter<File>>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(BufWriter::new(file)))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends one decision to the log
    pub fn log_move(
        &self,
        tick: i64,
        self_id: &str,
        tick_state: TickState,
        chosen_move: Direction,
        score: i64,
        map: &MapSnapshot,
    ) {
        if !self.enabled {
            return;
        }

        let entry = DebugLogEntry {
            tick,
            self_id: self_id.to_string(),
            tick_state,
            chosen_move,
            score,
            map: map.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let json_line = match serde_json::to_string(&entry) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
                return;
            }
        };

        let mut guard = self.file.lock();
        if let Some(writer) = guard.as_mut() {
            if let Err(e) = writeln!(writer, "{}", json_line) {
                error!("Failed to write debug log entry: {}", e);
            } else if let Err(e) = writer.flush() {
                // Flush every tick so a crashed game still leaves a usable log
                error!("Failed to flush debug log: {}", e);
            }
        }
    }
}
