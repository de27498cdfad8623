// Replay module for re-running logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the engine on each logged snapshot with the logged tick state
// 3. Compare the logged move with the replayed one

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::bot::Bot;
use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::types::Direction;

/// Result of replaying a single tick
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub tick: i64,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub original_score: i64,
    pub replayed_score: i64,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default, PartialEq)]
pub struct ReplayStats {
    pub total_ticks: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DebugLogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DebugLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays the engine on one logged entry
    pub fn replay_entry(&self, entry: &DebugLogEntry) -> Result<ReplayResult, String> {
        let decision = self
            .bot
            .decide_move(&entry.map, &entry.self_id, entry.tick_state)?;

        let matches = decision.direction == entry.chosen_move;
        if self.verbose {
            info!(
                "Tick {}: logged {} ({}), replayed {} ({}){}",
                entry.tick,
                entry.chosen_move,
                entry.score,
                decision.direction,
                decision.score,
                if matches { "" } else { " MISMATCH" }
            );
        }

        Ok(ReplayResult {
            tick: entry.tick,
            original_move: entry.chosen_move,
            replayed_move: decision.direction,
            matches,
            original_score: entry.score,
            replayed_score: decision.score,
            computation_time_ms: decision.debug.elapsed_ms,
        })
    }

    /// Replays every entry, or only the listed ticks when `ticks` is given
    pub fn replay_all(
        &self,
        entries: &[DebugLogEntry],
        ticks: Option<&[i64]>,
    ) -> Result<Vec<ReplayResult>, String> {
        entries
            .iter()
            .filter(|e| ticks.map_or(true, |t| t.contains(&e.tick)))
            .map(|e| self.replay_entry(e))
            .collect()
    }

    /// Summarises a set of replay results
    pub fn stats(results: &[ReplayResult]) -> ReplayStats {
        let total_ticks = results.len();
        let matches = results.iter().filter(|r| r.matches).count();

        for r in results.iter().filter(|r| !r.matches) {
            warn!(
                "Tick {}: logged {} but replay chose {}",
                r.tick, r.original_move, r.replayed_move
            );
        }

        ReplayStats {
            total_ticks,
            matches,
            mismatches: total_ticks - matches,
            match_rate: if total_ticks == 0 {
                0.0
            } else {
                matches as f64 / total_ticks as f64
            },
        }
    }

    /// Checks that the replayed move for each listed tick is one of the accepted moves
    pub fn validate_expected_moves(
        &self,
        entries: &[DebugLogEntry],
        expected: &[(i64, Vec<Direction>)],
    ) -> Result<(), String> {
        let mut failures = Vec::new();

        for (tick, accepted) in expected {
            let entry = entries
                .iter()
                .find(|e| e.tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log", tick))?;
            let result = self.replay_entry(entry)?;

            if !accepted.contains(&result.replayed_move) {
                failures.push(format!(
                    "tick {}: expected {} but got {}",
                    tick,
                    accepted
                        .iter()
                        .map(|d| d.as_str())
                        .collect::<Vec<_>>()
                        .join("|"),
                    result.replayed_move
                ));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures.join("; "))
        }
    }

    /// Prints a per-tick table followed by the summary
    pub fn print_report(&self, results: &[ReplayResult]) {
        println!("{:>6}  {:>6}  {:>8}  {:>6}  {:>8}  {:>6}", "tick", "logged", "score", "replay", "score", "ms");
        for r in results {
            println!(
                "{:>6}  {:>6}  {:>8}  {:>6}  {:>8}  {:>6}{}",
                r.tick,
                r.original_move.as_str(),
                r.original_score,
                r.replayed_move.as_str(),
                r.replayed_score,
                r.computation_time_ms,
                if r.matches { "" } else { "  <-- mismatch" }
            );
        }

        let stats = Self::stats(results);
        println!();
        println!(
            "Ticks: {}  Matches: {}  Mismatches: {}  Match rate: {:.1}%",
            stats.total_ticks,
            stats.matches,
            stats.mismatches,
            stats.match_rate * 100.0
        );
    }
}
