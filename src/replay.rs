// Replay module for re-running recorded decisions
//
// This module provides functionality to:
// 1. Parse JSONL decision logs
// 2. Replay the selector on each recorded snapshot
// 3. Compare recorded vs replayed moves
// 4. Generate a summary report

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DecisionLogEntry;
use crate::selector::{DecisionReason, MoveSelector};
use crate::types::Direction;

/// Result of replaying a single log entry
#[derive(Debug, Clone)]
pub struct ReplayResult {
    /// Zero-based line index among the non-empty lines of the log
    pub index: usize,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub replayed_reason: DecisionReason,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing decision logs
pub struct ReplayEngine {
    selector: MoveSelector,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            selector: MoveSelector::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(
        &self,
        log_path: P,
    ) -> Result<Vec<DecisionLogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DecisionLogEntry = serde_json::from_str(&line).map_err(|e| {
                format!("Failed to parse JSON on line {}: {}", line_num + 1, e)
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, index: usize, entry: &DecisionLogEntry) -> Result<ReplayResult, String> {
        let original_move = Direction::parse(&entry.chosen_move)?;
        if !entry.snapshot.is_consistent() {
            return Err(format!(
                "Snapshot is {}x{} but holds {} cells",
                entry.snapshot.height,
                entry.snapshot.width,
                entry.snapshot.cells.len()
            ));
        }

        let start = Instant::now();
        let decision = self.selector.select(&entry.snapshot);
        let computation_time_us = start.elapsed().as_micros();

        let matches = original_move == decision.direction;

        if self.verbose {
            if matches {
                info!(
                    "Entry {}: ✓ MATCH - {} ({:?}, {}us)",
                    index, decision.direction, decision.reason, computation_time_us
                );
            } else {
                warn!(
                    "Entry {}: ✗ MISMATCH - Original: {}, Replayed: {} ({:?}, {}us)",
                    index, original_move, decision.direction, decision.reason, computation_time_us
                );
            }
        }

        Ok(ReplayResult {
            index,
            original_move,
            replayed_move: decision.direction,
            matches,
            replayed_reason: decision.reason,
            computation_time_us,
        })
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[DecisionLogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            match self.replay_entry(index, entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay entry {}: {}", index, e);
                }
            }
        }

        results
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total - matches;
        let match_rate = if total > 0 {
            (matches as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Entries:  {}", stats.total);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Entry {}: {} → {} ({:?})",
                    result.index, result.original_move, result.replayed_move, result.replayed_reason
                );
            }
            println!();
        }
    }

    /// Validates that specific recorded moves are among the acceptable ones
    pub fn validate_expected_moves(
        &self,
        entries: &[DecisionLogEntry],
        expected_moves: &[(usize, Vec<Direction>)], // (index, acceptable_moves)
    ) -> Result<(), String> {
        for (index, acceptable) in expected_moves {
            let entry = entries
                .get(*index)
                .ok_or_else(|| format!("Entry {} not found in log", index))?;

            let actual_move = Direction::parse(&entry.chosen_move)?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Entry {}: Expected one of {:?}, but got {}",
                    index,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move
                ));
            }
        }

        Ok(())
    }
}
