// Debug logging module for recording decisions
//
// Each decision is appended to a JSONL file together with the snapshot it
// was made on, so the replay tool can re-run it later. Logging failures are
// reported through `log` and never affect the chosen move.

use log::error;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::grid::Snapshot;
use crate::search::SearchStrategy;
use crate::selector::{Decision, DecisionReason};

/// Represents a single debug log entry
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DecisionLogEntry {
    pub timestamp: String,
    pub strategy: SearchStrategy,
    pub chosen_move: String,
    pub code: u8,
    pub reason: DecisionReason,
    pub snapshot: Snapshot,
}

/// Appends decisions to a JSONL file
pub struct DecisionLogger {
    file: Option<File>,
}

impl DecisionLogger {
    /// Creates a new decision logger
    /// If enabled is true, opens the log file for appending (creating it if needed)
    pub fn new<P: AsRef<Path>>(enabled: bool, log_file_path: P) -> Self {
        if !enabled {
            return Self::disabled();
        }

        let path = log_file_path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                log::debug!("Decision logging enabled: {}", path.display());
                DecisionLogger { file: Some(file) }
            }
            Err(e) => {
                error!(
                    "Failed to open decision log file '{}': {}",
                    path.display(),
                    e
                );
                Self::disabled()
            }
        }
    }

    /// Creates a disabled logger (no-op)
    pub fn disabled() -> Self {
        DecisionLogger { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Writes one line for `decision`
    pub fn log_decision(
        &mut self,
        strategy: SearchStrategy,
        snapshot: &Snapshot,
        decision: &Decision,
    ) {
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return,
        };

        let entry = DecisionLogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            strategy,
            chosen_move: decision.direction.as_str().to_string(),
            code: decision.code(),
            reason: decision.reason.clone(),
            snapshot: snapshot.clone(),
        };

        match serde_json::to_string(&entry) {
            Ok(json_line) => {
                if let Err(e) = writeln!(file, "{}", json_line) {
                    error!("Failed to write decision log entry: {}", e);
                } else if let Err(e) = file.flush() {
                    error!("Failed to flush decision log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize decision log entry: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use std::fs;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "move_selector_{}_{}.jsonl",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let path = scratch_path("disabled");
        let _ = fs::remove_file(&path);

        let mut logger = DecisionLogger::new(false, &path);
        assert!(!logger.is_enabled());
        let snap = Snapshot::from_rows(2, 3, &[vec![3, 1]]);
        let decision = Decision {
            direction: Direction::Right,
            reason: DecisionReason::Trapped,
        };
        logger.log_decision(SearchStrategy::Bfs, &snap, &decision);

        assert!(!path.exists());
    }

    #[test]
    fn test_entries_are_appended_as_json_lines() {
        let path = scratch_path("append");
        let _ = fs::remove_file(&path);

        let snap = Snapshot::from_rows(2, 3, &[vec![3, 1]]);
        let decision = Decision {
            direction: Direction::Right,
            reason: DecisionReason::OpenNeighbour {
                cell: crate::types::Cell::new(0, 1),
            },
        };

        for _ in 0..2 {
            let mut logger = DecisionLogger::new(true, &path);
            assert!(logger.is_enabled());
            logger.log_decision(SearchStrategy::Crowded, &snap, &decision);
        }

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let entry: DecisionLogEntry = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(entry.chosen_move, "right");
        assert_eq!(entry.code, 1);
        assert_eq!(entry.strategy, SearchStrategy::Crowded);
        assert_eq!(entry.snapshot, snap);
        assert_eq!(entry.reason, decision.reason);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unwritable_path_disables_logger() {
        let logger = DecisionLogger::new(true, "/nonexistent-dir/decisions.jsonl");
        assert!(!logger.is_enabled());
    }
}
