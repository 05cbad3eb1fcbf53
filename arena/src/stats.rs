//! Arena statistics and persistence.
//!
//! Tracks game outcomes across a run and renders them as a JSON summary,
//! optionally written to disk.

use pursuit_core::Outcome;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// Running totals for one arena run.
#[derive(Debug)]
pub struct ArenaStats {
    evader_policy: String,
    seeker_policy: String,
    games: u32,
    captures: u32,
    escapes: u32,
    /// Rounds played summed over finished games
    total_rounds: u64,
    /// Controller steps summed over finished games
    total_steps: u64,
    /// Games that ended in an error instead of an outcome
    aborted: u32,
    start_time: Instant,
}

/// Serializable stats for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaStatsSnapshot {
    pub evader_policy: String,
    pub seeker_policy: String,
    pub games: u32,
    pub captures: u32,
    pub escapes: u32,
    pub aborted: u32,
    pub capture_rate: f64,
    pub avg_rounds: f64,
    pub avg_steps: f64,
    pub games_per_second: f64,
    pub runtime_seconds: f64,
    pub timestamp: u64,
}

impl ArenaStats {
    pub fn new(evader_policy: &str, seeker_policy: &str) -> Self {
        Self {
            evader_policy: evader_policy.to_string(),
            seeker_policy: seeker_policy.to_string(),
            games: 0,
            captures: 0,
            escapes: 0,
            total_rounds: 0,
            total_steps: 0,
            aborted: 0,
            start_time: Instant::now(),
        }
    }

    /// Record a finished game. A still-running outcome counts as aborted.
    pub fn record_game(&mut self, outcome: &Outcome, steps: usize) {
        match *outcome {
            Outcome::Captured { turn, .. } => {
                self.captures += 1;
                self.total_rounds += u64::from(turn);
            }
            Outcome::Escaped { rounds } => {
                self.escapes += 1;
                self.total_rounds += u64::from(rounds);
            }
            Outcome::Running => {
                self.aborted += 1;
                return;
            }
        }
        self.games += 1;
        self.total_steps += steps as u64;
    }

    pub fn record_abort(&mut self) {
        self.aborted += 1;
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    pub fn snapshot(&self) -> ArenaStatsSnapshot {
        let runtime = self.start_time.elapsed().as_secs_f64();
        let per_game = |total: f64| {
            if self.games > 0 {
                total / self.games as f64
            } else {
                0.0
            }
        };

        ArenaStatsSnapshot {
            evader_policy: self.evader_policy.clone(),
            seeker_policy: self.seeker_policy.clone(),
            games: self.games,
            captures: self.captures,
            escapes: self.escapes,
            aborted: self.aborted,
            capture_rate: per_game(self.captures as f64),
            avg_rounds: per_game(self.total_rounds as f64),
            avg_steps: per_game(self.total_steps as f64),
            games_per_second: if runtime > 0.0 {
                self.games as f64 / runtime
            } else {
                0.0
            },
            runtime_seconds: runtime,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

/// Write a snapshot as JSON (atomic write-then-rename). Failures are logged.
pub fn write_stats(snapshot: &ArenaStatsSnapshot, path: &Path) {
    let json = match serde_json::to_string_pretty(snapshot) {
        Ok(j) => j,
        Err(e) => {
            warn!("Failed to serialize arena stats: {}", e);
            return;
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create stats directory: {}", e);
            return;
        }
    }

    let mut temp_path = PathBuf::from(path);
    temp_path.as_mut_os_string().push(".tmp");
    match fs::File::create(&temp_path) {
        Ok(mut file) => {
            if let Err(e) = file.write_all(json.as_bytes()) {
                warn!("Failed to write arena stats: {}", e);
                return;
            }
        }
        Err(e) => {
            warn!("Failed to create temp stats file: {}", e);
            return;
        }
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        warn!("Failed to rename stats file: {}", e);
        let _ = fs::remove_file(&temp_path);
        return;
    }

    debug!("Wrote arena stats to {}", path.display());
}
