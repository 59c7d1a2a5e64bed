//! High score leaderboard
//!
//! Keeps the top 10 finished runs, ranked by wave reached then kills.

use serde::{Deserialize, Serialize};

use crate::settings::GameMode;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Outcome of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: GameMode,
    /// Wave the run ended on
    pub wave: u32,
    pub kills: u32,
    /// Money held at the end
    pub money: u64,
}

impl RunSummary {
    /// Sort key: later waves first, then more kills
    fn rank_key(&self) -> (u32, u32) {
        (self.wave, self.kills)
    }

    fn beats(&self, other: &RunSummary) -> bool {
        self.rank_key() > other.rank_key()
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<RunSummary>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run qualifies for the leaderboard
    pub fn qualifies(&self, run: &RunSummary) -> bool {
        if run.kills == 0 && run.wave <= 1 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| run.beats(e))
    }

    /// Record a run. Returns its rank (1-indexed) or None if it didn't qualify.
    pub fn add(&mut self, run: RunSummary) -> Option<usize> {
        if !self.qualifies(&run) {
            return None;
        }

        // Ties keep the earlier run ahead
        let pos = self.entries.iter().position(|e| run.beats(e));
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, run);
                i + 1
            }
            None => {
                self.entries.push(run);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Run recorded at rank {rank}: wave {}, {} kills", run.wave, run.kills);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&RunSummary> {
        self.entries.first()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load the leaderboard from a JSON file; a missing or bad file starts fresh
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        let Ok(json) = std::fs::read_to_string(path) else {
            log::debug!("No high scores at {}", path.display());
            return Self::new();
        };
        Self::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Invalid high scores in {}: {e}; starting fresh", path.display());
            Self::new()
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
