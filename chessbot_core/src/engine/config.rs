use crate::engine::eval::HeuristicVersion;
use crate::error::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters of the adaptive search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched before leaves are forced, not counting extensions.
    pub depth_limit: u8,
    /// Below this elapsed time sparse positions are searched one ply deeper.
    pub low_time_ms: u64,
    /// From this elapsed time on every node is evaluated as a leaf.
    pub high_time_ms: u64,
    /// Positions with at most this many pieces on the board get the extension.
    pub endgame_piece_threshold: usize,
    pub heuristic: HeuristicVersion,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth_limit: 5,
            low_time_ms: 10_000,
            high_time_ms: 150_000,
            endgame_piece_threshold: 15,
            heuristic: HeuristicVersion::PRODUCTION,
        }
    }
}

impl SearchConfig {
    pub fn load_from_json(json_str: &str) -> SearchResult<Self> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SearchResult<()> {
        if self.depth_limit == 0 {
            return Err(SearchError::InvalidConfig(
                "depth_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub const fn low_time_threshold(&self) -> Duration {
        Duration::from_millis(self.low_time_ms)
    }

    pub const fn high_time_threshold(&self) -> Duration {
        Duration::from_millis(self.high_time_ms)
    }
}
