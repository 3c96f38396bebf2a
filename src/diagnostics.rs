use crate::error::Result;
use crate::evader::{Evader, EvaderState};
use crate::geom::{Point2D, Vec3};
use serde::{Deserialize, Serialize};
use std::fs;

/// Read-only picture of an evader for drawing and debugging.
/// Nothing in here feeds back into decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaderSnapshot {
    pub state: EvaderState,
    pub time_since_last_seen: f32,
    pub pursuer: Vec3,
    pub evader: Vec3,
    pub destination: Option<Point2D>,
    /// Seen candidates of the latest episode
    pub seen: Vec<Point2D>,
    /// Hidden candidates that were not chosen
    pub hidden: Vec<Point2D>,
    pub episodes: u64,
}

impl EvaderSnapshot {
    /// Capture `evader`, keeping at most `max_points` candidates per list
    pub fn capture(evader: &Evader, pursuer: Vec3, position: Vec3, max_points: usize) -> Self {
        let candidates = evader.candidates();
        EvaderSnapshot {
            state: evader.state(),
            time_since_last_seen: evader.time_since_last_seen(),
            pursuer,
            evader: position,
            destination: evader.destination(),
            seen: candidates.seen.iter().take(max_points).copied().collect(),
            hidden: candidates.hidden.iter().take(max_points).copied().collect(),
            episodes: evader.total_episodes(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// One-line summary for status panels and logs
    pub fn summary(&self) -> String {
        format!(
            "{:?} | unseen {:.2}s | {} seen / {} hidden | destination {} | episodes {}",
            self.state,
            self.time_since_last_seen,
            self.seen.len(),
            self.hidden.len(),
            match self.destination {
                Some(p) => format!("({:.2}, {:.2})", p.x, p.y),
                None => "none".to_string(),
            },
            self.episodes
        )
    }
}
