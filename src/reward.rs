// Practice rewards: ten stars make a moon, ten moons make a sun.
// Counters live in a small JSON file between runs.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Error;

const CARRY_AT: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardState {
    pub stars: u32,
    pub moons: u32,
    pub suns: u32,
}

/// Highest counter that moved on a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Star,
    Moon,
    Sun,
}

impl RewardState {
    /// One finished practice: add a star and carry upward.
    /// Suns have no upper tier, so they stop at `u32::MAX` instead of wrapping.
    pub fn apply_completion(self) -> (RewardState, Tier) {
        let stars = self.stars.saturating_add(1);
        if stars < CARRY_AT {
            return (RewardState { stars, ..self }, Tier::Star);
        }
        let moons = self.moons.saturating_add(1);
        if moons < CARRY_AT {
            return (RewardState { stars: 0, moons, ..self }, Tier::Moon);
        }
        (RewardState { stars: 0, moons: 0, suns: self.suns.saturating_add(1) }, Tier::Sun)
    }

    /// Stars and moons always carry before reaching ten.
    pub fn is_valid(&self) -> bool {
        self.stars < CARRY_AT && self.moons < CARRY_AT
    }

    /// Missing or unreadable files start from zero.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "could not read rewards; starting fresh");
                }
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(state) if state.is_valid() => state,
            Ok(state) => {
                warn!(path = %path.display(), ?state, "rewards out of range; starting fresh");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt rewards file; starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let json = serde_json::to_string(self).map_err(|e| Error::json(path, e))?;
        std::fs::write(path, json).map_err(|e| Error::write(path, e))
    }
}
