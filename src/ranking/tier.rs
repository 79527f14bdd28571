//! Tier classifier - the coarse judgment a user makes before any comparison

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::constants::{HIGH_TIER_BASE, LOW_TIER_BASE, MID_TIER_BASE};
use crate::core::error::CineError;

/// Coarse pre-classification of an item
///
/// Serialized with the user-facing vibe names; the plain `high`/`mid`/`low`
/// spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "masterpiece", alias = "high")]
    High,
    #[serde(rename = "matinee", alias = "mid")]
    Mid,
    #[serde(rename = "flop", alias = "low")]
    Low,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::High, Tier::Mid, Tier::Low];

    /// Base score anchor for this tier
    pub fn base_score(self) -> f64 {
        match self {
            Tier::High => HIGH_TIER_BASE,
            Tier::Mid => MID_TIER_BASE,
            Tier::Low => LOW_TIER_BASE,
        }
    }

    /// User-facing name
    pub fn vibe(self) -> &'static str {
        match self {
            Tier::High => "masterpiece",
            Tier::Mid => "matinee",
            Tier::Low => "flop",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.vibe())
    }
}

impl FromStr for Tier {
    type Err = CineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "masterpiece" | "high" => Ok(Tier::High),
            "matinee" | "mid" => Ok(Tier::Mid),
            "flop" | "low" => Ok(Tier::Low),
            other => Err(CineError::UnknownTier(other.to_string())),
        }
    }
}
