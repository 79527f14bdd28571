//! Ranking engine - place items by head-to-head comparison
//!
//! A new item gets a coarse tier, then a binary search over the existing
//! list asks "which is superior?" until its position is pinned down. The
//! position and tier together produce a bounded display score.

pub mod constants;
pub mod list;
pub mod ranker;
pub mod score;
pub mod session;
pub mod tier;

// Re-exports for convenient access
pub use constants::*;
pub use list::RankedList;
pub use ranker::{BeginOutcome, Placement, Ranker, Step};
pub use score::{position_factor, round_score, synthesize_score};
pub use session::{midpoint, BattlePhase, BattleSession, Choice, Progress, SessionStart, Snapshot};
pub use tier::Tier;
