//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ranking::tier::Tier;

/// Unique identifier for a rankable item (the catalog's movie id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// An item with its place-derived score, as stored in the ranked list
///
/// `score` and `tier` are fixed when the item is inserted. Later insertions,
/// removals and reorders never touch them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub release_year: Option<u16>,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Display score in [1.0, 10.0], one decimal place
    pub score: f64,
    #[serde(alias = "vibe")]
    pub tier: Tier,
}

impl RankedItem {
    pub fn new(id: u64, title: impl Into<String>, tier: Tier, score: f64) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            release_year: None,
            poster_path: None,
            score,
            tier,
        }
    }

    pub fn with_release_year(mut self, year: u16) -> Self {
        self.release_year = Some(year);
        self
    }

    pub fn with_poster(mut self, path: impl Into<String>) -> Self {
        self.poster_path = Some(path.into());
        self
    }

    /// Year for display, "N/A" when unknown
    pub fn year_label(&self) -> String {
        self.release_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// An item waiting to be placed: metadata known, score not yet decided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub release_year: Option<u16>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl Candidate {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            release_year: None,
            poster_path: None,
        }
    }

    pub fn with_release_year(mut self, year: u16) -> Self {
        self.release_year = Some(year);
        self
    }

    /// Attach the tier and final score, producing the stored record
    pub fn into_ranked(self, tier: Tier, score: f64) -> RankedItem {
        RankedItem {
            id: self.id,
            title: self.title,
            release_year: self.release_year,
            poster_path: self.poster_path,
            score,
            tier,
        }
    }

    pub fn year_label(&self) -> String {
        self.release_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_into_ranked_keeps_metadata() {
        let candidate = Candidate::new(27205, "Inception").with_release_year(2010);
        let item = candidate.into_ranked(Tier::High, 9.0);
        assert_eq!(item.id, ItemId(27205));
        assert_eq!(item.title, "Inception");
        assert_eq!(item.release_year, Some(2010));
        assert_eq!(item.tier, Tier::High);
        assert_eq!(item.score, 9.0);
    }

    #[test]
    fn test_year_label_unknown() {
        let item = RankedItem::new(1, "Untitled", Tier::Low, 3.0);
        assert_eq!(item.year_label(), "N/A");
        assert_eq!(item.with_release_year(1999).year_label(), "1999");
    }

    #[test]
    fn test_ranked_item_accepts_vibe_field() {
        let json = r#"{"id":7,"title":"Heat","score":8.5,"vibe":"masterpiece"}"#;
        let item: RankedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.tier, Tier::High);
        assert_eq!(item.release_year, None);
    }
}
