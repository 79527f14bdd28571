//! Catalog of items available for ranking
//!
//! Records follow the remote movie catalog's shape so exported search
//! results can be dropped in as a local JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::types::{Candidate, ItemId, RankedItem};
use crate::ranking::Tier;

/// A movie record as supplied by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f32,
}

impl CatalogItem {
    /// Year from a `YYYY-MM-DD` release date
    pub fn release_year(&self) -> Option<u16> {
        self.release_date.split('-').next()?.parse().ok()
    }

    pub fn to_candidate(&self) -> Candidate {
        Candidate {
            id: self.id,
            title: self.title.clone(),
            release_year: self.release_year(),
            poster_path: self.poster_path.clone(),
        }
    }
}

impl RankedItem {
    /// Stored record for a catalog item once its tier and score are decided
    pub fn from_catalog(item: &CatalogItem, tier: Tier, score: f64) -> Self {
        item.to_candidate().into_ranked(tier, score)
    }
}

/// Supplies item metadata to the ranking engine
pub trait CatalogProvider {
    fn find(&self, id: ItemId) -> Option<CatalogItem>;

    fn search(&self, query: &str) -> Vec<CatalogItem>;
}

/// Catalog backed by a JSON array of items
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    items: Vec<CatalogItem>,
}

impl JsonCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Load from a JSON file. Failures give an empty catalog.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(?path, error = %e, "catalog unavailable");
                return Self::default();
            }
        };
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<CatalogItem>>(json) {
            Ok(items) => {
                tracing::debug!(count = items.len(), "catalog loaded");
                Self { items }
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog is malformed");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogProvider for JsonCatalog {
    fn find(&self, id: ItemId) -> Option<CatalogItem> {
        self.items.iter().find(|item| item.id == id).cloned()
    }

    /// Case-insensitive title match. Items without a poster are left out.
    fn search(&self, query: &str) -> Vec<CatalogItem> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.items
            .iter()
            .filter(|item| item.poster_path.is_some())
            .filter(|item| item.title.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }
}
