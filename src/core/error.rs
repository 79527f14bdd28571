use thiserror::Error;

use crate::core::types::ItemId;

#[derive(Error, Debug)]
pub enum CineError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Item already ranked: {0}")]
    DuplicateItem(ItemId),

    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Rank {rank} out of range, the list has {len} items")]
    RankOutOfRange { rank: usize, len: usize },

    #[error("Finish ranking {0} first")]
    SessionInProgress(ItemId),

    #[error("Invalid reorder: {0}")]
    InvalidReorder(String),

    #[error("Unknown tier: {0}")]
    UnknownTier(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CineError>;
