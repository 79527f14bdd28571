//! CineRank - personal movie rankings from head-to-head comparisons

pub mod catalog;
pub mod core;
pub mod ranking;
pub mod storage;
pub mod ui;
