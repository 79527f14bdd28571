//! UI module - terminal prompt and text rendering

pub mod display;
pub mod prompt;

pub use display::{format_details, format_rankings, format_search_results};
pub use prompt::{run_battle, Command};
