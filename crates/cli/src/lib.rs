//! File-facing side of the transfer engine: read a snapshot, write reports.

pub mod config;
pub mod export;
pub mod loader;

pub use config::Args;
pub use export::{OutputFiles, RecommendationRow, write_outputs, write_recommendations};
pub use loader::{load_table, load_table_file};
