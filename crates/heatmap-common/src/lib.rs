//! Common types and utilities shared across the engagement heatmap crates.

pub mod error;
pub mod stats;
pub mod table;

pub use error::{HeatmapError, HeatmapResult};
pub use stats::SummaryStats;
pub use table::{DayKind, EngagementTable};
