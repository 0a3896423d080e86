//! Heatmap rendering for engagement tables.
//!
//! - Colour scales and palettes
//! - Figure layout in physical units
//! - Built-in and TrueType text
//! - Exact-size output via direct rendering or resampling
//! - PNG encoding

pub mod colormap;
pub mod heatmap;
pub mod layout;
pub mod png;
pub mod strategy;
pub mod style;
pub mod text;

pub use colormap::{Color, Colormap};
pub use layout::Figure;
pub use strategy::{render_heatmap, render_to_file, RenderConfig, ResizeStrategy, DEFAULT_SIZE, MAX_SIZE};
pub use style::HeatmapStyle;
