//! Error types for the engagement heatmap crates.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for synthesis and rendering.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Data Errors ===
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Invalid configuration for '{param}': {message}")]
    InvalidConfig { param: String, message: String },

    // === Rendering Errors ===
    #[error("Failed to load font: {0}")]
    Font(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    // === Output Errors ===
    // The wrapped error is the source, so it is not repeated in the message
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

impl HeatmapError {
    /// Shorthand for an [`HeatmapError::InvalidConfig`].
    pub fn config(param: impl Into<String>, message: impl Into<String>) -> Self {
        HeatmapError::InvalidConfig {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Whether the error comes from the destination file system rather than
    /// the data or the renderer.
    pub fn is_io(&self) -> bool {
        matches!(self, HeatmapError::Io(_))
    }
}

impl From<image::ImageError> for HeatmapError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => HeatmapError::Io(io),
            other => HeatmapError::Render(other.to_string()),
        }
    }
}
