//! Render configuration for the heatmap CLI.
//!
//! A YAML file may override any part of [`RenderConfig`]; command-line flags
//! are applied on top of it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use renderer::{Figure, RenderConfig, ResizeStrategy};

/// Values given on the command line (or via environment), if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub strategy: Option<ResizeStrategy>,
    pub size: Option<u32>,
    pub font: Option<PathBuf>,
}

/// Load and validate a render configuration YAML file.
pub fn load_render_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read render config from {:?}", path.as_ref()))?;

    let config: RenderConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse render config from {:?}", path.as_ref()))?;

    Ok(config)
}

/// Build the effective configuration: file (or defaults), then overrides.
pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<RenderConfig> {
    let mut config = match path {
        Some(path) => load_render_config(path)?,
        None => RenderConfig::default(),
    };
    apply_overrides(&mut config, overrides);
    config.validate().context("Invalid render configuration")?;
    Ok(config)
}

/// Apply command-line overrides.
///
/// A size override also resizes the direct figure at its current dpi, so
/// `--size` alone keeps the direct strategy consistent.
pub fn apply_overrides(config: &mut RenderConfig, overrides: &Overrides) {
    if let Some(strategy) = overrides.strategy {
        config.strategy = strategy;
    }
    if let Some(size) = overrides.size {
        config.size = size;
        let dpi = config.direct.dpi;
        let inches = size as f32 / dpi;
        config.direct = Figure::new(inches, inches, dpi);
    }
    if let Some(font) = &overrides.font {
        config.font = Some(font.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let mut config = RenderConfig::default();
        apply_overrides(&mut config, &Overrides::default());
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_size_override_keeps_direct_consistent() {
        let mut config = RenderConfig::default();
        apply_overrides(
            &mut config,
            &Overrides {
                size: Some(300),
                ..Overrides::default()
            },
        );
        assert_eq!(config.direct.pixel_size(), (300, 300));
        assert!(config.validate().is_ok());
    }
}
