//! Tree configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::QuadtreeError;
use crate::spatial::quadtree::prelude::{Boundary, BoundaryParams};
use crate::spatial::quadtree::region_quadtree::RegionQuadtree;

/// Parameters for building a [`RegionQuadtree`](crate::RegionQuadtree).
///
/// ```toml
/// capacity = 4
///
/// [boundary]
/// x = 400.0
/// y = 400.0
/// h = 800.0
/// w = 800.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct QuadtreeConfig {
    /// Working area covered by the root node.
    #[serde(default = "default_boundary")]
    pub boundary: BoundaryParams,
    /// Points a node holds before it subdivides.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            boundary: default_boundary(),
            capacity: default_capacity(),
        }
    }
}

impl QuadtreeConfig {
    /// Parses a configuration from TOML text. Missing keys fall back to the defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, QuadtreeError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates the configuration stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuadtreeError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded quadtree config from {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Rejects a zero capacity and a root boundary without a finite center and a finite,
    /// positive area.
    pub fn validate(&self) -> Result<(), QuadtreeError> {
        RegionQuadtree::validate(&Boundary::from(self.boundary), self.capacity)
    }
}

fn default_boundary() -> BoundaryParams {
    BoundaryParams { x: 400.0, y: 400.0, h: 800.0, w: 800.0 }
}
fn default_capacity() -> usize {
    4
}
