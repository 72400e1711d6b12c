//! Error types.

use thiserror::Error;

/// Errors raised while building a tree or loading its configuration.
///
/// Inserting and querying never fail: a point outside the tree is reported with `false` and a
/// window outside the tree yields no points.
#[derive(Debug, Error)]
pub enum QuadtreeError {
    #[error("Invalid node capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    #[error(
        "Invalid root boundary: center ({x}, {y}), height {h}, width {w} \
         (center must be finite, extents finite and positive)"
    )]
    InvalidBoundary { x: f64, y: f64, h: f64, w: f64 },

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),
}
