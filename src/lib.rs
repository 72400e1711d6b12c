//! Point indexing with a region quadtree.
//!
//! Points are inserted into a [`RegionQuadtree`] covering a fixed working area, and rectangular
//! windows are answered with a pruned descent of the tree. The structure is read back through a
//! pre-order node traversal so a renderer can draw every level without the tree knowing anything
//! about drawing.

pub mod arena;
pub mod config;
pub mod error;
pub mod spatial;

pub use config::QuadtreeConfig;
pub use error::QuadtreeError;
pub use spatial::quadtree::prelude::{Boundary, BoundaryParams, Point, Quadrant};
pub use spatial::quadtree::region_quadtree::{NodeView, QueryObserver, RegionQuadtree};
