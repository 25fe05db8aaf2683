//! A hierarchical availability index over geohash-encoded point
//! observations. See `SPEC_FULL.md` / the crate-level design notes for the
//! full model; in short: a [`Router`] maps a short geohash prefix to a
//! [`GridNode`], a fixed-resolution grid whose occupied cells are tracked in
//! a compressed bitmap. A node that gets hit too often on already-occupied
//! cells spawns a finer-grained child, so resolution adapts to density.

mod config;
mod error;
mod geohash_adapter;
mod geom;
mod hll;
mod mbr;
mod node;
mod raster;
mod router;

pub use config::Config;
pub use error::{Error, Result};
pub use geohash_adapter::Direction;
pub use geom::{GridPixel, SpatialRange};
pub use node::{GridNode, NodeStats};
pub use router::Router;
