//! Router (C6, spec.md §4.1): the top-level map from a fixed-length geohash
//! prefix to a root [`GridNode`]. Routes inserts and queries; performs no
//! geometry itself beyond delegating to the MBR walker.

use std::collections::HashMap;

use roaring::RoaringBitmap;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geom::{validate_lat_lon, GridPixel};
use crate::mbr;
use crate::node::{GridNode, NodeStats};

/// Top-level availability index: a lazily-populated map from root geohash
/// prefix to grid node, plus the knobs every node is created with.
pub struct Router {
    roots: HashMap<String, GridNode>,
    cfg: Config,
}

impl Router {
    pub fn new() -> Self {
        Self::with_config(Config::default()).expect("Config::default must always validate")
    }

    /// Construct a router with caller-supplied tunables, rejecting an
    /// invalid `Config` instead of panicking (spec.md §7: invalid input is
    /// recovered at the call site).
    pub fn with_config(cfg: Config) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            roots: HashMap::new(),
            cfg,
        })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Extract the first `root_prefix_len` characters of `geohash`, look up
    /// or lazily create that root, and delegate to its insert (spec.md
    /// §4.1).
    pub fn insert(&mut self, geohash: &str) -> Result<()> {
        let key_len = self.cfg.root_prefix_len as usize;
        let Some(key) = geohash.get(..key_len) else {
            return Err(Error::InvalidGeohash(geohash.to_string()));
        };

        let node = match self.roots.get_mut(key) {
            Some(node) => node,
            None => {
                log::debug!("creating root grid node for prefix `{key}`");
                let node = GridNode::new(key, self.cfg.precision, self.cfg.hll_precision)?;
                self.roots.entry(key.to_string()).or_insert(node)
            }
        };
        node.add_geohash(geohash, &self.cfg)
    }

    /// Whether any occupied cell across all intersecting roots lies inside
    /// `polygon` (spec.md §6 `intersects`).
    pub fn intersects(&self, polygon: &[(f64, f64)]) -> Result<bool> {
        for (node, pixels) in self.candidate_nodes(polygon)? {
            if node.polygon_intersects(&pixels) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// All occupied cells across all intersecting roots that lie inside
    /// `polygon`, paired with the root prefix they came from so the caller
    /// can reconstruct geographic coordinates (spec.md §6 `cells`).
    pub fn cells(&self, polygon: &[(f64, f64)]) -> Result<Vec<(String, RoaringBitmap)>> {
        let mut out = Vec::new();
        for (node, pixels) in self.candidate_nodes(polygon)? {
            let cells = node.polygon_cells(&pixels);
            if !cells.is_empty() {
                out.push((node.prefix.clone(), cells));
            }
        }
        Ok(out)
    }

    /// `(prefix, total, distinct_estimate, load_factor)` for every root, and
    /// recursively for every child (spec.md §6 `stats`).
    pub fn stats(&mut self) -> Vec<NodeStats> {
        let mut out = Vec::new();
        for node in self.roots.values_mut() {
            out.extend(node.stats());
        }
        out.sort_by(|a, b| a.prefix.cmp(&b.prefix));
        out
    }

    fn candidate_nodes(&self, polygon: &[(f64, f64)]) -> Result<Vec<(&GridNode, Vec<GridPixel>)>> {
        if polygon.len() < 3 {
            return Err(Error::InvalidPolygon(polygon.len()));
        }
        for &(lat, lon) in polygon {
            validate_lat_lon(lat, lon)?;
        }

        let mbr = mbr::bounding_rectangle(polygon);
        let prefixes = mbr::enumerate_prefixes(self.cfg.root_prefix_len as usize, &mbr)?;

        let mut out = Vec::new();
        for prefix in prefixes {
            let Some(node) = self.roots.get(&prefix) else {
                continue;
            };
            let pixels: Vec<GridPixel> = polygon
                .iter()
                .map(|&(lat, lon)| node.lat_lon_to_pixel(lat, lon))
                .collect();
            out.push((node, pixels));
        }
        Ok(out)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
