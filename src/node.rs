//! A grid node (C5, spec.md §3-§4.2/§4.4): one level of the hierarchy over
//! one geohash prefix, carrying a bitmap of occupied cells, a cardinality
//! estimator, and a list of finer-grained children.

use roaring::RoaringBitmap;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geohash_adapter;
use crate::geom::{grid_dimensions, lat_lon_to_pixel, GridPixel, SpatialRange};
use crate::hll::Estimator;
use crate::raster::rasterize_polygon;

/// One level of the hierarchical index. Leaf (no children) or Internal (>=1
/// child); see spec.md §4.8. Both states accept inserts.
pub struct GridNode {
    pub prefix: String,
    pub base_range: SpatialRange,
    pub precision: u32,
    pub width: u32,
    pub height: u32,
    x_px: f64,
    y_px: f64,
    pub bmp: RoaringBitmap,
    hll: Estimator,
    pub total: u64,
    pub children: Vec<GridNode>,
}

impl GridNode {
    pub fn new(prefix: &str, precision: u32, hll_precision: u8) -> Result<Self> {
        let base_range = geohash_adapter::decode(prefix)?;
        let (width, height) = grid_dimensions(precision);
        let x_deg = base_range.x_degrees();
        let y_deg = base_range.y_degrees();
        log::trace!(
            "new grid node {prefix} ({width}x{height}), base {x_deg:.4} x {y_deg:.4} deg"
        );
        Ok(Self {
            prefix: prefix.to_string(),
            base_range,
            precision,
            width,
            height,
            // spec.md §9 open question: the source divides both by `width`,
            // compressing `y` for odd precisions. We take the fixed reading
            // and divide `y_deg` by `height` (see DESIGN.md).
            x_px: x_deg / width as f64,
            y_px: y_deg / height as f64,
            bmp: RoaringBitmap::new(),
            hll: Estimator::new(hll_precision),
            total: 0,
            children: Vec::new(),
        })
    }

    /// `1 - (estimated_distinct / total)`, 0 when `total == 0` (spec.md §4.3).
    pub fn load_factor(&mut self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        1.0 - (self.hll.estimate() / self.total as f64)
    }

    /// Record one observation in the appropriate descendant, subdividing
    /// this node first if its load factor crosses the configured threshold
    /// (spec.md §4.2).
    pub fn add_geohash(&mut self, geohash: &str, cfg: &Config) -> Result<()> {
        if geohash.is_empty() {
            return Err(Error::InvalidGeohash(geohash.to_string()));
        }

        let prefix_len = self.prefix.len() as u32;
        let lf = self.load_factor();

        if lf > cfg.density_threshold && prefix_len < cfg.max_prefix_len {
            let sub_len = prefix_len as usize + 1;
            let Some(sub_prefix) = geohash.get(..sub_len) else {
                return Err(Error::InvalidGeohash(geohash.to_string()));
            };

            if let Some(child) = self.children.iter_mut().find(|c| c.prefix == sub_prefix) {
                return child.add_geohash(geohash, cfg);
            }

            log::debug!(
                "load factor {lf:.3} breached at {} -> subdividing into {sub_prefix}",
                self.prefix
            );
            let mut child = GridNode::new(sub_prefix, cfg.precision, cfg.hll_precision)?;
            child.add_geohash(geohash, cfg)?;
            self.children.push(child);
            return Ok(());
        }

        self.record(geohash)
    }

    /// Record directly in this node's bitmap: decode, map the centroid to a
    /// pixel, clamp, and mark the cell present.
    fn record(&mut self, geohash: &str) -> Result<()> {
        let sr = geohash_adapter::decode(geohash)?;
        let pixel = lat_lon_to_pixel(&self.base_range, sr.latitude, sr.longitude, self.x_px, self.y_px);
        self.add_pixel(pixel);
        Ok(())
    }

    /// Record an already-computed pixel directly, clamping it into bounds
    /// (used by callers that already have an (x, y) pair, e.g. benchmarks).
    pub fn add_pixel(&mut self, pixel: GridPixel) {
        let idx = pixel.clamp_and_linearize(self.width, self.height);
        self.bmp.insert(idx);
        self.hll.add(idx);
        self.total += 1;
    }

    /// Whether any occupied cell of this node lies inside `polygon`. Does
    /// not descend into children: once a node subdivides, its own bitmap no
    /// longer reflects new writes (spec.md §4.4, flagged in spec.md §9).
    pub fn polygon_intersects(&self, polygon: &[GridPixel]) -> bool {
        let mask = rasterize_polygon(polygon, self.width, self.height);
        self.bmp.intersection_len(&mask) > 0
    }

    /// The occupied cells of this node that lie inside `polygon`.
    pub fn polygon_cells(&self, polygon: &[GridPixel]) -> RoaringBitmap {
        let mask = rasterize_polygon(polygon, self.width, self.height);
        &self.bmp & &mask
    }

    /// Map a lat/lon point to a pixel in this node's grid (spec.md §4.6);
    /// the caller is responsible for clamping/dropping out-of-bounds points.
    pub fn lat_lon_to_pixel(&self, lat: f64, lon: f64) -> GridPixel {
        lat_lon_to_pixel(&self.base_range, lat, lon, self.x_px, self.y_px)
    }

    /// `(prefix, total, distinct_estimate, load_factor)` for this node, and
    /// recursively for every descendant (spec.md §6 `stats()`).
    pub fn stats(&mut self) -> Vec<NodeStats> {
        let mut out = Vec::with_capacity(1 + self.children.len());
        let distinct_estimate = self.hll.estimate();
        let load_factor = self.load_factor();
        out.push(NodeStats {
            prefix: self.prefix.clone(),
            total: self.total,
            distinct_estimate,
            load_factor,
            depth: self.prefix.len() as u32,
        });
        for child in &mut self.children {
            out.extend(child.stats());
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeStats {
    pub prefix: String,
    pub total: u64,
    pub distinct_estimate: f64,
    pub load_factor: f64,
    pub depth: u32,
}

#[cfg(test)]
mod test {
    use super::*;

    fn cfg() -> Config {
        Config::default()
    }

    #[test]
    fn repeated_inserts_keep_one_cell() {
        let mut node = GridNode::new("9x", cfg().precision, cfg().hll_precision).unwrap();
        for _ in 0..10 {
            node.add_geohash("9x12345678901234", &cfg()).unwrap();
        }
        assert_eq!(node.total, 10);
        assert_eq!(node.bmp.len(), 1);
    }

    #[test]
    fn subdivision_refused_past_max_prefix() {
        let mut c = cfg();
        c.max_prefix_len = 2;
        let mut node = GridNode::new("9x", c.precision, c.hll_precision).unwrap();
        let alphabet = "0123456789bcdefghjkmnpqrstuvwxyz";
        for ch in alphabet.chars().take(20) {
            let hash = format!("9x{ch}1234567890123");
            node.add_geohash(&hash, &c).unwrap();
        }
        assert!(node.children.is_empty());
    }

    #[test]
    fn distinct_pixels_give_cardinality_two() {
        let mut node = GridNode::new("9x", cfg().precision, cfg().hll_precision).unwrap();
        node.add_pixel(GridPixel { x: 0, y: 0 });
        node.add_pixel(GridPixel { x: 1, y: 1 });
        assert_eq!(node.bmp.len(), 2);
        assert_eq!(node.total, 2);
    }

    #[test]
    fn same_pixel_collapses_to_one_cell() {
        let mut node = GridNode::new("9x", cfg().precision, cfg().hll_precision).unwrap();
        node.add_pixel(GridPixel { x: 2, y: 2 });
        node.add_pixel(GridPixel { x: 2, y: 2 });
        assert_eq!(node.bmp.len(), 1);
        assert_eq!(node.total, 2);
        assert!((node.load_factor() - 0.5).abs() < 0.05);
    }

    #[test]
    fn out_of_bounds_pixel_is_clamped() {
        let mut node = GridNode::new("9x", cfg().precision, cfg().hll_precision).unwrap();
        node.add_pixel(GridPixel {
            x: node.width as i64 + 5,
            y: node.height as i64 + 5,
        });
        assert_eq!(node.bmp.len(), 1);
        let only = node.bmp.iter().next().unwrap();
        assert_eq!(only, (node.height - 1) * node.width + (node.width - 1));
    }
}
