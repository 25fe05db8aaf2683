//! Router configuration (spec.md §6): the five tunable knobs, with the
//! documented defaults.

/// Tunables for a [`crate::Router`]. Construct with [`Config::default`] and
/// override individual fields, the way the teacher crate exposes a single
/// public `threshold` field on its `Writer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Length of the router key (the root geohash prefix). Default 2, range
    /// 1-10.
    pub root_prefix_len: u32,
    /// Precision driving a grid node's resolution: `width = 2^floor(p/2)`,
    /// `height = 2^ceil(p/2)`. Default 16.
    pub precision: u32,
    /// Load factor above which a node subdivides. Default 0.6, range (0, 1).
    pub density_threshold: f64,
    /// Hard cap on geohash prefix length / tree depth. Default 10.
    pub max_prefix_len: u32,
    /// `2^hll_precision` HyperLogLog registers per node. Default 9.
    pub hll_precision: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_prefix_len: 2,
            precision: 16,
            density_threshold: 0.6,
            max_prefix_len: 10,
            hll_precision: 9,
        }
    }
}

impl Config {
    /// Reject configurations spec.md §6 doesn't allow.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(1..=10).contains(&self.root_prefix_len) {
            return Err(crate::error::Error::Internal(
                "root_prefix_len must be within 1..=10",
            ));
        }
        if self.max_prefix_len < self.root_prefix_len || self.max_prefix_len > 10 {
            return Err(crate::error::Error::Internal(
                "max_prefix_len must be within root_prefix_len..=10",
            ));
        }
        if !(self.density_threshold > 0.0 && self.density_threshold < 1.0) {
            return Err(crate::error::Error::Internal(
                "density_threshold must be within (0, 1)",
            ));
        }
        if self.precision == 0 || self.precision > 32 {
            return Err(crate::error::Error::Internal(
                "precision must be within 1..=32",
            ));
        }
        if !(4..=18).contains(&self.hll_precision) {
            return Err(crate::error::Error::Internal(
                "hll_precision must be within 4..=18",
            ));
        }
        Ok(())
    }
}
