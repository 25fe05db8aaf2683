//! Cardinality estimator adapter (C3, spec.md §1): a thin wrapper over
//! `hyperloglogplus`, fed pre-mixed 64-bit hashes using the splitmix-style
//! avalanche mix spec.md §9 specifies exactly.

use std::hash::{BuildHasher, Hasher};

use hyperloglogplus::{HyperLogLog, HyperLogLogPlus};

/// `x = (i ^ (i >> 30)) * 0xbf58476d1ce4e5b9; x = (x ^ (x >> 27)) *
/// 0x94d049bb133111eb; return x ^ (x >> 31)` (spec.md §9).
pub fn mix(i: u32) -> u64 {
    let mut x = i as u64;
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}

/// `Hasher` that returns whatever `u64` was last written to it verbatim.
/// The values fed to the estimator are already avalanche-mixed by [`mix`],
/// so no further hashing is needed or wanted.
#[derive(Default)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        // Only ever called with exactly 8 bytes, since we only ever hash a u64.
        let mut buf = [0u8; 8];
        buf[..bytes.len().min(8)].copy_from_slice(&bytes[..bytes.len().min(8)]);
        self.0 = u64::from_ne_bytes(buf);
    }

    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }
}

#[derive(Clone, Default)]
pub struct IdentityBuildHasher;

impl BuildHasher for IdentityBuildHasher {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> IdentityHasher {
        IdentityHasher::default()
    }
}

/// Streaming approximate distinct-count over cell indices.
pub struct Estimator {
    hll: HyperLogLogPlus<u64, IdentityBuildHasher>,
}

impl Estimator {
    /// `precision` is the number of bits used to pick a register (2^precision
    /// registers); spec.md §6 defaults it to 9.
    pub fn new(precision: u8) -> Self {
        Self {
            hll: HyperLogLogPlus::new(precision, IdentityBuildHasher).expect("valid HLL precision"),
        }
    }

    /// Feed one cell index, after mixing it through [`mix`].
    pub fn add(&mut self, cell_index: u32) {
        let mixed = mix(cell_index);
        self.hll.insert(&mixed);
    }

    /// Approximate distinct-count of everything added so far.
    pub fn estimate(&mut self) -> f64 {
        self.hll.count()
    }
}
