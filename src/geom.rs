use std::fmt;

use crate::error::{Error, Result};

/// A lat/lon bounding box, plus the centroid geohash decoding naturally
/// produces. `south <= north` and `west <= east`; boxes spanning the
/// antimeridian are out of scope (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialRange {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl SpatialRange {
    pub fn x_degrees(&self) -> f64 {
        (self.west - self.east).abs()
    }

    pub fn y_degrees(&self) -> f64 {
        (self.north - self.south).abs()
    }
}

/// Which field an [`Error::OutOfRange`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Latitude,
    Longitude,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
        })
    }
}

pub fn validate_lat_lon(lat: f64, lon: f64) -> Result<()> {
    if !lat.is_finite() {
        return Err(Error::NonFiniteCoordinate("latitude"));
    }
    if !lon.is_finite() {
        return Err(Error::NonFiniteCoordinate("longitude"));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(Error::OutOfRange {
            field: Field::Latitude,
            value: lat,
            min: -90.0,
            max: 90.0,
        });
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(Error::OutOfRange {
            field: Field::Longitude,
            value: lon,
            min: -180.0,
            max: 180.0,
        });
    }
    Ok(())
}

/// An integer pixel on a `width x height` raster, row-major linearized as
/// `y * width + x` (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPixel {
    pub x: i64,
    pub y: i64,
}

impl GridPixel {
    /// Linearize into a bitmap/estimator index, clamping into `[0, width) x
    /// [0, height)` first (spec.md §4.2, §4.6).
    pub fn clamp_and_linearize(self, width: u32, height: u32) -> u32 {
        let x = self.x.clamp(0, width as i64 - 1) as u32;
        let y = self.y.clamp(0, height as i64 - 1) as u32;
        y * width + x
    }
}

/// Map a lat/lon point to a (possibly out-of-bounds) pixel within `base`,
/// using the grid's degrees-per-pixel resolution (spec.md §4.6).
///
/// Latitude decreases as `y` grows; longitude increases as `x` grows.
pub fn lat_lon_to_pixel(base: &SpatialRange, lat: f64, lon: f64, x_px: f64, y_px: f64) -> GridPixel {
    let x_diff = lon - base.west;
    let y_diff = base.north - lat;
    GridPixel {
        x: (x_diff / x_px).floor() as i64,
        y: (y_diff / y_px).floor() as i64,
    }
}

/// `width = 2^floor(precision/2)`, `height = 2^ceil(precision/2)` (spec.md §3).
pub fn grid_dimensions(precision: u32) -> (u32, u32) {
    let w = precision / 2;
    let h = w + precision % 2;
    (1 << w, 1 << h)
}
