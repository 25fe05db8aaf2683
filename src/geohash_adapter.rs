//! Thin wrapper around the `geohash` crate: decode a geohash to a
//! [`SpatialRange`], encode a point at a given precision, and step to a
//! neighboring cell. Treated as a pure external collaborator (spec.md §1);
//! this module owns no state.

use geo_types::Coord;

use crate::error::Result;
use crate::geom::{validate_lat_lon, SpatialRange};

/// Compass directions a geohash can step to, matching spec.md §6's
/// `neighbor(hash, direction)` contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl From<Direction> for geohash::Direction {
    fn from(d: Direction) -> Self {
        match d {
            Direction::N => geohash::Direction::N,
            Direction::S => geohash::Direction::S,
            Direction::E => geohash::Direction::E,
            Direction::W => geohash::Direction::W,
            Direction::NE => geohash::Direction::NE,
            Direction::NW => geohash::Direction::NW,
            Direction::SE => geohash::Direction::SE,
            Direction::SW => geohash::Direction::SW,
        }
    }
}

/// Decode a geohash string to its bounding box, with the centroid populated
/// at the box's midpoint.
pub fn decode(hash: &str) -> Result<SpatialRange> {
    if hash.is_empty() {
        return Err(crate::error::Error::InvalidGeohash(hash.to_string()));
    }
    let (coord, lat_err, lon_err) = geohash::decode(hash)?;
    Ok(SpatialRange {
        north: coord.y + lat_err,
        south: coord.y - lat_err,
        east: coord.x + lon_err,
        west: coord.x - lon_err,
        latitude: coord.y,
        longitude: coord.x,
    })
}

/// Encode a lat/lon point to a geohash string of the given length.
pub fn encode(lat: f64, lon: f64, length: usize) -> Result<String> {
    validate_lat_lon(lat, lon)?;
    Ok(geohash::encode(Coord { x: lon, y: lat }, length)?)
}

/// The geohash immediately adjacent to `hash` in `direction`.
pub fn neighbor(hash: &str, direction: Direction) -> Result<String> {
    Ok(geohash::neighbor(hash, direction.into())?)
}
