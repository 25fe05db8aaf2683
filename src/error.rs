use crate::geom::Field;

/// Errors produced by this crate.
///
/// `InvalidGeohash`, `InvalidPolygon`, `NonFiniteCoordinate` and `OutOfRange`
/// never leave the index in a partially mutated state: the operation that
/// raised them has no effect. `Internal` signals an invariant violation and
/// should be unreachable in practice.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed geohash `{0}`")]
    InvalidGeohash(String),
    #[error("polygon must have at least 3 vertices, got {0}")]
    InvalidPolygon(usize),
    #[error("non-finite coordinate in {0}")]
    NonFiniteCoordinate(&'static str),
    #[error("{field} out of range: {value} is not within {min}..={max}")]
    OutOfRange {
        field: Field,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("allocation failed while growing the {0} for `{1}`")]
    ResourceExhausted(&'static str, String),
    #[error("invariant violation: {0}")]
    Internal(&'static str),
    #[error(transparent)]
    Geohash(#[from] geohash::GeohashError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
