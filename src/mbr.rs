//! MBR walker (C7, spec.md §4.7): given a polygon, enumerate the root
//! prefixes whose boxes intersect the polygon's minimum bounding rectangle
//! by walking the geohash neighborhood graph row by row from the
//! north-west corner to the south-east corner.

use crate::error::{Error, Result};
use crate::geohash_adapter::{self, Direction};
use crate::geom::SpatialRange;

/// A safety bound on how many cells the walker will visit, well above any
/// real MBR at router-key granularity; guards against a neighbor-stepping
/// bug turning into an infinite loop.
const MAX_VISITS: usize = 1_000_000;

/// Minimum bounding rectangle of a polygon given as `(lat, lon)` vertices
/// (spec.md §4.7 step 1).
pub fn bounding_rectangle(polygon: &[(f64, f64)]) -> SpatialRange {
    let mut north = f64::MIN;
    let mut south = f64::MAX;
    let mut east = f64::MIN;
    let mut west = f64::MAX;
    for &(lat, lon) in polygon {
        north = north.max(lat);
        south = south.min(lat);
        east = east.max(lon);
        west = west.min(lon);
    }
    SpatialRange {
        north,
        south,
        east,
        west,
        latitude: (north + south) / 2.0,
        longitude: (east + west) / 2.0,
    }
}

/// Enumerate every geohash prefix of length `key_len` whose box lies within
/// the MBR's corner-to-corner span, by stepping east across each row and
/// south between rows (spec.md §4.7 steps 2-3).
///
/// The row width (column count) is measured once on the first row, by
/// walking NW to NE, and then reused as a per-row step counter for every
/// subsequent row — mirroring the `width`/`g_width` bookkeeping in
/// `grid_queries.c`. Comparing `curr` against the fixed `north_east` only
/// ever matches on the first row, so later rows need their own east-edge
/// signal; a counter sidesteps recomputing a row-local east prefix.
pub fn enumerate_prefixes(key_len: usize, mbr: &SpatialRange) -> Result<Vec<String>> {
    let north_west = geohash_adapter::encode(mbr.north, mbr.west, key_len)?;
    let north_east = geohash_adapter::encode(mbr.north, mbr.east, key_len)?;
    let south_east = geohash_adapter::encode(mbr.south, mbr.east, key_len)?;

    let mut width = 1usize;
    let mut cursor = north_west.clone();
    while cursor != north_east {
        cursor = geohash_adapter::neighbor(&cursor, Direction::E)?;
        width += 1;
        if width > MAX_VISITS {
            return Err(Error::Internal(
                "MBR walker exceeded its visit budget while measuring row width",
            ));
        }
    }

    let mut prefixes = Vec::new();
    let mut row_start = north_west;

    loop {
        let mut curr = row_start.clone();
        for col in 0..width {
            prefixes.push(curr.clone());

            if curr == south_east {
                return Ok(prefixes);
            }

            if col + 1 < width {
                curr = geohash_adapter::neighbor(&curr, Direction::E)?;
            }

            if prefixes.len() > MAX_VISITS {
                return Err(Error::Internal(
                    "MBR walker exceeded its visit budget; the neighbor graph likely cycled",
                ));
            }
        }

        row_start = geohash_adapter::neighbor(&row_start, Direction::S)?;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_point_mbr_yields_one_prefix() {
        let polygon = [(0.0, 0.0)];
        let mbr = bounding_rectangle(&polygon);
        let prefixes = enumerate_prefixes(2, &mbr).unwrap();
        assert_eq!(prefixes.len(), 1);
    }

    #[test]
    fn mbr_of_polygon_contains_all_vertices() {
        let polygon = [(44.919, -112.242), (43.111, -105.414), (41.271, -111.421)];
        let mbr = bounding_rectangle(&polygon);
        for &(lat, lon) in &polygon {
            assert!(mbr.south <= lat && lat <= mbr.north);
            assert!(mbr.west <= lon && lon <= mbr.east);
        }
    }

    #[test]
    fn walker_includes_the_corners() {
        let mbr = bounding_rectangle(&[(10.0, 10.0), (20.0, 20.0)]);
        let nw = geohash_adapter::encode(mbr.north, mbr.west, 2).unwrap();
        let se = geohash_adapter::encode(mbr.south, mbr.east, 2).unwrap();
        let prefixes = enumerate_prefixes(2, &mbr).unwrap();
        assert!(prefixes.contains(&nw));
        assert!(prefixes.contains(&se));
    }

    /// A multi-row, multi-column MBR at `key_len = 2` (~5.6deg x 11.25deg
    /// cells): every row must terminate on its own east edge instead of
    /// only the first row ever wrapping south.
    #[test]
    fn walker_terminates_and_covers_every_row_on_a_wide_tall_mbr() {
        let mbr = bounding_rectangle(&[(-30.0, -60.0), (30.0, 60.0)]);
        let prefixes = enumerate_prefixes(2, &mbr).unwrap();

        let nw = geohash_adapter::encode(mbr.north, mbr.west, 2).unwrap();
        let se = geohash_adapter::encode(mbr.south, mbr.east, 2).unwrap();
        assert!(prefixes.contains(&nw));
        assert!(prefixes.contains(&se));

        // A visibly row-and-column spanning MBR should yield far more than
        // one row's worth of prefixes.
        assert!(prefixes.len() > 10);

        let unique: std::collections::HashSet<_> = prefixes.iter().collect();
        assert_eq!(unique.len(), prefixes.len(), "no prefix should repeat");
    }
}
