//! End-to-end scenarios from the specification: idempotence, self-cover, the
//! empty-index law, and triangle queries returning only cells truly inside
//! the rasterized polygon.

use geo::Contains;
use geoavail::{Config, Router};

fn triangle() -> [(f64, f64); 3] {
    [(44.919, -112.242), (43.111, -105.414), (41.271, -111.421)]
}

struct Box {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

fn decode_box(hash: &str) -> Box {
    let (coord, lat_err, lon_err) = geohash::decode(hash).unwrap();
    Box {
        north: coord.y + lat_err,
        south: coord.y - lat_err,
        east: coord.x + lon_err,
        west: coord.x - lon_err,
    }
}

#[test]
fn empty_index_never_intersects_any_polygon() {
    let router = Router::new();
    assert!(!router.intersects(&triangle()).unwrap());
    assert!(router.cells(&triangle()).unwrap().is_empty());
}

#[test]
fn repeated_insert_is_idempotent_at_cell_granularity() {
    let mut router = Router::new();
    let hash = "9x12345678901234";

    for _ in 0..10_000 {
        router.insert(hash).unwrap();
    }

    let stats = router.stats();
    let total_inserts: u64 = stats.iter().map(|s| s.total).sum();
    assert_eq!(total_inserts, 10_000);

    // The same geohash always lands on the same pixel at every resolution
    // it passes through, so every node that ever recorded it has a single
    // occupied cell.
    assert!(stats.iter().all(|s| s.total == 0 || s.distinct_estimate <= 1.5));
}

#[test]
fn two_insertions_of_the_same_geohash_give_cardinality_one() {
    let mut router = Router::new();
    router.insert("9x12345678901234").unwrap();
    router.insert("9x12345678901234").unwrap();

    let stats = router.stats();
    let root = stats.iter().find(|s| s.prefix == "9x").unwrap();
    assert_eq!(root.total, 2);
    assert!((root.load_factor - 0.5).abs() < 0.05);
}

#[test]
fn triangle_query_only_returns_cells_inside_it() {
    let mut router = Router::new();

    let base = decode_box("9x");
    let steps = 50;
    for iy in 0..steps {
        for ix in 0..steps {
            let lat = base.south + (base.north - base.south) * (iy as f64 / steps as f64);
            let lon = base.west + (base.east - base.west) * (ix as f64 / steps as f64);
            let hash = geohash::encode(geo_types::Coord { x: lon, y: lat }, 16).unwrap();
            router.insert(&hash).unwrap();
        }
    }

    let triangle = triangle();
    assert!(router.intersects(&triangle).unwrap());

    let poly = geo::Polygon::new(
        geo::LineString::from(
            triangle
                .iter()
                .map(|&(lat, lon)| (lon, lat))
                .collect::<Vec<_>>(),
        ),
        vec![],
    );

    let pixels_per_side: u32 = 1 << 8; // precision 16 -> width = height = 2^8
    let mut found_any = false;
    for (prefix, bitmap) in router.cells(&triangle).unwrap() {
        let node_base = decode_box(&prefix);
        for cell in bitmap {
            found_any = true;
            let (x, y) = (cell % pixels_per_side, cell / pixels_per_side);
            let lat = node_base.north
                - (y as f64 + 0.5) * ((node_base.north - node_base.south) / pixels_per_side as f64);
            let lon = node_base.west
                + (x as f64 + 0.5) * ((node_base.east - node_base.west) / pixels_per_side as f64);
            assert!(poly.contains(&geo_types::Coord { x: lon, y: lat }));
        }
    }
    assert!(found_any, "expected the dense grid to hit some triangle cells");
}

#[test]
fn subdivision_is_refused_past_the_depth_cap() {
    let mut cfg = Config::default();
    cfg.max_prefix_len = 3;
    let mut router = Router::with_config(cfg).unwrap();

    for _ in 0..200 {
        router.insert("9x12345678901234").unwrap();
    }

    let stats = router.stats();
    assert!(stats.iter().all(|s| s.prefix.len() as u32 <= 3));
}
