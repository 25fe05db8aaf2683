//! Query timing driver: fills a single root node with random pixels, then
//! times repeated `intersects` calls against a fixed triangle.

use clap::Parser;
use geoavail::{Config, GridNode};
use rand::Rng;

#[derive(Parser)]
struct Args {
    /// Number of random points to insert before querying.
    #[arg(long, default_value_t = 100_000)]
    points: u32,
    /// Number of timed `intersects` repetitions.
    #[arg(long, default_value_t = 1000)]
    repeat: u32,
}

fn triangle() -> [(f64, f64); 3] {
    [(44.919, -112.242), (43.111, -105.414), (41.271, -111.421)]
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let cfg = Config::default();

    let mut node = GridNode::new("9x", cfg.precision, cfg.hll_precision).unwrap();
    let mut rng = rand::thread_rng();
    for _ in 0..args.points {
        let hash = {
            let alphabet = "0123456789bcdefghjkmnpqrstuvwxyz";
            let mut s = String::from("9x");
            for _ in 0..14 {
                let idx = rng.gen_range(0..alphabet.len());
                s.push(alphabet.as_bytes()[idx] as char);
            }
            s
        };
        node.add_geohash(&hash, &cfg).unwrap();
    }
    println!("populated node with {} occupied cells", node.bmp.len());

    let triangle = triangle();
    let pixels: Vec<_> = triangle
        .iter()
        .map(|&(lat, lon)| node.lat_lon_to_pixel(lat, lon))
        .collect();

    let start = std::time::Instant::now();
    let mut hits = 0;
    for _ in 0..args.repeat {
        if node.polygon_intersects(&pixels) {
            hits += 1;
        }
    }
    let elapsed = start.elapsed();
    println!(
        "{} intersects calls ({hits} true) in {elapsed:?} ({:?}/call)",
        args.repeat,
        elapsed / args.repeat.max(1),
    );
}
