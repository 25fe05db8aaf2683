//! Empirical density driver: bulk-inserts geohashes from a file, then dumps
//! `(prefix, total, distinct_estimate, load_factor)` for every node in the
//! resulting hierarchy.

use std::io::{BufRead, BufReader};

use clap::Parser;
use geoavail::Router;

#[derive(Parser)]
struct Args {
    /// Path to a file of newline-separated geohashes.
    path: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let file = std::fs::File::open(&args.path).unwrap_or_else(|e| {
        eprintln!("failed to open {}: {e}", args.path);
        std::process::exit(1);
    });

    let mut router = Router::new();
    for line in BufReader::new(file).lines() {
        let hash = line.expect("valid utf-8 line");
        if hash.is_empty() {
            continue;
        }
        router.insert(&hash).unwrap();
    }

    println!("{:<12} {:>10} {:>16} {:>10}", "prefix", "total", "distinct_est", "load_factor");
    for s in router.stats() {
        println!(
            "{:<12} {:>10} {:>16.2} {:>10.3}",
            s.prefix, s.total, s.distinct_estimate, s.load_factor
        );
    }
}
