//! Bulk-insert timing driver: reads newline-separated geohashes from a file
//! and reports how long it took to route and record them all.

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

    let hashes: Vec<String> = BufReader::new(file)
        .lines()
        .map(|l| l.expect("valid utf-8 line"))
        .filter(|l| !l.is_empty())
        .collect();

    println!("inserting {} geohashes", hashes.len());
    let mut router = Router::new();
    let start = std::time::Instant::now();
    for hash in &hashes {
        router.insert(hash).unwrap();
    }
    let elapsed = start.elapsed();
    println!("inserted {} geohashes in {elapsed:?}", hashes.len());
}
