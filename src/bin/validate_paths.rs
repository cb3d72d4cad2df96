use std::{fs::File, io::BufWriter, path::PathBuf, time::Instant};

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::ProgressIterator;
use sewer_paths::{
    graphs::graph_functions::{generate_test_cases, validate_path},
    search::dijkstra::ShortestPaths,
    utility::{get_progressbar, read_sewer},
};

/// Cross-checks the Dijkstra implementation against brute-force edge
/// relaxation on a sewer, starting from `number_of_sources` random nodes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sewer in text or .bincode format
    #[arg(short, long)]
    sewer: PathBuf,
    /// Number of random source nodes
    #[arg(short, long, default_value = "20")]
    number_of_sources: usize,
    /// Seed for picking the sources
    #[arg(long, default_value = "0")]
    seed: u64,
    /// Path where the test cases will be saved
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let sewer = read_sewer(&args.sewer)?;

    let start = Instant::now();
    let test_cases = generate_test_cases(&sewer, sewer.nodes(), args.number_of_sources, args.seed);
    println!("Generating {} test cases took {:?}", test_cases.len(), start.elapsed());

    let start = Instant::now();
    let mut paths = ShortestPaths::new(&sewer);
    let pb = get_progressbar("Validating", test_cases.len() as u64);
    for test_case in test_cases.iter().progress_with(pb) {
        let request = &test_case.request;
        if paths.source() != Some(&request.source) {
            paths.single_source_distances(request.source)?;
        }
        let path = paths.best_path(&request.target).ok();
        if let Err(reason) = validate_path(&sewer, test_case, path.as_deref()) {
            bail!(
                "wrong result from {} to {}: {}",
                request.source,
                request.target,
                reason
            );
        }
    }
    println!("All correct. Validating took {:?}", start.elapsed());

    if let Some(out) = args.out {
        let writer = BufWriter::new(
            File::create(&out).with_context(|| format!("could not create {}", out.display()))?,
        );
        serde_json::to_writer(writer, &test_cases)?;
    }

    Ok(())
}
