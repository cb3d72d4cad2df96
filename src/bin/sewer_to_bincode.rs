use std::{fs::File, io::BufWriter, path::PathBuf, time::Instant};

use anyhow::Context;
use clap::Parser;
use sewer_paths::utility::read_sewer;

/// Reading a .bincode sewer skips parsing the text format
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in text format
    #[arg(short = 't', long)]
    sewer_text: PathBuf,
    /// Outfile in .bincode format
    #[arg(short = 'b', long)]
    sewer_bincode: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let sewer = read_sewer(&args.sewer_text)?;
    println!("Reading text sewer took {:?}", start.elapsed());

    let start = Instant::now();
    let writer = BufWriter::new(
        File::create(&args.sewer_bincode)
            .with_context(|| format!("could not create {}", args.sewer_bincode.display()))?,
    );
    bincode::serialize_into(writer, &sewer)?;
    println!("Writing bincode took {:?}", start.elapsed());

    Ok(())
}
