use std::{fs::File, io::BufWriter, path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use log::info;
use sewer_paths::{
    diver::Diver,
    game::{runner::Game, GameConfig, SCRAM_TIMEOUT, SEEK_TIMEOUT},
    utility::read_sewer,
};

/// Plays a seek sewer and then a scram sewer with the built-in diver and
/// prints the outcome.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sewer to find the ring in, text or .bincode
    #[arg(short = 'k', long)]
    seek: PathBuf,
    /// Sewer to scram out of, text or .bincode
    #[arg(short = 'c', long)]
    scram: PathBuf,
    /// Seconds each phase may take; 0 disables the watchdog
    #[arg(short, long)]
    timeout: Option<u64>,
    /// Fixed scram budget instead of the computed one
    #[arg(short, long)]
    budget: Option<u32>,
    /// Path where the outcome is written as json
    #[arg(short, long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seek_sewer = read_sewer(&args.seek)?;
    let scram_sewer = read_sewer(&args.scram)?;

    let (seek_timeout, scram_timeout) = match args.timeout {
        Some(0) => (None, None),
        Some(seconds) => (
            Some(Duration::from_secs(seconds)),
            Some(Duration::from_secs(seconds)),
        ),
        None => (Some(SEEK_TIMEOUT), Some(SCRAM_TIMEOUT)),
    };
    let config = GameConfig {
        seek_timeout,
        scram_timeout,
        scram_budget: args.budget,
        ..GameConfig::default()
    };

    let game = Game::new(seek_sewer, scram_sewer, config);
    let (outcome, diver) = game.play(Diver::new())?;
    if let Some(diver) = diver {
        info!("seek route: {:?}", diver.seek_log().route());
        info!("scram route: {:?}", diver.scram_log().route());
    }

    println!("Seek             : {:?}", outcome.seek.status);
    if let Some(scram) = &outcome.scram {
        println!("Scram            : {:?}", scram.status);
    }
    println!("Coins collected  : {}", outcome.coins);
    println!("Bonus multiplier : {:.2}", outcome.bonus_factor);
    println!("Score            : {}", outcome.score);

    if let Some(report) = args.report {
        let writer = BufWriter::new(
            File::create(&report).with_context(|| format!("could not create {}", report.display()))?,
        );
        serde_json::to_writer_pretty(writer, &outcome)?;
    }

    Ok(())
}
