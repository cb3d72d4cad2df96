use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};

use crate::sewer::Sewer;

pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    let style = ProgressStyle::with_template(" {msg} {wide_bar} {pos}/{len} estimated remaining: {eta_precise}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

pub fn get_progressspinner(job_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(job_name.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Reads a sewer in the text format, or in bincode if the file name ends in
/// `.bincode`.
pub fn read_sewer(path: &Path) -> anyhow::Result<Sewer> {
    let spinner = get_progressspinner(&format!("Reading {}", path.display()));
    let sewer = if path.extension().is_some_and(|extension| extension == "bincode") {
        let reader = BufReader::new(
            File::open(path).with_context(|| format!("could not open {}", path.display()))?,
        );
        bincode::deserialize_from(reader)
            .with_context(|| format!("could not decode {}", path.display()))?
    } else {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Sewer::from_text(&text).with_context(|| format!("could not parse {}", path.display()))?
    };
    spinner.finish_and_clear();
    Ok(sewer)
}
