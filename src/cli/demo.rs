use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use skysurvey::dataset::SliceRows;
use skysurvey::demo::synthetic_survey;
use skysurvey::writer::SurveyWriter;

use super::Config;

/// Generate a synthetic survey bundle
pub fn run(output: PathBuf, rows: usize, pixels: usize, seed: u64, config: &Config) -> Result<()> {
    info!("Generating synthetic survey: {} sources x {} pixels (seed {})", rows, pixels, seed);
    let survey = synthetic_survey(rows, pixels, seed).context("Failed to build synthetic survey")?;

    let stats = SurveyWriter::new(config.writer.writer_config())
        .write(&output, &survey)
        .with_context(|| format!("Failed to write survey bundle {}", output.display()))?;

    println!("Wrote {} ({} sources)", output.display(), survey.num_rows());
    println!("{}", stats);
    Ok(())
}
