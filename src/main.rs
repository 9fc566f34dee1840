//! # skysurvey command-line tool
//!
//! ## Usage
//!
//! ```bash
//! # Write a synthetic bundle
//! skysurvey demo survey --rows 5000 --pixels 1000
//!
//! # Summarize it
//! skysurvey info survey
//!
//! # Co-add the spectra of blue quasars
//! skysurvey coadd survey --class QSO --max-color 0.6 --weighted
//!
//! # Star vs. rest classification
//! skysurvey classify survey --train-fraction 0.8
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
