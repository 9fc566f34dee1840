use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use skysurvey::dataset::{Band, SpectralClass};
use skysurvey::schema::REFERENCE_NUM_PIXELS;

mod classify;
mod coadd;
mod config;
mod demo;
mod info;

pub use config::Config;

/// skysurvey - Exploratory analysis of spectroscopic survey bundles
#[derive(Parser)]
#[command(name = "skysurvey")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a deterministic synthetic survey bundle
    Demo {
        /// Output bundle directory
        #[arg(value_name = "DIR")]
        output: PathBuf,

        /// Number of sources
        #[arg(short = 'n', long, default_value_t = 1000)]
        rows: usize,

        /// Pixels per spectrum
        #[arg(short = 'p', long, default_value_t = REFERENCE_NUM_PIXELS)]
        pixels: usize,

        /// Seed for the pseudo-random generator
        #[arg(short = 's', long, default_value_t = 42)]
        seed: u64,
    },

    /// Display a summary of a survey bundle
    Info {
        /// Bundle directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Co-add the spectra of selected sources and print them as JSON
    Coadd {
        /// Bundle directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Only sources of this class (STAR, QSO, GALAXY)
        #[arg(long)]
        class: Option<SpectralClass>,

        /// Blue band of the color index used by --min-color/--max-color
        #[arg(long, default_value = "u")]
        blue: Band,

        /// Red band of the color index used by --min-color/--max-color
        #[arg(long, default_value = "g")]
        red: Band,

        /// Inclusive lower bound on the color index
        #[arg(long)]
        min_color: Option<f64>,

        /// Exclusive upper bound on the color index
        #[arg(long)]
        max_color: Option<f64>,

        /// Inverse-variance weighted mean instead of a plain sum
        #[arg(long)]
        weighted: bool,

        /// Write the JSON to this file instead of stdout
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Run the star vs. rest nearest-centroid experiment
    Classify {
        /// Bundle directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Fraction of rows used for training
        #[arg(short = 't', long)]
        train_fraction: Option<f64>,

        /// Class treated as the positive label
        #[arg(long)]
        positive: Option<SpectralClass>,
    },
}

impl Cli {
    /// Get the verbosity level
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

/// Initialize logging based on verbosity level
pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Dispatch CLI commands
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Demo {
            output,
            rows,
            pixels,
            seed,
        } => demo::run(output, rows, pixels, seed, &config),
        Commands::Info { dir } => info::run(dir, &config),
        Commands::Coadd {
            dir,
            class,
            blue,
            red,
            min_color,
            max_color,
            weighted,
            output,
        } => coadd::run(
            dir,
            coadd::Selection {
                class,
                color: (blue, red),
                min_color,
                max_color,
            },
            weighted,
            output,
            &config,
        ),
        Commands::Classify {
            dir,
            train_fraction,
            positive,
        } => classify::run(dir, train_fraction, positive, &config),
    }
}
