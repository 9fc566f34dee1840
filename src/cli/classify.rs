use anyhow::{Context, Result};
use std::path::PathBuf;

use skysurvey::classify::{run_experiment_on, NearestCentroid};
use skysurvey::dataset::{PhotometricCatalog, SpectralClass, SpectroscopicCatalog};
use skysurvey::features::{extract_features, extract_labels};
use skysurvey::reader::SurveyReader;

use super::Config;

const DEFAULT_TRAIN_FRACTION: f64 = 0.8;

/// Train and score a nearest-centroid classifier on the magnitudes
///
/// Only the two catalogs are read; spectra are never loaded.
pub fn run(
    dir: PathBuf,
    train_fraction: Option<f64>,
    positive: Option<SpectralClass>,
    config: &Config,
) -> Result<()> {
    let positive = positive
        .or(config.analysis.positive_class)
        .unwrap_or(SpectralClass::Star);
    let train_fraction = train_fraction
        .or(config.analysis.train_fraction)
        .unwrap_or(DEFAULT_TRAIN_FRACTION);

    let reader = SurveyReader::open_with_config(&dir, config.reader.clone())
        .with_context(|| format!("Failed to open survey bundle {}", dir.display()))?;
    let spectro: SpectroscopicCatalog = reader.load_table().context("Failed to load spectroscopic catalog")?;
    let photo: PhotometricCatalog = reader.load_table().context("Failed to load photometric catalog")?;

    let labels = extract_labels(spectro.class(), positive);
    let features = extract_features(photo.magnitudes().view())?;
    let report = run_experiment_on(&NearestCentroid, features.view(), labels.view(), train_fraction)
        .context("Classification experiment failed")?;

    println!("{} vs. rest (train fraction {:.2})", positive, train_fraction);
    println!("{}", report);
    Ok(())
}
