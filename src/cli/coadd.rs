use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use skysurvey::coadd::{coadd, coadd_weighted};
use skysurvey::dataset::{
    Band, PhotometricCatalog, RowMask, SliceRows, SpectralClass, SpectroscopicCatalog,
};
use skysurvey::filter::{build_mask, NumericExpr, Predicate};
use skysurvey::reader::SurveyReader;

use super::Config;

/// Row selection requested on the command line
pub struct Selection {
    pub class: Option<SpectralClass>,
    pub color: (Band, Band),
    pub min_color: Option<f64>,
    pub max_color: Option<f64>,
}

#[derive(Serialize)]
struct CoaddOutput {
    sources: usize,
    weighted: bool,
    wavelength: Vec<f64>,
    flux: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ivar: Option<Vec<f64>>,
}

/// Select rows from the catalogs, read only their spectra and co-add them
pub fn run(
    dir: PathBuf,
    selection: Selection,
    weighted: bool,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let reader = SurveyReader::open_with_config(&dir, config.reader.clone())
        .with_context(|| format!("Failed to open survey bundle {}", dir.display()))?;

    let mut mask = RowMask::all(reader.num_rows());
    if let Some(class) = selection.class {
        let spectro: SpectroscopicCatalog = reader.load_table()?;
        mask = mask.and(&build_mask(&spectro, &Predicate::class_equals(class))?)?;
    }
    if selection.min_color.is_some() || selection.max_color.is_some() {
        let photo: PhotometricCatalog = reader.load_table()?;
        let (blue, red) = selection.color;
        let color = NumericExpr::color(blue, red);
        let mut predicates = Vec::new();
        if let Some(min) = selection.min_color {
            predicates.push(Predicate::ge(color.clone(), min));
        }
        if let Some(max) = selection.max_color {
            predicates.push(Predicate::lt(color, max));
        }
        mask = mask.and(&build_mask(&photo, &Predicate::And(predicates))?)?;
    }
    info!("Selected {} of {} sources", mask.count(), mask.len());

    let spectra = reader
        .load_array_rows(&mask)
        .context("Failed to read selected spectra")?;
    let all = RowMask::all(spectra.num_rows());
    let (flux, ivar) = if weighted {
        let (flux, ivar) = coadd_weighted(spectra.flux().view(), spectra.ivar().view(), &all)?;
        (flux, Some(ivar.to_vec()))
    } else {
        (coadd(spectra.flux().view(), &all)?, None)
    };

    let result = CoaddOutput {
        sources: spectra.num_rows(),
        weighted,
        wavelength: spectra.wavelength().to_vec(),
        flux: flux.to_vec(),
        ivar,
    };

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            serde_json::to_writer(&mut out, &result)?;
            out.flush()?;
            info!("Wrote co-added spectrum to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer(&mut out, &result)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
