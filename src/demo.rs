//! Deterministic synthetic survey bundles.
//!
//! Produces plausible stars, galaxies and quasars without any real data:
//! stellar colors sit on a red locus, quasars are blue in `u - g`, galaxies
//! show a 4000 Angstrom break and quasars carry broad redshifted emission
//! lines. The same `(rows, pixels, seed)` always yields the same dataset.

use ndarray::{Array1, Array2};

use crate::dataset::{
    PhotometricCatalog, SpectralClass, SpectroscopicCatalog, SpectrumTable, SurveyDataset,
};
use crate::error::SurveyError;
use crate::schema::NUM_BANDS;

/// Blue edge of the synthetic wavelength grid in Angstrom
pub const WAVELENGTH_MIN: f64 = 3600.0;

/// Red edge of the synthetic wavelength grid in Angstrom
pub const WAVELENGTH_MAX: f64 = 10400.0;

/// Name of the extra catalog column holding the median signal-to-noise
pub const SNR_COLUMN: &str = "snr_median";

/// Extinction per unit E(B-V) for the u, g, r, i, z bands
const EXTINCTION_COEFFS: [f64; NUM_BANDS] = [4.239, 3.303, 2.285, 1.698, 1.263];

/// Per-class adjacent colors (u-g, g-r, r-i, i-z)
fn class_colors(class: SpectralClass) -> [f64; NUM_BANDS - 1] {
    match class {
        SpectralClass::Star => [1.25, 0.45, 0.18, 0.08],
        SpectralClass::Galaxy => [1.70, 0.85, 0.42, 0.30],
        SpectralClass::Qso => [0.20, 0.15, 0.12, 0.05],
    }
}

/// Deterministic pseudo-noise in `[0, 1)`
fn unit_noise(seed: u64, row: usize, channel: usize) -> f64 {
    let x = (seed % 100_003) as f64 * 12.9898 + row as f64 * 78.233 + channel as f64 * 37.719;
    let v = (x.sin() * 43_758.545_3).fract();
    if v < 0.0 {
        v + 1.0
    } else {
        v
    }
}

/// Deterministic pseudo-noise in `[-1, 1)`
fn signed_noise(seed: u64, row: usize, channel: usize) -> f64 {
    2.0 * unit_noise(seed, row, channel) - 1.0
}

/// Log-linear wavelength grid of `pixels` samples
pub fn wavelength_grid(pixels: usize) -> Array1<f64> {
    if pixels == 1 {
        return Array1::from(vec![WAVELENGTH_MIN]);
    }
    let (lo, hi) = (WAVELENGTH_MIN.log10(), WAVELENGTH_MAX.log10());
    let step = (hi - lo) / (pixels.saturating_sub(1).max(1)) as f64;
    (0..pixels)
        .map(|j| 10f64.powf(lo + step * j as f64))
        .collect()
}

fn draw_class(seed: u64, row: usize) -> SpectralClass {
    let u = unit_noise(seed, row, 0);
    if u < 0.5 {
        SpectralClass::Star
    } else if u < 0.8 {
        SpectralClass::Galaxy
    } else {
        SpectralClass::Qso
    }
}

fn draw_redshift(class: SpectralClass, seed: u64, row: usize) -> f64 {
    let u = unit_noise(seed, row, 1);
    match class {
        SpectralClass::Star => 0.0005 * signed_noise(seed, row, 2),
        SpectralClass::Galaxy => 0.02 + 0.68 * u,
        SpectralClass::Qso => 0.3 + 3.2 * u,
    }
}

/// Gaussian emission line
fn line(wavelength: f64, center: f64, sigma: f64, amplitude: f64) -> f64 {
    let d = (wavelength - center) / sigma;
    amplitude * (-0.5 * d * d).exp()
}

/// Noise-free model spectrum of one source
fn model_flux(class: SpectralClass, z: f64, brightness: f64, wavelength: f64) -> f64 {
    let x = wavelength / 5000.0;
    match class {
        SpectralClass::Star => brightness * x.powf(-2.0),
        SpectralClass::Galaxy => {
            let rest = wavelength / (1.0 + z);
            let break_factor = if rest < 4000.0 { 0.5 } else { 1.0 };
            brightness * x.powf(0.5) * break_factor
                + line(wavelength, 6563.0 * (1.0 + z), 8.0, 0.8 * brightness)
        }
        SpectralClass::Qso => {
            let continuum = brightness * x.powf(-0.5);
            continuum
                + line(wavelength, 1216.0 * (1.0 + z), 30.0, 3.0 * brightness)
                + line(wavelength, 1549.0 * (1.0 + z), 25.0, 1.5 * brightness)
                + line(wavelength, 2798.0 * (1.0 + z), 25.0, 1.0 * brightness)
        }
    }
}

/// Build a synthetic survey of `rows` sources with `pixels` pixels each.
///
/// About half the sources are stars, 30% galaxies and 20% quasars. Roughly
/// 2% of pixels are flagged bad (ivar 0).
///
/// # Example
///
/// ```
/// use skysurvey::dataset::SliceRows;
/// use skysurvey::demo::synthetic_survey;
///
/// let survey = synthetic_survey(50, 100, 7)?;
/// assert_eq!(survey.num_rows(), 50);
/// assert_eq!(survey.num_pixels(), 100);
/// # Ok::<(), skysurvey::SurveyError>(())
/// ```
pub fn synthetic_survey(
    rows: usize,
    pixels: usize,
    seed: u64,
) -> Result<SurveyDataset, SurveyError> {
    let wavelength = wavelength_grid(pixels);

    let mut class = Vec::with_capacity(rows);
    let mut redshift = Vec::with_capacity(rows);
    let mut redshift_err = Vec::with_capacity(rows);
    let mut snr = Vec::with_capacity(rows);
    let mut magnitudes = Array2::<f32>::zeros((rows, NUM_BANDS));
    let mut extinction = Array2::<f32>::zeros((rows, NUM_BANDS));
    let mut flux = Array2::<f32>::zeros((rows, pixels));
    let mut ivar = Array2::<f32>::zeros((rows, pixels));

    for i in 0..rows {
        let c = draw_class(seed, i);
        let z = draw_redshift(c, seed, i);
        class.push(c);
        redshift.push(z);
        redshift_err.push(1e-4 * (1.0 + z.abs()));

        // r-band magnitude anchors the other bands through the class colors
        let r_mag = 16.0 + 5.0 * unit_noise(seed, i, 3);
        let colors = class_colors(c);
        let mut mags = [0.0f64; NUM_BANDS];
        mags[2] = r_mag;
        mags[1] = r_mag + colors[1];
        mags[0] = mags[1] + colors[0];
        mags[3] = r_mag - colors[2];
        mags[4] = mags[3] - colors[3];

        let ebv = 0.02 + 0.05 * unit_noise(seed, i, 4);
        for b in 0..NUM_BANDS {
            let extinct = EXTINCTION_COEFFS[b] * ebv;
            let jitter = 0.08 * signed_noise(seed, i, 10 + b);
            magnitudes[[i, b]] = (mags[b] + extinct + jitter) as f32;
            extinction[[i, b]] = extinct as f32;
        }

        // Brighter sources get higher flux and lower relative noise
        let brightness = 10f64.powf(-0.4 * (r_mag - 22.5));
        let sigma = 0.5 + 0.1 * unit_noise(seed, i, 5);
        snr.push(brightness / sigma);
        for (j, &wl) in wavelength.iter().enumerate() {
            let noise = sigma * signed_noise(seed, i, 100 + j);
            flux[[i, j]] = (model_flux(c, z, brightness, wl) + noise) as f32;
            let bad = unit_noise(seed ^ 0x5eed, i, j) > 0.98;
            ivar[[i, j]] = if bad { 0.0 } else { (1.0 / (sigma * sigma)) as f32 };
        }
    }

    let spectra = SpectrumTable::new(flux, ivar, wavelength)?;
    let spectro =
        SpectroscopicCatalog::new(class, Array1::from(redshift), Array1::from(redshift_err))?
            .with_extra(SNR_COLUMN, Array1::from(snr))?;
    let photo = PhotometricCatalog::new(magnitudes, extinction)?;
    SurveyDataset::from_parts(spectra, spectro, photo)
}
