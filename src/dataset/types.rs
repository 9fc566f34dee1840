use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SurveyError;

/// Spectroscopic classification of a source.
///
/// Parsed case-insensitively after trimming, since fixed-width catalog
/// strings are often padded (`"STAR  "`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpectralClass {
    /// Star
    Star,
    /// Quasi-stellar object
    Qso,
    /// Galaxy
    Galaxy,
}

impl SpectralClass {
    /// All classes in canonical order
    pub const ALL: [SpectralClass; 3] = [SpectralClass::Star, SpectralClass::Qso, SpectralClass::Galaxy];

    /// Catalog spelling of the class
    pub fn as_str(&self) -> &'static str {
        match self {
            SpectralClass::Star => "STAR",
            SpectralClass::Qso => "QSO",
            SpectralClass::Galaxy => "GALAXY",
        }
    }
}

impl fmt::Display for SpectralClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpectralClass {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SpectralClass::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SurveyError::Schema(format!("unknown spectral class '{trimmed}'")))
    }
}

/// Photometric band, in the order magnitudes are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    /// u band (~355 nm)
    U,
    /// g band (~469 nm)
    G,
    /// r band (~617 nm)
    R,
    /// i band (~748 nm)
    I,
    /// z band (~893 nm)
    Z,
}

impl Band {
    /// All bands in storage order
    pub const ALL: [Band; 5] = [Band::U, Band::G, Band::R, Band::I, Band::Z];

    /// Column index of this band within a magnitude vector
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Single-letter band name
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::U => "u",
            Band::G => "g",
            Band::R => "r",
            Band::I => "i",
            Band::Z => "z",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Band {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Band::ALL
            .into_iter()
            .find(|band| band.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SurveyError::Schema(format!("unknown band '{trimmed}'")))
    }
}
