use super::SurveyReader;
use crate::dataset::{SpectroscopicCatalog, SurveySummary};
use crate::error::SurveyError;

impl SurveyReader {
    /// Summary statistics without reading the flux matrix
    ///
    /// `fully_masked_spectra` is `None` because ivar is not loaded.
    pub fn summary(&self) -> Result<SurveySummary, SurveyError> {
        let catalog: SpectroscopicCatalog = self.load_table()?;
        Ok(SurveySummary::from_catalog(&catalog, &self.wavelength, None))
    }
}
