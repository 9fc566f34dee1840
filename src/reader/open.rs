use std::path::Path;

use arrow::datatypes::DataType;
use log::{debug, info};

use super::{DatasetId, FileMetadata, ReaderConfig, SurveyReader};
use crate::error::SurveyError;
use crate::schema::{
    columns, validate_photo_catalog, validate_spectra, validate_spectro_catalog,
};

impl SurveyReader {
    /// Open the survey bundle directory at `path`
    ///
    /// Fails with [`SurveyError::NotFound`] if the directory or one of its
    /// three files is missing, [`SurveyError::Schema`] if a file lacks a
    /// required column, and [`SurveyError::Shape`] if the files disagree on
    /// the row count or the wavelength grid disagrees with the flux width.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SurveyError> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    /// Open a survey bundle with custom configuration
    ///
    /// A zero `batch_size` is rejected with [`SurveyError::InvalidData`].
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: ReaderConfig,
    ) -> Result<Self, SurveyError> {
        if config.batch_size == 0 {
            return Err(SurveyError::InvalidData(
                "reader batch_size must be at least 1".to_string(),
            ));
        }

        let root = path.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(SurveyError::NotFound(format!(
                "survey bundle directory {}",
                root.display()
            )));
        }

        let read = |id: DatasetId| -> Result<FileMetadata, SurveyError> {
            let file = root.join(id.file_name());
            if !file.is_file() {
                return Err(SurveyError::NotFound(format!("{} file {}", id, file.display())));
            }
            let metadata = FileMetadata::read(&file)?;
            debug!(
                "{}: {} rows in {} row groups (format {})",
                file.display(),
                metadata.total_rows,
                metadata.num_row_groups,
                metadata.format_version
            );
            Ok(metadata)
        };

        let spectra = read(DatasetId::Spectra)?;
        let spectro = read(DatasetId::SpectroCatalog)?;
        let photo = read(DatasetId::PhotoCatalog)?;

        validate_spectra(&spectra.schema)?;
        validate_spectro_catalog(&spectro.schema)?;
        validate_photo_catalog(&photo.schema)?;

        let rows = spectra.total_rows;
        for (id, meta) in [
            (DatasetId::SpectroCatalog, &spectro),
            (DatasetId::PhotoCatalog, &photo),
        ] {
            if meta.total_rows != rows {
                return Err(SurveyError::row_mismatch(&id.to_string(), rows, meta.total_rows));
            }
        }

        let wavelength = spectra.wavelength()?;
        for name in [columns::FLUX, columns::IVAR] {
            let field = spectra.schema.field_with_name(name)?;
            if let DataType::FixedSizeList(_, width) = field.data_type() {
                if *width as usize != wavelength.len() {
                    return Err(SurveyError::Shape(format!(
                        "'{name}' rows have {width} pixels but the wavelength grid has {}",
                        wavelength.len()
                    )));
                }
            }
        }

        info!(
            "Opened survey bundle {} ({} sources, {} pixels)",
            root.display(),
            rows,
            wavelength.len()
        );

        Ok(Self {
            root,
            config,
            spectra,
            spectro,
            photo,
            wavelength,
        })
    }
}
