use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::tempdir;

use super::utils::consecutive_ranges;
use super::*;
use crate::dataset::{
    PhotometricCatalog, RowMask, SliceRows, SpectralClass, SpectroscopicCatalog, SurveyDataset,
};
use crate::demo::{synthetic_survey, SNR_COLUMN};
use crate::error::SurveyError;
use crate::writer::{SurveyWriter, WriterConfig};

/// Write a synthetic bundle cut into small row groups
fn write_bundle(dir: &Path, rows: usize) -> SurveyDataset {
    let survey = synthetic_survey(rows, 12, 4).unwrap();
    let config = WriterConfig {
        row_group_size: 7,
        ..WriterConfig::default()
    };
    SurveyWriter::new(config).write(dir, &survey).unwrap();
    survey
}

/// Overwrite the spectroscopic catalog with hand-built columns
fn write_catalog_file(dir: &Path, columns: Vec<(&str, ArrayRef)>) {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let arrays = columns.into_iter().map(|(_, array)| array).collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();

    let file = File::create(dir.join(DatasetId::SpectroCatalog.file_name())).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

fn small_reader_config() -> ReaderConfig {
    ReaderConfig { batch_size: 5 }
}

#[test]
fn test_open_reports_shape() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    write_bundle(dir.path(), 30);

    let reader = SurveyReader::open(dir.path())?;
    assert_eq!(reader.num_rows(), 30);
    assert_eq!(reader.num_pixels(), 12);
    assert_eq!(reader.wavelength().len(), 12);
    assert_eq!(reader.file_metadata(DatasetId::Spectra).num_row_groups, 5);
    assert_eq!(reader.root(), dir.path());
    Ok(())
}

#[test]
fn test_load_everything_roundtrips() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    let survey = write_bundle(dir.path(), 30);

    let reader = SurveyReader::open_with_config(dir.path(), small_reader_config())?;
    assert_eq!(&reader.load_array()?, survey.spectra());

    let spectro: SpectroscopicCatalog = reader.load_table()?;
    assert_eq!(&spectro, survey.spectro());
    assert!(spectro.extra(SNR_COLUMN).is_some());

    let photo: PhotometricCatalog = reader.load_table()?;
    assert_eq!(&photo, survey.photo());

    assert_eq!(reader.load_dataset()?, survey);
    Ok(())
}

#[test]
fn test_missing_directory_is_not_found() {
    let dir = tempdir().unwrap();
    let result = SurveyReader::open(dir.path().join("nope"));
    assert!(matches!(result, Err(SurveyError::NotFound(_))));
}

#[test]
fn test_missing_file_is_not_found() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    write_bundle(dir.path(), 10);
    fs::remove_file(dir.path().join(DatasetId::PhotoCatalog.file_name()))?;

    let result = SurveyReader::open(dir.path());
    assert!(matches!(result, Err(SurveyError::NotFound(_))));
    Ok(())
}

#[test]
fn test_misaligned_bundle_is_shape_error() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    let other = tempdir()?;
    write_bundle(dir.path(), 10);
    write_bundle(other.path(), 8);

    let name = DatasetId::PhotoCatalog.file_name();
    fs::copy(other.path().join(name), dir.path().join(name))?;

    let result = SurveyDataset::open(dir.path());
    assert!(matches!(result, Err(SurveyError::Shape(_))));
    Ok(())
}

#[test]
fn test_missing_column_is_schema_error() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    write_bundle(dir.path(), 3);
    write_catalog_file(
        dir.path(),
        vec![
            ("class", Arc::new(StringArray::from(vec!["STAR", "QSO", "GALAXY"])) as ArrayRef),
            ("z", Arc::new(Float64Array::from(vec![0.0, 1.0, 0.5])) as ArrayRef),
        ],
    );

    let result = SurveyReader::open(dir.path());
    assert!(matches!(result, Err(SurveyError::Schema(_))));
    Ok(())
}

#[test]
fn test_unknown_class_is_schema_error() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    write_bundle(dir.path(), 3);
    write_catalog_file(
        dir.path(),
        vec![
            ("class", Arc::new(StringArray::from(vec!["STAR", "COMET", "QSO"])) as ArrayRef),
            ("z", Arc::new(Float64Array::from(vec![0.0, 1.0, 0.5])) as ArrayRef),
            ("z_err", Arc::new(Float64Array::from(vec![0.1, 0.1, 0.1])) as ArrayRef),
        ],
    );

    let reader = SurveyReader::open(dir.path())?;
    let result = reader.load_table::<SpectroscopicCatalog>();
    assert!(matches!(result, Err(SurveyError::Schema(_))));
    Ok(())
}

#[test]
fn test_padded_class_strings_and_null_redshift() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    write_bundle(dir.path(), 3);
    write_catalog_file(
        dir.path(),
        vec![
            ("class", Arc::new(StringArray::from(vec!["STAR  ", "qso", "GALAXY"])) as ArrayRef),
            ("z", Arc::new(Float64Array::from(vec![Some(0.0), None, Some(0.5)])) as ArrayRef),
            ("z_err", Arc::new(Float64Array::from(vec![0.1, 0.1, 0.1])) as ArrayRef),
        ],
    );

    let reader = SurveyReader::open(dir.path())?;
    let catalog: SpectroscopicCatalog = reader.load_table()?;
    assert_eq!(
        catalog.class(),
        &[SpectralClass::Star, SpectralClass::Qso, SpectralClass::Galaxy]
    );
    assert!(catalog.redshift()[1].is_nan());
    Ok(())
}

#[test]
fn test_load_array_rows_with_mask() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    let survey = write_bundle(dir.path(), 30);
    let reader = SurveyReader::open_with_config(dir.path(), small_reader_config())?;

    // Spans several row groups and batches
    let mask = RowMask::from_indices(30, &[0, 1, 2, 6, 7, 15, 29])?;
    let subset = reader.load_array_rows(&mask)?;
    assert_eq!(subset, survey.spectra().slice_rows(&mask)?);
    Ok(())
}

#[test]
fn test_load_array_rows_keeps_requested_order() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    let survey = write_bundle(dir.path(), 30);
    let reader = SurveyReader::open(dir.path())?;

    let rows = vec![21, 3, 21, 9];
    let subset = reader.load_array_rows(&rows)?;
    assert_eq!(subset.num_rows(), 4);
    assert_eq!(subset, survey.spectra().slice_rows(&rows)?);
    Ok(())
}

#[test]
fn test_load_array_rows_empty_and_invalid() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    write_bundle(dir.path(), 10);
    let reader = SurveyReader::open(dir.path())?;

    let empty = reader.load_array_rows(&RowMask::none(10))?;
    assert_eq!(empty.num_rows(), 0);
    assert_eq!(empty.num_pixels(), 12);

    assert!(matches!(
        reader.load_array_rows(&RowMask::all(11)),
        Err(SurveyError::Shape(_))
    ));
    assert!(matches!(
        reader.load_array_rows(&vec![10]),
        Err(SurveyError::Shape(_))
    ));
    Ok(())
}

#[test]
fn test_load_table_rows() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    let survey = write_bundle(dir.path(), 20);
    let reader = SurveyReader::open(dir.path())?;

    let rows = vec![19, 0, 8];
    let photo: PhotometricCatalog = reader.load_table_rows(&rows)?;
    assert_eq!(photo, survey.photo().slice_rows(&rows)?);

    let spectro: SpectroscopicCatalog = reader.load_table_rows(&rows)?;
    assert_eq!(spectro, survey.spectro().slice_rows(&rows)?);
    Ok(())
}

#[test]
fn test_iter_batches_rows_requires_sorted_rows() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    write_bundle(dir.path(), 10);
    let reader = SurveyReader::open(dir.path())?;

    assert!(matches!(
        reader.iter_batches_rows(DatasetId::Spectra, &[3, 1]),
        Err(SurveyError::InvalidData(_))
    ));
    assert!(matches!(
        reader.iter_batches_rows(DatasetId::Spectra, &[2, 2]),
        Err(SurveyError::InvalidData(_))
    ));

    let rows: usize = reader
        .iter_batches_rows(DatasetId::PhotoCatalog, &[1, 4, 5])?
        .map(|batch| batch.map(|b| b.num_rows()))
        .sum::<Result<usize, _>>()?;
    assert_eq!(rows, 3);
    Ok(())
}

#[test]
fn test_read_all_batches() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    write_bundle(dir.path(), 12);
    let reader = SurveyReader::open_with_config(dir.path(), small_reader_config())?;

    let batches = reader.read_all_batches(DatasetId::SpectroCatalog)?;
    let total: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(total, 12);
    assert!(batches.iter().all(|b| b.num_rows() <= 5));
    Ok(())
}

#[test]
fn test_summary_without_spectra() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    let survey = write_bundle(dir.path(), 40);
    let reader = SurveyReader::open(dir.path())?;

    let summary = reader.summary()?;
    assert_eq!(summary.num_rows, 40);
    assert_eq!(summary.num_pixels, 12);
    assert_eq!(summary.class_counts, survey.spectro().class_counts());
    assert_eq!(summary.fully_masked_spectra, None);
    Ok(())
}

#[test]
fn test_consecutive_ranges() {
    assert_eq!(consecutive_ranges(&[]), Vec::<std::ops::Range<usize>>::new());
    assert_eq!(consecutive_ranges(&[0, 1, 2, 5, 7, 8]), vec![0..3, 5..6, 7..9]);
}

#[test]
fn test_dataset_id_files() {
    let names: Vec<&str> = DatasetId::ALL.iter().map(|id| id.file_name()).collect();
    assert_eq!(
        names,
        vec!["spectra.parquet", "spectro_catalog.parquet", "photo_catalog.parquet"]
    );
}

#[test]
fn test_zero_batch_size_is_rejected() -> Result<(), SurveyError> {
    let dir = tempdir()?;
    write_bundle(dir.path(), 10);

    let result = SurveyReader::open_with_config(dir.path(), ReaderConfig { batch_size: 0 });
    assert!(matches!(result, Err(SurveyError::InvalidData(_))));

    // A single-row batch still reads the whole catalog
    let reader = SurveyReader::open_with_config(dir.path(), ReaderConfig { batch_size: 1 })?;
    let photo: PhotometricCatalog = reader.load_table()?;
    assert_eq!(photo.num_rows(), 10);
    Ok(())
}
