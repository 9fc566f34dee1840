use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};

use super::columns;
use super::constants::NUM_BANDS;

/// Creates a Field annotated with its physical unit
fn field_with_unit(name: &str, data_type: DataType, nullable: bool, unit: &str) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert("unit".to_string(), unit.to_string());
    Field::new(name, data_type, nullable).with_metadata(metadata)
}

/// Fixed-width list of non-null Float32 values
pub(crate) fn float32_list_type(width: usize) -> DataType {
    DataType::FixedSizeList(
        Arc::new(Field::new(columns::LIST_ITEM, DataType::Float32, true)),
        width as i32,
    )
}

/// Creates the schema of `spectra.parquet` for spectra of `num_pixels` pixels.
///
/// # Example
///
/// ```
/// use skysurvey::schema::create_spectra_schema;
///
/// let schema = create_spectra_schema(4603);
/// assert_eq!(schema.fields().len(), 2);
/// ```
pub fn create_spectra_schema(num_pixels: usize) -> Schema {
    let mut builder = SchemaBuilder::new();
    builder.push(field_with_unit(
        columns::FLUX,
        float32_list_type(num_pixels),
        false,
        "1e-17 erg/s/cm^2/Angstrom",
    ));
    builder.push(field_with_unit(
        columns::IVAR,
        float32_list_type(num_pixels),
        false,
        "1/flux^2",
    ));
    builder.finish()
}

/// Creates the schema of `spectro_catalog.parquet`.
///
/// `extra_columns` are appended as nullable Float64 columns after the
/// required `class`, `z` and `z_err` columns.
pub fn create_spectro_catalog_schema<S: AsRef<str>>(extra_columns: &[S]) -> Schema {
    let mut builder = SchemaBuilder::new();
    builder.push(Field::new(columns::CLASS, DataType::Utf8, false));
    builder.push(field_with_unit(
        columns::REDSHIFT,
        DataType::Float64,
        true,
        "dimensionless",
    ));
    builder.push(field_with_unit(
        columns::REDSHIFT_ERR,
        DataType::Float64,
        true,
        "dimensionless",
    ));
    for name in extra_columns {
        builder.push(Field::new(name.as_ref(), DataType::Float64, true));
    }
    builder.finish()
}

/// Creates the schema of `photo_catalog.parquet`.
pub fn create_photo_catalog_schema() -> Schema {
    let mut builder = SchemaBuilder::new();
    builder.push(field_with_unit(
        columns::MAG,
        float32_list_type(NUM_BANDS),
        false,
        "mag",
    ));
    builder.push(field_with_unit(
        columns::EXTINCTION,
        float32_list_type(NUM_BANDS),
        false,
        "mag",
    ));
    builder.finish()
}
