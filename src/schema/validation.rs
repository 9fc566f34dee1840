use arrow::datatypes::{DataType, Schema};

use super::columns;
use crate::error::SurveyError;

/// Broad type families accepted for each required column.
#[derive(Debug, Clone, Copy)]
enum Kind {
    FloatList,
    Text,
    Float,
}

impl Kind {
    fn accepts(self, data_type: &DataType) -> bool {
        match self {
            Kind::FloatList => match data_type {
                DataType::FixedSizeList(item, _)
                | DataType::List(item)
                | DataType::LargeList(item) => {
                    matches!(item.data_type(), DataType::Float32 | DataType::Float64)
                }
                _ => false,
            },
            Kind::Text => matches!(data_type, DataType::Utf8 | DataType::LargeUtf8),
            Kind::Float => data_type.is_numeric(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Kind::FloatList => "list of Float32/Float64",
            Kind::Text => "Utf8",
            Kind::Float => "numeric",
        }
    }
}

fn require(schema: &Schema, required: &[(&str, Kind)], file: &str) -> Result<(), SurveyError> {
    for (name, kind) in required {
        let field = schema.field_with_name(name).map_err(|_| {
            SurveyError::Schema(format!("{file}: missing required column '{name}'"))
        })?;
        if !kind.accepts(field.data_type()) {
            return Err(SurveyError::Schema(format!(
                "{file}: column '{name}' has type {:?}, expected {}",
                field.data_type(),
                kind.describe()
            )));
        }
    }
    Ok(())
}

/// Checks that a schema can be read as `spectra.parquet`.
pub fn validate_spectra(schema: &Schema) -> Result<(), SurveyError> {
    require(
        schema,
        &[(columns::FLUX, Kind::FloatList), (columns::IVAR, Kind::FloatList)],
        "spectra",
    )
}

/// Checks that a schema can be read as `spectro_catalog.parquet`.
pub fn validate_spectro_catalog(schema: &Schema) -> Result<(), SurveyError> {
    require(
        schema,
        &[
            (columns::CLASS, Kind::Text),
            (columns::REDSHIFT, Kind::Float),
            (columns::REDSHIFT_ERR, Kind::Float),
        ],
        "spectro_catalog",
    )
}

/// Checks that a schema can be read as `photo_catalog.parquet`.
pub fn validate_photo_catalog(schema: &Schema) -> Result<(), SurveyError> {
    require(
        schema,
        &[
            (columns::MAG, Kind::FloatList),
            (columns::EXTINCTION, Kind::FloatList),
        ],
        "photo_catalog",
    )
}
