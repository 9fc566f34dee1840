use super::*;
use arrow::datatypes::{DataType, Field, Schema};

#[test]
fn test_spectra_schema_creation() {
    let schema = create_spectra_schema(4603);
    assert_eq!(schema.fields().len(), 2);

    let flux = schema.field_with_name(columns::FLUX).unwrap();
    match flux.data_type() {
        DataType::FixedSizeList(item, width) => {
            assert_eq!(*width, 4603);
            assert_eq!(item.data_type(), &DataType::Float32);
        }
        other => panic!("unexpected flux type {other:?}"),
    }
    assert!(validate_spectra(&schema).is_ok());
}

#[test]
fn test_spectro_catalog_extra_columns() {
    let schema = create_spectro_catalog_schema(&["snr", "vdisp"]);
    assert_eq!(schema.fields().len(), 5);
    assert_eq!(
        schema.field_with_name("snr").unwrap().data_type(),
        &DataType::Float64
    );
    assert!(validate_spectro_catalog(&schema).is_ok());
}

#[test]
fn test_unit_metadata() {
    let schema = create_photo_catalog_schema();
    let mag = schema.field_with_name(columns::MAG).unwrap();
    assert_eq!(mag.metadata().get("unit").unwrap(), "mag");
    assert!(validate_photo_catalog(&schema).is_ok());
}

#[test]
fn test_missing_column_is_schema_error() {
    let schema = Schema::new(vec![Field::new(columns::CLASS, DataType::Utf8, false)]);
    let err = validate_spectro_catalog(&schema).unwrap_err();
    assert!(matches!(err, crate::SurveyError::Schema(_)));
    assert!(err.to_string().contains("z"));
}

#[test]
fn test_mistyped_column_is_schema_error() {
    let schema = Schema::new(vec![
        Field::new(columns::MAG, DataType::Float64, false),
        Field::new(columns::EXTINCTION, DataType::Float64, false),
    ]);
    assert!(matches!(
        validate_photo_catalog(&schema),
        Err(crate::SurveyError::Schema(_))
    ));
}
