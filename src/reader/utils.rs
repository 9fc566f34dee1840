use arrow::array::{
    Array, ArrayRef, FixedSizeListArray, Float32Array, Float64Array, LargeListArray,
    LargeStringArray, ListArray, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::dataset::SpectralClass;
use crate::error::SurveyError;

/// Get a required column by name.
pub(super) fn get_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a ArrayRef, SurveyError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| SurveyError::Schema(format!("missing required column '{name}'")))
}

/// Values of one row of a list column, whatever the list flavor.
fn list_row(col: &dyn Array, name: &str, row: usize) -> Result<ArrayRef, SurveyError> {
    if col.is_null(row) {
        return Err(SurveyError::InvalidData(format!(
            "row {row}: null value in list column '{name}'"
        )));
    }
    let values = match col.data_type() {
        DataType::FixedSizeList(_, _) => col
            .as_any()
            .downcast_ref::<FixedSizeListArray>()
            .map(|list| list.value(row)),
        DataType::List(_) => col
            .as_any()
            .downcast_ref::<ListArray>()
            .map(|list| list.value(row)),
        DataType::LargeList(_) => col
            .as_any()
            .downcast_ref::<LargeListArray>()
            .map(|list| list.value(row)),
        other => {
            return Err(SurveyError::Schema(format!(
                "'{name}' is {other:?}, expected a list column"
            )))
        }
    };
    values.ok_or_else(|| SurveyError::Schema(format!("'{name}' could not be read as a list")))
}

/// Append every row of a float list column to `out` as f32, row-major.
///
/// Every row must hold exactly `width` values. Null items become NaN.
pub(super) fn append_float_rows(
    col: &dyn Array,
    name: &str,
    width: usize,
    out: &mut Vec<f32>,
) -> Result<(), SurveyError> {
    out.reserve(col.len() * width);
    for row in 0..col.len() {
        let values = list_row(col, name, row)?;
        if values.len() != width {
            return Err(SurveyError::Shape(format!(
                "row {row}: '{name}' has {} values, expected {width}",
                values.len()
            )));
        }
        if let Some(floats) = values.as_any().downcast_ref::<Float32Array>() {
            out.extend(floats.iter().map(|v| v.unwrap_or(f32::NAN)));
        } else if let Some(doubles) = values.as_any().downcast_ref::<Float64Array>() {
            out.extend(doubles.iter().map(|v| v.map(|d| d as f32).unwrap_or(f32::NAN)));
        } else {
            return Err(SurveyError::Schema(format!(
                "'{name}' items are {:?}, expected Float32 or Float64",
                values.data_type()
            )));
        }
    }
    Ok(())
}

/// Append a numeric column to `out` as f64. Null entries become NaN.
pub(super) fn append_f64(
    col: &ArrayRef,
    name: &str,
    out: &mut Vec<f64>,
) -> Result<(), SurveyError> {
    if !col.data_type().is_numeric() {
        return Err(SurveyError::Schema(format!(
            "'{name}' is {:?}, expected a numeric column",
            col.data_type()
        )));
    }
    let converted = cast(col, &DataType::Float64)?;
    let doubles = converted
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| SurveyError::Schema(format!("'{name}' could not be read as Float64")))?;
    out.extend(doubles.iter().map(|v| v.unwrap_or(f64::NAN)));
    Ok(())
}

/// Parse a Utf8/LargeUtf8 class column and append it to `out`.
pub(super) fn append_classes(
    col: &ArrayRef,
    name: &str,
    out: &mut Vec<SpectralClass>,
) -> Result<(), SurveyError> {
    let parse = |row: usize, value: Option<&str>| -> Result<SpectralClass, SurveyError> {
        value
            .ok_or_else(|| SurveyError::Schema(format!("row {row}: null value in '{name}'")))?
            .parse()
    };
    if let Some(strings) = col.as_any().downcast_ref::<StringArray>() {
        for (row, value) in strings.iter().enumerate() {
            out.push(parse(row, value)?);
        }
    } else if let Some(strings) = col.as_any().downcast_ref::<LargeStringArray>() {
        for (row, value) in strings.iter().enumerate() {
            out.push(parse(row, value)?);
        }
    } else {
        return Err(SurveyError::Schema(format!(
            "'{name}' is {:?}, expected Utf8",
            col.data_type()
        )));
    }
    Ok(())
}

/// Collapse ascending unique row indices into consecutive ranges.
pub(super) fn consecutive_ranges(sorted: &[usize]) -> Vec<std::ops::Range<usize>> {
    let mut ranges: Vec<std::ops::Range<usize>> = Vec::new();
    for &i in sorted {
        match ranges.last_mut() {
            Some(last) if last.end == i => last.end += 1,
            _ => ranges.push(i..i + 1),
        }
    }
    ranges
}
