use super::mask::RowMask;
use crate::error::SurveyError;

/// A subset of rows: either a boolean mask or an explicit index list.
///
/// Masks select in ascending row order. Index lists select in the order
/// given and may repeat rows.
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    /// Rows where the mask is true
    Mask(&'a RowMask),
    /// Rows at these positions, in this order
    Indices(&'a [usize]),
}

impl<'a> Selection<'a> {
    /// Resolve the selection to row indices, validating it against `num_rows`.
    ///
    /// A mask of the wrong length or an index `>= num_rows` is a
    /// [`SurveyError::Shape`]; an empty selection is not an error.
    pub fn resolve(&self, num_rows: usize) -> Result<Vec<usize>, SurveyError> {
        match self {
            Selection::Mask(mask) => {
                mask.ensure_len(num_rows)?;
                Ok(mask.indices())
            }
            Selection::Indices(indices) => {
                if let Some(&bad) = indices.iter().find(|&&i| i >= num_rows) {
                    return Err(SurveyError::Shape(format!(
                        "row index {bad} out of range for {num_rows} rows"
                    )));
                }
                Ok(indices.to_vec())
            }
        }
    }
}

impl<'a> From<&'a RowMask> for Selection<'a> {
    fn from(mask: &'a RowMask) -> Self {
        Selection::Mask(mask)
    }
}

impl<'a> From<&'a [usize]> for Selection<'a> {
    fn from(indices: &'a [usize]) -> Self {
        Selection::Indices(indices)
    }
}

impl<'a> From<&'a Vec<usize>> for Selection<'a> {
    fn from(indices: &'a Vec<usize>) -> Self {
        Selection::Indices(indices.as_slice())
    }
}

/// Row-aligned data that can be narrowed to a subset of its rows.
pub trait SliceRows: Sized {
    /// Number of rows
    fn num_rows(&self) -> usize;

    /// Copy out the selected rows, preserving column semantics and selection order.
    fn slice_rows<'a>(&self, selection: impl Into<Selection<'a>>) -> Result<Self, SurveyError>;
}
