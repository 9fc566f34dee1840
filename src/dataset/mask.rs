use crate::error::SurveyError;

/// Boolean row selection over a row-aligned dataset.
///
/// A mask is a transient value: it is rebuilt whenever the predicate that
/// produced it changes, and never mutates the data it selects from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowMask {
    bits: Vec<bool>,
}

impl RowMask {
    /// Wrap an explicit vector of flags
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Mask selecting every one of `len` rows
    pub fn all(len: usize) -> Self {
        Self { bits: vec![true; len] }
    }

    /// Mask selecting none of `len` rows
    pub fn none(len: usize) -> Self {
        Self { bits: vec![false; len] }
    }

    /// Mask of length `len` selecting exactly `indices`.
    ///
    /// Fails with [`SurveyError::Shape`] if an index is out of range.
    pub fn from_indices(len: usize, indices: &[usize]) -> Result<Self, SurveyError> {
        let mut bits = vec![false; len];
        for &i in indices {
            let slot = bits.get_mut(i).ok_or_else(|| {
                SurveyError::Shape(format!("row index {i} out of range for {len} rows"))
            })?;
            *slot = true;
        }
        Ok(Self { bits })
    }

    /// Number of rows the mask covers (selected or not)
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the mask covers zero rows
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of selected rows
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Whether row `i` is selected; rows past the end are not
    pub fn get(&self, i: usize) -> bool {
        self.bits.get(i).copied().unwrap_or(false)
    }

    /// Selected row indices in ascending order
    pub fn indices(&self) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect()
    }

    /// Flags as a slice
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Iterate over the flags
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Rows selected by this mask and `other`
    pub fn and(&self, other: &RowMask) -> Result<RowMask, SurveyError> {
        self.zip_with(other, |a, b| a && b)
    }

    /// Rows selected by this mask or `other`
    pub fn or(&self, other: &RowMask) -> Result<RowMask, SurveyError> {
        self.zip_with(other, |a, b| a || b)
    }

    /// Rows not selected by this mask
    pub fn not(&self) -> RowMask {
        RowMask {
            bits: self.bits.iter().map(|b| !b).collect(),
        }
    }

    /// Whether no row is selected by both masks
    pub fn is_disjoint(&self, other: &RowMask) -> Result<bool, SurveyError> {
        self.check_len(other)?;
        Ok(!self.bits.iter().zip(&other.bits).any(|(a, b)| *a && *b))
    }

    /// Fails with [`SurveyError::Shape`] unless the mask covers exactly `rows` rows
    pub fn ensure_len(&self, rows: usize) -> Result<(), SurveyError> {
        if self.bits.len() != rows {
            return Err(SurveyError::Shape(format!(
                "mask has {} entries but the data has {} rows",
                self.bits.len(),
                rows
            )));
        }
        Ok(())
    }

    fn check_len(&self, other: &RowMask) -> Result<(), SurveyError> {
        other.ensure_len(self.bits.len())
    }

    fn zip_with(
        &self,
        other: &RowMask,
        op: impl Fn(bool, bool) -> bool,
    ) -> Result<RowMask, SurveyError> {
        self.check_len(other)?;
        Ok(RowMask {
            bits: self
                .bits
                .iter()
                .zip(&other.bits)
                .map(|(&a, &b)| op(a, b))
                .collect(),
        })
    }
}

impl From<Vec<bool>> for RowMask {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

impl FromIterator<bool> for RowMask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}
