//! # Row Filter
//!
//! Typed predicate expressions evaluated column-wise into a [`RowMask`].
//!
//! A [`Predicate`] combines categorical equality on the class column with
//! range comparisons on numeric columns. Numeric operands are
//! [`NumericExpr`] trees, so derived columns such as a color index
//! (`g - r`) are computed on the fly before the range test.
//!
//! ## Edge policy
//!
//! - Each range bound is inclusive or exclusive exactly as given
//!   ([`Bound::Included`] / [`Bound::Excluded`]); [`Bound::Unbounded`]
//!   leaves that side open.
//! - NaN never satisfies a range, including NaN produced by a derived
//!   difference. It is treated as "no match", never as an error.
//! - `And(vec![])` selects every row, `Or(vec![])` selects none.
//!
//! ## Example
//!
//! ```rust,no_run
//! use skysurvey::dataset::{Band, SpectralClass, SurveyDataset};
//! use skysurvey::filter::{NumericExpr, Predicate};
//!
//! let survey = SurveyDataset::open("survey")?;
//! // Blue stars: class STAR and g - r < 0.3
//! let predicate = Predicate::class_equals(SpectralClass::Star)
//!     .and(Predicate::lt(NumericExpr::color(Band::G, Band::R), 0.3));
//! let mask = survey.build_mask(&predicate)?;
//! println!("{} blue stars", mask.count());
//! # Ok::<(), skysurvey::SurveyError>(())
//! ```

mod source;

#[cfg(test)]
mod tests;

pub use source::ColumnSource;

use std::fmt;
use std::ops::Bound;

use log::debug;

use crate::dataset::{Band, RowMask, SpectralClass};
use crate::error::SurveyError;

/// A numeric column addressable by predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericColumn {
    /// Spectroscopic redshift
    Redshift,
    /// Redshift error
    RedshiftErr,
    /// Magnitude in one band
    Magnitude(Band),
    /// Galactic extinction in one band
    Extinction(Band),
    /// Extra numeric column of the spectroscopic catalog
    Extra(String),
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericColumn::Redshift => f.write_str("z"),
            NumericColumn::RedshiftErr => f.write_str("z_err"),
            NumericColumn::Magnitude(band) => write!(f, "mag_{band}"),
            NumericColumn::Extinction(band) => write!(f, "extinction_{band}"),
            NumericColumn::Extra(name) => f.write_str(name),
        }
    }
}

/// A numeric value per row: a stored column or a derived difference.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericExpr {
    /// Values of a stored column
    Column(NumericColumn),
    /// Row-wise `left - right`
    Difference(Box<NumericExpr>, Box<NumericExpr>),
}

impl NumericExpr {
    /// Stored column
    pub fn column(column: NumericColumn) -> Self {
        NumericExpr::Column(column)
    }

    /// Magnitude in `band`
    pub fn magnitude(band: Band) -> Self {
        NumericExpr::Column(NumericColumn::Magnitude(band))
    }

    /// Color index `a - b`
    pub fn color(a: Band, b: Band) -> Self {
        Self::difference(Self::magnitude(a), Self::magnitude(b))
    }

    /// Extinction-corrected magnitude `mag(band) - extinction(band)`
    pub fn dereddened(band: Band) -> Self {
        Self::difference(
            Self::magnitude(band),
            NumericExpr::Column(NumericColumn::Extinction(band)),
        )
    }

    /// Row-wise `left - right`
    pub fn difference(left: NumericExpr, right: NumericExpr) -> Self {
        NumericExpr::Difference(Box::new(left), Box::new(right))
    }

    /// Evaluate to one value per row
    pub fn evaluate<S: ColumnSource + ?Sized>(&self, source: &S) -> Result<Vec<f64>, SurveyError> {
        match self {
            NumericExpr::Column(column) => source.numeric_column(column),
            NumericExpr::Difference(left, right) => {
                let left = left.evaluate(source)?;
                let right = right.evaluate(source)?;
                Ok(left.iter().zip(&right).map(|(a, b)| a - b).collect())
            }
        }
    }
}

impl fmt::Display for NumericExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericExpr::Column(column) => write!(f, "{column}"),
            NumericExpr::Difference(left, right) => write!(f, "({left} - {right})"),
        }
    }
}

impl From<NumericColumn> for NumericExpr {
    fn from(column: NumericColumn) -> Self {
        NumericExpr::Column(column)
    }
}

/// Boolean row predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Class label equals the given class
    ClassEquals(SpectralClass),
    /// Numeric expression lies within the bounds
    Range {
        /// Value tested
        expr: NumericExpr,
        /// Lower bound
        lower: Bound<f64>,
        /// Upper bound
        upper: Bound<f64>,
    },
    /// Every sub-predicate holds
    And(Vec<Predicate>),
    /// At least one sub-predicate holds
    Or(Vec<Predicate>),
    /// The sub-predicate does not hold
    Not(Box<Predicate>),
}

impl Predicate {
    /// `class == class`
    pub fn class_equals(class: SpectralClass) -> Self {
        Predicate::ClassEquals(class)
    }

    /// Arbitrary bounds on `expr`
    pub fn range(expr: impl Into<NumericExpr>, lower: Bound<f64>, upper: Bound<f64>) -> Self {
        Predicate::Range {
            expr: expr.into(),
            lower,
            upper,
        }
    }

    /// `expr > value`
    pub fn gt(expr: impl Into<NumericExpr>, value: f64) -> Self {
        Self::range(expr, Bound::Excluded(value), Bound::Unbounded)
    }

    /// `expr >= value`
    pub fn ge(expr: impl Into<NumericExpr>, value: f64) -> Self {
        Self::range(expr, Bound::Included(value), Bound::Unbounded)
    }

    /// `expr < value`
    pub fn lt(expr: impl Into<NumericExpr>, value: f64) -> Self {
        Self::range(expr, Bound::Unbounded, Bound::Excluded(value))
    }

    /// `expr <= value`
    pub fn le(expr: impl Into<NumericExpr>, value: f64) -> Self {
        Self::range(expr, Bound::Unbounded, Bound::Included(value))
    }

    /// `low <= expr <= high`
    pub fn between(expr: impl Into<NumericExpr>, low: f64, high: f64) -> Self {
        Self::range(expr, Bound::Included(low), Bound::Included(high))
    }

    /// Conjunction with another predicate, flattening nested `And`s
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Predicate::And(mut parts) => {
                parts.push(other);
                Predicate::And(parts)
            }
            first => Predicate::And(vec![first, other]),
        }
    }

    /// Disjunction with another predicate, flattening nested `Or`s
    pub fn or(self, other: Predicate) -> Self {
        match self {
            Predicate::Or(mut parts) => {
                parts.push(other);
                Predicate::Or(parts)
            }
            first => Predicate::Or(vec![first, other]),
        }
    }

    /// Negation
    pub fn negate(self) -> Self {
        Predicate::Not(Box::new(self))
    }
}

/// Whether `value` lies within the bounds. NaN never does.
pub fn within(value: f64, lower: Bound<f64>, upper: Bound<f64>) -> bool {
    if value.is_nan() {
        return false;
    }
    let above = match lower {
        Bound::Included(lo) => value >= lo,
        Bound::Excluded(lo) => value > lo,
        Bound::Unbounded => true,
    };
    let below = match upper {
        Bound::Included(hi) => value <= hi,
        Bound::Excluded(hi) => value < hi,
        Bound::Unbounded => true,
    };
    above && below
}

/// Evaluate `predicate` over every row of `source`.
///
/// The returned mask always has `source.row_count()` entries. Fails with
/// [`SurveyError::Schema`] when the predicate names a column the source
/// does not carry.
pub fn build_mask<S: ColumnSource + ?Sized>(
    source: &S,
    predicate: &Predicate,
) -> Result<RowMask, SurveyError> {
    let rows = source.row_count();
    let mask = match predicate {
        Predicate::ClassEquals(class) => {
            let labels = source.class_column()?;
            labels.iter().map(|label| label == class).collect()
        }
        Predicate::Range { expr, lower, upper } => {
            let values = expr.evaluate(source)?;
            if values.len() != rows {
                return Err(SurveyError::row_mismatch(
                    &expr.to_string(),
                    rows,
                    values.len(),
                ));
            }
            values
                .into_iter()
                .map(|v| within(v, *lower, *upper))
                .collect()
        }
        Predicate::And(parts) => {
            let mut acc = RowMask::all(rows);
            for part in parts {
                acc = acc.and(&build_mask(source, part)?)?;
            }
            acc
        }
        Predicate::Or(parts) => {
            let mut acc = RowMask::none(rows);
            for part in parts {
                acc = acc.or(&build_mask(source, part)?)?;
            }
            acc
        }
        Predicate::Not(inner) => build_mask(source, inner)?.not(),
    };
    debug!("Predicate {:?} selected {} of {} rows", predicate, mask.count(), rows);
    Ok(mask)
}
