//! The closed catalog of metric kinds and their per-category defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::monitor::DataCategory;

/// The fixed set of statistical metrics this crate knows how to compile.
///
/// Each kind maps to exactly one aggregate SQL expression template (see
/// [`crate::metrics::templates`]) and carries a stable snake_case wire name
/// that is embedded in SQL column aliases. Adding a kind means adding a
/// template, a wire name, and a slot in the applicable default lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Fraction of non-null values.
    Completeness,
    /// Count of distinct values.
    ApproxDistinctCount,
    /// Distinct count divided by row count.
    ApproxDistinctness,
    /// Mean text length.
    MeanLength,
    /// Maximum text length.
    MaxLength,
    /// Minimum text length.
    MinLength,
    /// Standard deviation of text length.
    StdLength,
    /// Fraction of values parsing as integers.
    TextIntRate,
    /// Fraction of values parsing as decimal/exponent numbers.
    TextNumberRate,
    /// Fraction of values matching the canonical UUID shape.
    TextUuidRate,
    /// Fraction of values that are entirely whitespace.
    TextAllSpacesRate,
    /// Fraction of values spelling a null keyword (NULL, NONE, NIL, NOTHING).
    TextNullKeywordRate,
    /// Fraction of values equal to zero.
    ZeroRate,
    /// Fraction of values below zero.
    NegativeRate,
    /// Arithmetic mean.
    NumericMean,
    /// Minimum value.
    NumericMin,
    /// Maximum value.
    NumericMax,
    /// Standard deviation.
    NumericStd,
}

/// Default kinds for text columns, in compilation order.
const TEXT_DEFAULTS: [MetricKind; 12] = [
    MetricKind::Completeness,
    MetricKind::ApproxDistinctCount,
    MetricKind::ApproxDistinctness,
    MetricKind::MeanLength,
    MetricKind::MaxLength,
    MetricKind::MinLength,
    MetricKind::StdLength,
    MetricKind::TextIntRate,
    MetricKind::TextNumberRate,
    MetricKind::TextUuidRate,
    MetricKind::TextAllSpacesRate,
    MetricKind::TextNullKeywordRate,
];

/// Default kinds for numeric columns, in compilation order.
const NUMERIC_DEFAULTS: [MetricKind; 8] = [
    MetricKind::Completeness,
    MetricKind::ZeroRate,
    MetricKind::NegativeRate,
    MetricKind::ApproxDistinctness,
    MetricKind::NumericMean,
    MetricKind::NumericMin,
    MetricKind::NumericMax,
    MetricKind::NumericStd,
];

const ALL: [MetricKind; 18] = [
    MetricKind::Completeness,
    MetricKind::ApproxDistinctCount,
    MetricKind::ApproxDistinctness,
    MetricKind::MeanLength,
    MetricKind::MaxLength,
    MetricKind::MinLength,
    MetricKind::StdLength,
    MetricKind::TextIntRate,
    MetricKind::TextNumberRate,
    MetricKind::TextUuidRate,
    MetricKind::TextAllSpacesRate,
    MetricKind::TextNullKeywordRate,
    MetricKind::ZeroRate,
    MetricKind::NegativeRate,
    MetricKind::NumericMean,
    MetricKind::NumericMin,
    MetricKind::NumericMax,
    MetricKind::NumericStd,
];

impl MetricKind {
    /// Returns every known metric kind.
    pub fn all() -> &'static [MetricKind] {
        &ALL
    }

    /// Returns the default metric kinds applicable to a column of the given
    /// data category.
    ///
    /// Categories other than text and numeric yield an empty slice: the
    /// column is silently skipped rather than treated as an error.
    pub fn default_for(category: DataCategory) -> &'static [MetricKind] {
        match category {
            DataCategory::Text => &TEXT_DEFAULTS,
            DataCategory::Numeric => &NUMERIC_DEFAULTS,
            DataCategory::Other => &[],
        }
    }

    /// Returns the stable snake_case wire name for this kind.
    ///
    /// These names appear inside SQL column aliases and in serialized
    /// metrics; they must never change for a given variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Completeness => "completeness",
            MetricKind::ApproxDistinctCount => "approx_distinct_count",
            MetricKind::ApproxDistinctness => "approx_distinctness",
            MetricKind::MeanLength => "mean_length",
            MetricKind::MaxLength => "max_length",
            MetricKind::MinLength => "min_length",
            MetricKind::StdLength => "std_length",
            MetricKind::TextIntRate => "text_int_rate",
            MetricKind::TextNumberRate => "text_number_rate",
            MetricKind::TextUuidRate => "text_uuid_rate",
            MetricKind::TextAllSpacesRate => "text_all_spaces_rate",
            MetricKind::TextNullKeywordRate => "text_null_keyword_rate",
            MetricKind::ZeroRate => "zero_rate",
            MetricKind::NegativeRate => "negative_rate",
            MetricKind::NumericMean => "numeric_mean",
            MetricKind::NumericMin => "numeric_min",
            MetricKind::NumericMax => "numeric_max",
            MetricKind::NumericStd => "numeric_std",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known metric kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetricKind(pub String);

impl fmt::Display for UnknownMetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown metric kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownMetricKind {}

impl FromStr for MetricKind {
    type Err = UnknownMetricKind;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ALL.iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownMetricKind(s.to_string()))
    }
}
