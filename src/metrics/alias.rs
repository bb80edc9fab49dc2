//! Encoding of (column, metric kind) identity into flat SQL column aliases.
//!
//! Many logical metrics are multiplexed into one physical query; the alias
//! is the only thing carrying per-metric identity through the flat result
//! row, so decode must invert encode exactly.

use crate::error::{Result, ScopeError};
use crate::metrics::kind::MetricKind;

/// Separator between the column part and the metric part of an alias.
///
/// Column and metric names must not themselves contain this substring;
/// a column named `a__b` would decode into three parts and fail.
pub const SEPARATOR: &str = "__";

/// Encodes a column name and metric kind into a SQL column alias.
///
/// The column is lowercased so that the alias survives engines that fold
/// unquoted identifiers.
pub fn encode(column: &str, kind: MetricKind) -> String {
    format!("{}{SEPARATOR}{}", column.to_lowercase(), kind.as_str())
}

/// Decodes an alias back into its `(column, metric_name)` parts.
///
/// Succeeds only when splitting on the separator yields exactly two
/// non-empty parts. Result-set drivers commonly uppercase column names, so
/// the alias is lowercased before splitting.
pub fn decode(alias: &str) -> Result<(String, String)> {
    let lowered = alias.to_lowercase();
    let parts: Vec<&str> = lowered.split(SEPARATOR).collect();

    match parts.as_slice() {
        [column, metric] if !column.is_empty() && !metric.is_empty() => {
            Ok((column.to_string(), metric.to_string()))
        }
        _ => Err(ScopeError::alias_parse(alias)),
    }
}

/// Returns true when a result-row key looks like a metric alias rather than
/// one of the reserved window columns.
pub fn is_metric_alias(key: &str) -> bool {
    key.contains(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_lowercases_the_column() {
        assert_eq!(
            encode("Status", MetricKind::Completeness),
            "status__completeness"
        );
    }

    #[test]
    fn decode_splits_exactly_two_parts() {
        let (column, metric) = decode("status__approx_distinct_count").unwrap();
        assert_eq!(column, "status");
        assert_eq!(metric, "approx_distinct_count");
    }

    #[test]
    fn decode_uppercased_alias() {
        let (column, metric) = decode("STATUS__COMPLETENESS").unwrap();
        assert_eq!(column, "status");
        assert_eq!(metric, "completeness");
    }

    #[test]
    fn decode_rejects_missing_separator() {
        assert!(matches!(
            decode("window_start"),
            Err(ScopeError::AliasParse { .. })
        ));
    }

    #[test]
    fn decode_rejects_empty_parts() {
        assert!(decode("__completeness").is_err());
        assert!(decode("status__").is_err());
        assert!(decode("__").is_err());
    }

    #[test]
    fn decode_rejects_extra_separator() {
        // A column containing the separator is indistinguishable from a
        // three-part alias; decode refuses rather than guessing.
        assert!(decode("a__b__completeness").is_err());
    }

    #[test]
    fn reserved_keys_are_not_aliases() {
        assert!(!is_metric_alias("WINDOW_START"));
        assert!(!is_metric_alias("ROW_COUNT"));
        assert!(is_metric_alias("status__completeness"));
    }
}
