//! Aggregate SQL expression templates, one per metric kind.
//!
//! Each template carries exactly one `{}` substitution slot for the column
//! reference and evaluates to a single value per output time window. The
//! dialect is Snowflake-flavoured (`IFF`, `REGEXP_COUNT`, `TO_VARCHAR`);
//! supporting another engine means supplying a parallel template set, not
//! changing callers.

use super::kind::MetricKind;

/// Substitution slot inside a template. Regex quantifiers such as `{8}` in
/// the UUID pattern never collide with it because the slot is empty braces.
const COLUMN_SLOT: &str = "{}";

/// Returns the SQL expression template for a metric kind.
///
/// Kept as one flat table so that every kind's semantics are visible in a
/// single place.
pub(crate) fn sql_template(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Completeness => "COUNT({}) / CAST(COUNT(*) AS NUMERIC)",
        MetricKind::ApproxDistinctCount => "COUNT(DISTINCT {})",
        MetricKind::ApproxDistinctness => "COUNT(DISTINCT {}) / CAST(COUNT(*) AS NUMERIC)",
        MetricKind::MeanLength => "AVG(LENGTH({}))",
        MetricKind::MaxLength => "MAX(LENGTH({}))",
        MetricKind::MinLength => "MIN(LENGTH({}))",
        MetricKind::StdLength => "STDDEV(CAST(LENGTH({}) as double))",
        MetricKind::TextIntRate => {
            "SUM(IFF(REGEXP_COUNT(TO_VARCHAR({}), '^([-+]?[0-9]+)$', 1, 'i') != 0, 1, 0)) / CAST(COUNT(*) AS NUMERIC)"
        }
        MetricKind::TextNumberRate => {
            "SUM(IFF(REGEXP_COUNT(TO_VARCHAR({}), '^([-+]?[0-9]*[.]?[0-9]+([eE][-+]?[0-9]+)?)$', 1, 'i') != 0, 1, 0)) / CAST(COUNT(*) AS NUMERIC)"
        }
        MetricKind::TextUuidRate => {
            "SUM(IFF(REGEXP_COUNT(TO_VARCHAR({}), '^([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})$', 1, 'i') != 0, 1, 0)) / CAST(COUNT(*) AS NUMERIC)"
        }
        MetricKind::TextAllSpacesRate => {
            r"SUM(IFF(REGEXP_COUNT(TO_VARCHAR({}), '^(\\s+)$', 1, 'i') != 0, 1, 0)) / CAST(COUNT(*) AS NUMERIC)"
        }
        MetricKind::TextNullKeywordRate => {
            "SUM(IFF(UPPER({}) IN ('NULL', 'NONE', 'NIL', 'NOTHING'), 1, 0)) / CAST(COUNT(*) AS NUMERIC)"
        }
        MetricKind::ZeroRate => "SUM(IFF({} = 0, 1, 0)) / CAST(COUNT(*) AS NUMERIC)",
        MetricKind::NegativeRate => "SUM(IFF({} < 0, 1, 0)) / CAST(COUNT(*) AS NUMERIC)",
        MetricKind::NumericMean => "AVG({})",
        MetricKind::NumericMin => "MIN({})",
        MetricKind::NumericMax => "MAX({})",
        MetricKind::NumericStd => "STDDEV(CAST({} as double))",
    }
}

/// Renders the template for `kind` with the column reference substituted.
pub(crate) fn render(kind: MetricKind, column: &str) -> String {
    sql_template(kind).replacen(COLUMN_SLOT, column, 1)
}
