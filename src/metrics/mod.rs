//! Metric entities and the catalogs they are built from.

pub mod alias;
pub mod kind;
pub(crate) mod templates;

use serde::{Deserialize, Serialize};

pub use kind::{MetricKind, UnknownMetricKind};

/// One observed value for a metric within one hourly window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDataPoint {
    /// Inclusive start of the aggregation window, as reported by the driver.
    pub window_start: String,
    /// Exclusive end of the aggregation window, as reported by the driver.
    pub window_end: String,
    /// The metric value. `None` when the raw cell failed numeric coercion;
    /// the point is still recorded so gaps remain visible.
    pub value: Option<f64>,
}

/// One (column, metric kind) pair tracked as a time series.
///
/// Metrics are created empty when a query is compiled and populated when
/// the query's results are interpreted. This core never persists them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Table the monitor was compiled against.
    pub table_name: String,
    /// Column this metric measures.
    pub column_name: String,
    /// Which statistic this series tracks.
    pub kind: MetricKind,
    /// Observed data points, one per result row mentioning this metric.
    pub values: Vec<MetricDataPoint>,
}

impl Metric {
    /// Creates an empty metric shell for a compiled query.
    pub(crate) fn shell(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        kind: MetricKind,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            kind,
            values: Vec::new(),
        }
    }

    /// The SQL column alias carrying this metric's identity through the
    /// flat result row.
    pub fn alias(&self) -> String {
        alias::encode(&self.column_name, self.kind)
    }

    /// Renders this metric's `expr AS alias` select-list fragment.
    pub fn select_fragment(&self) -> String {
        format!(
            "{} AS {}",
            templates::render(self.kind, &self.column_name),
            self.alias()
        )
    }

    /// Returns the data points whose values coerced successfully.
    pub fn nonnull_values(&self) -> Vec<&MetricDataPoint> {
        self.values.iter().filter(|p| p.value.is_some()).collect()
    }
}
