//! Monitor definitions and the per-cycle orchestration that runs them.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::compiler::MetricCompiler;
use crate::drivers::Driver;
use crate::error::{Result, ScopeError};
use crate::logging::LogConfig;
use crate::metrics::Metric;

/// Coarse classification of a column's type, driving which metrics apply.
///
/// Drivers map their engine-specific type codes onto these categories when
/// describing a table. Anything that is neither text-like nor numeric-like
/// is `Other` and produces no metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCategory {
    /// String-valued columns.
    Text,
    /// Integer or floating-point columns.
    Numeric,
    /// Everything else (timestamps, structs, binary, ...).
    Other,
}

/// One column of a described table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name as the engine reports it.
    pub name: String,
    /// Which metric family applies to the column.
    pub data_category: DataCategory,
}

impl ColumnDescriptor {
    /// Creates a column descriptor.
    pub fn new(name: impl Into<String>, data_category: DataCategory) -> Self {
        Self {
            name: name.into(),
            data_category,
        }
    }
}

/// Operator-supplied definition of what to measure.
///
/// `columns`, `metrics`, and `where_clause` are accepted and carried so
/// that definitions round-trip, but query construction does not consult
/// them yet; the compiled query always covers every applicable column and
/// its full default metric set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorDefinition {
    /// Table to monitor, optionally qualified as `db.schema.table`.
    pub table: String,
    /// Timestamp column used for hourly windowing.
    pub timestamp_field: String,
    /// Optional subset of columns to measure (currently not applied).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    /// Optional subset of metrics to compute (currently not applied).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<String>>,
    /// Optional extra predicate (currently not applied).
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
}

impl MonitorDefinition {
    /// Creates a definition with only the required fields set.
    pub fn new(table: impl Into<String>, timestamp_field: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            timestamp_field: timestamp_field.into(),
            columns: None,
            metrics: None,
            where_clause: None,
        }
    }

    /// Checks the definition before any SQL is compiled.
    pub fn validate(&self) -> Result<()> {
        if self.table.trim().is_empty() {
            return Err(ScopeError::invalid_monitor("table must not be empty"));
        }
        if self.timestamp_field.trim().is_empty() {
            return Err(ScopeError::invalid_monitor(
                "timestamp_field must not be empty",
            ));
        }
        Ok(())
    }

    /// Short human-readable identification of the monitor.
    pub fn info(&self) -> String {
        format!("{}: table_metrics", self.table)
    }
}

/// Runs one build → execute → interpret cycle for one monitor.
///
/// Each run compiles a fresh [`crate::compiler::CompiledQuery`]; nothing is
/// shared across cycles, so monitors may run concurrently on independent
/// runners.
#[derive(Debug, Clone)]
pub struct TableMetricsMonitor {
    definition: MonitorDefinition,
    log_config: LogConfig,
}

impl TableMetricsMonitor {
    /// Creates a monitor runner for the given definition.
    pub fn new(definition: MonitorDefinition) -> Self {
        Self {
            definition,
            log_config: LogConfig::default(),
        }
    }

    /// Replaces the logging configuration for this runner.
    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Returns the definition this runner was built from.
    pub fn definition(&self) -> &MonitorDefinition {
        &self.definition
    }

    /// Executes one full monitoring cycle against the given driver.
    ///
    /// Describes the table, compiles the metric query, executes it, and
    /// interprets the flat rows back into populated metrics.
    #[instrument(skip(self, driver), fields(table = %self.definition.table))]
    pub async fn run(&self, driver: &dyn Driver) -> Result<Vec<Metric>> {
        let columns = driver.describe_table(&self.definition.table).await?;
        debug!(column_count = columns.len(), "described table");

        let mut compiled = MetricCompiler::build(&self.definition, &columns)?;
        if let Some(sql) = self.log_config.sql_for_log(compiled.sql()) {
            debug!(%sql, "compiled metric query");
        }

        let results = driver.execute_sql(compiled.sql()).await?;
        debug!(row_count = results.rows.len(), "executed metric query");
        if self.log_config.log_row_details {
            for row in &results.rows {
                debug!(columns = row.len(), "interpreting result row");
            }
        }

        compiled.interpret(&results)?;
        Ok(compiled.into_metrics())
    }
}
