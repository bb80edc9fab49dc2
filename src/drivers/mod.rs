//! Driver capability interface and the wire shape drivers must return.
//!
//! This core never connects to a database itself. A driver is any
//! collaborator that can describe a table's columns and execute the
//! compiled SQL, returning rows in the flat shape the compiler expects.

pub mod registry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::monitor::ColumnDescriptor;

pub use registry::{DriverFactory, DriverRegistry};

/// One flat result row, keyed by result column name.
///
/// Keys are the uppercase reserved columns `WINDOW_START`, `WINDOW_END`,
/// `ROW_COUNT` plus one key per compiled metric alias.
pub type Row = serde_json::Map<String, Value>;

/// The tabular result of executing a compiled metric query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Result rows, one per hourly window.
    pub rows: Vec<Row>,
}

/// Capability interface the monitoring core consumes.
///
/// Implementations own connection management, retries, and timeouts; the
/// core only ever calls these two operations.
#[async_trait]
pub trait Driver: Send + Sync + std::fmt::Debug {
    /// Returns the ordered column schema of a table.
    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// Executes the given SQL and returns its flat rows.
    async fn execute_sql(&self, sql: &str) -> Result<ResultSet>;
}

/// Connection-independent driver configuration.
///
/// `kind` is the discriminator the [`DriverRegistry`] resolves; `database`
/// and `schema` are the defaults used to qualify bare table names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Registry discriminator, e.g. `"snowflake"`.
    pub kind: String,
    /// Default database for unqualified table names.
    pub database: String,
    /// Default schema for unqualified table names.
    pub schema: String,
}

impl DriverConfig {
    /// Creates a driver configuration.
    pub fn new(
        kind: impl Into<String>,
        database: impl Into<String>,
        schema: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            database: database.into(),
            schema: schema.into(),
        }
    }

    /// Splits a possibly-qualified table name into
    /// `(database, schema, table)`, filling missing parts from this
    /// configuration.
    ///
    /// Accepts `table`, `schema.table`, and `database.schema.table`.
    pub fn fqtn(&self, table: &str) -> (String, String, String) {
        let mut parts: Vec<&str> = table.split('.').collect();

        let table_name = parts.pop().unwrap_or_default().to_string();
        let schema = parts
            .pop()
            .map(str::to_string)
            .unwrap_or_else(|| self.schema.clone());
        let database = parts
            .pop()
            .map(str::to_string)
            .unwrap_or_else(|| self.database.clone());

        (database, schema, table_name)
    }
}
