//! # Tablescope - Table Metrics Monitoring for Rust
//!
//! Tablescope compiles a fixed catalog of per-column statistical metrics
//! (completeness, distinctness, length and numeric distributions,
//! pattern-match rates) into a single aggregate SQL query bucketed into
//! hourly windows, then decodes the query's flat tabular result back into
//! structured per-column, per-metric time series.
//!
//! The crate is the compilation and interpretation core of a table
//! monitoring pipeline: connection management, scheduling, persistence, and
//! reporting live in external collaborators that implement or consume the
//! [`drivers::Driver`] capability interface.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tablescope::prelude::*;
//!
//! # async fn example(driver: &dyn Driver) -> Result<()> {
//! let definition = MonitorDefinition::new("analytics.public.orders", "created_at");
//! let monitor = TableMetricsMonitor::new(definition);
//!
//! // describe_table -> build -> execute_sql -> interpret, one fresh
//! // compiled query per cycle
//! let metrics = monitor.run(driver).await?;
//!
//! for metric in &metrics {
//!     println!(
//!         "{}.{} {}: {} windows",
//!         metric.table_name,
//!         metric.column_name,
//!         metric.kind,
//!         metric.values.len()
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## How one query carries many metrics
//!
//! Every (column, metric kind) pair is rendered as one `expr AS alias`
//! select-list fragment, where the alias encodes the pair's identity as
//! `lowercase(column) + "__" + metric_name`. Interpretation splits each
//! result-row key on that separator to route cell values back to their
//! metric; the three reserved keys `WINDOW_START`, `WINDOW_END`, and
//! `ROW_COUNT` carry the window itself.
//!
//! Lower-level entry points are available when the orchestration in
//! [`monitor::TableMetricsMonitor`] does not fit:
//!
//! ```rust
//! use tablescope::compiler::MetricCompiler;
//! use tablescope::monitor::{ColumnDescriptor, DataCategory, MonitorDefinition};
//!
//! # fn example() -> tablescope::error::Result<()> {
//! let definition = MonitorDefinition::new("orders", "created_at");
//! let columns = vec![ColumnDescriptor::new("status", DataCategory::Text)];
//!
//! let compiled = MetricCompiler::build(&definition, &columns)?;
//! assert!(compiled.sql().contains("AS status__completeness"));
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod drivers;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod monitor;
pub mod prelude;
