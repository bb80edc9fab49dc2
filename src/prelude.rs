//! Prelude for commonly used types and traits in tablescope.

pub use crate::compiler::{CompiledQuery, MetricCompiler};
pub use crate::drivers::{Driver, DriverConfig, DriverRegistry, ResultSet};
pub use crate::error::{Result, ScopeError};
pub use crate::logging::LogConfig;
pub use crate::metrics::{Metric, MetricDataPoint, MetricKind};
pub use crate::monitor::{ColumnDescriptor, DataCategory, MonitorDefinition, TableMetricsMonitor};
