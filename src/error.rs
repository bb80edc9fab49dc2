//! Error types for the tablescope monitoring core.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Errors that can occur while compiling a monitor or interpreting results.
#[derive(Error, Debug)]
pub enum ScopeError {
    /// A SQL result column alias could not be decoded back into a
    /// (column, metric) pair. The alias is structural; this aborts the
    /// interpretation of the whole result set.
    #[error("could not parse metric alias '{alias}'")]
    AliasParse {
        /// The alias as it appeared in the result row.
        alias: String,
    },

    /// A decoded alias has no matching compiled metric. The query text and
    /// the compiled metric list have diverged, which indicates a bug in the
    /// build step rather than bad data.
    #[error("no compiled metric for column '{column}' and metric '{metric}' on table '{table}'")]
    MetricLookup {
        /// Table the query was compiled for.
        table: String,
        /// Column name decoded from the alias.
        column: String,
        /// Metric name decoded from the alias.
        metric: String,
    },

    /// A result row is missing one of the reserved window columns.
    #[error("malformed result row: {0}")]
    MalformedRow(String),

    /// The monitor definition fails validation before any SQL is issued.
    #[error("invalid monitor definition: {0}")]
    InvalidMonitor(String),

    /// No driver factory is registered for the configured kind.
    #[error("unknown driver kind '{kind}' (registered: {registered})")]
    UnknownDriver {
        /// The configuration discriminator that failed to resolve.
        kind: String,
        /// Comma-separated list of registered kinds, for diagnostics.
        registered: String,
    },

    /// A driver failed while describing a table or executing SQL.
    #[error("driver error: {message}")]
    Driver {
        /// Human-readable description of the failure.
        message: String,
        /// Underlying driver error, when available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ScopeError {
    /// Creates an alias parse error for the given alias.
    pub fn alias_parse(alias: impl Into<String>) -> Self {
        Self::AliasParse {
            alias: alias.into(),
        }
    }

    /// Creates a malformed row error with the given message.
    pub fn malformed_row(msg: impl Into<String>) -> Self {
        Self::MalformedRow(msg.into())
    }

    /// Creates an invalid monitor error with the given message.
    pub fn invalid_monitor(msg: impl Into<String>) -> Self {
        Self::InvalidMonitor(msg.into())
    }

    /// Creates a driver error with the given message and no source.
    pub fn driver(msg: impl Into<String>) -> Self {
        Self::Driver {
            message: msg.into(),
            source: None,
        }
    }

    /// Creates a driver error wrapping an underlying error.
    pub fn driver_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Driver {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}
