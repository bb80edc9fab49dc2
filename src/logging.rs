//! Logging configuration for tablescope.
//!
//! Monitoring runs can compile large SQL texts and touch many rows, so the
//! noisier log sites are gated behind explicit switches.

use tracing::Level;

/// Logging configuration for monitor runs.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level for tablescope components.
    pub base_level: Level,
    /// Whether to log compiled SQL text.
    pub log_compiled_sql: bool,
    /// Whether to log per-row interpretation details.
    pub log_row_details: bool,
    /// Maximum length for logged SQL before truncation.
    pub max_sql_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_compiled_sql: false,
            log_row_details: false,
            max_sql_length: 512,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging a monitor.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_compiled_sql: true,
            log_row_details: true,
            max_sql_length: 4096,
        }
    }

    /// Creates a minimal configuration for production with lowest overhead.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_compiled_sql: false,
            log_row_details: false,
            max_sql_length: 256,
        }
    }

    /// Returns the SQL text prepared for logging, or `None` when compiled
    /// SQL logging is disabled.
    pub fn sql_for_log(&self, sql: &str) -> Option<String> {
        if self.log_compiled_sql {
            Some(truncate_field(sql, self.max_sql_length))
        } else {
            None
        }
    }
}

/// Truncates a string to at most `max_length` characters, cutting on a
/// codepoint boundary.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    match value.char_indices().nth(max_length) {
        None => value.to_string(),
        Some((idx, _)) => {
            let truncated = &value[..idx];
            format!("{truncated}...(truncated)")
        }
    }
}

/// Utilities for setting up structured logging.
pub mod setup {
    use tracing::Level;

    /// Configuration for tablescope's logging setup.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for the application.
        pub level: Level,
        /// Log level for tablescope components specifically.
        pub scope_level: Level,
        /// Whether to use JSON output format.
        pub json_format: bool,
        /// Environment filter override.
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                scope_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for production use.
        pub fn production() -> Self {
            Self {
                level: Level::WARN,
                scope_level: Level::INFO,
                json_format: true,
                env_filter: None,
            }
        }

        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                scope_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            if let Some(ref filter) = self.env_filter {
                filter.clone()
            } else {
                format!(
                    "{},tablescope={}",
                    self.level.as_str().to_lowercase(),
                    self.scope_level.as_str().to_lowercase()
                )
            }
        }
    }

    /// Initializes structured logging.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use tablescope::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::development()).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer().json().boxed()
        } else {
            tracing_subscriber::fmt::layer().boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();

        Ok(())
    }
}
