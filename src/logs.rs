use tracing_subscriber::EnvFilter;

/// The filter used when neither `$GOLDBERRIES_LOG` nor `$RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Reads the log filter from `$GOLDBERRIES_LOG`, falling back to `$RUST_LOG`.
pub fn log_filter() -> EnvFilter {
	EnvFilter::try_from_env("GOLDBERRIES_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber. Calling this more than once is a no-op.
pub fn init_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(log_filter())
		.with_writer(std::io::stderr)
		.try_init();
}
