use std::sync::Once;

/// Filter applied when neither the config nor `RUST_LOG` names one.
pub const DEFAULT_FILTER: &str = "info";

/// Logger setup for binaries and tests.
///
/// `env_filter` uses `env_logger` directive syntax, e.g.
/// `"stagehand_game=debug,stagehand_engine=info"`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Route output through the test harness capture instead of stderr.
    pub is_test: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, write_style: env_logger::WriteStyle::Auto, is_test: false }
    }
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Captured, uncoloured output at `trace` for the stagehand crates.
    pub fn for_tests() -> Self {
        Self {
            env_filter: Some("stagehand_engine=trace,stagehand_game=trace".to_string()),
            write_style: env_logger::WriteStyle::Never,
            is_test: true,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
///
/// Precedence for the filter: `config.env_filter`, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config
            .env_filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter).write_style(config.write_style).is_test(config.is_test);

        // Another logger may already be installed (for example by a test harness).
        if builder.try_init().is_ok() {
            log::debug!("logging initialized with `{filter}`");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::for_tests());
        init_logging(LoggingConfig::default().with_filter("warn"));
        log::trace!("still alive");
    }
}
