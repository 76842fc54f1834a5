//! Structured Logger
//!
//! Wraps `tracing` with a console layer (pretty or JSON), an optional
//! daily-rolling NDJSON file, and environment-based level control.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logger settings, usually taken from the `logging` config section.
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
    /// Directory for `hireforge.log.YYYY-MM-DD`. `None` disables file output.
    pub dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            dir: None,
        }
    }
}

/// Initialize the global structured logger.
///
/// `RUST_LOG` overrides `settings.level`. Calling this twice is harmless;
/// the second call leaves the first subscriber in place.
pub fn init_logger(settings: &LogSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let file_layer = settings.dir.as_ref().map(|dir| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "hireforge.log");
        fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_ansi(false)
    });

    let json_console = settings.json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stdout)
    });

    let pretty_console = (!settings.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_ansi(true)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_console)
        .with(pretty_console)
        .with(file_layer)
        .try_init();
}
