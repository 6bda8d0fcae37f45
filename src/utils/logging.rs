use anyhow::Result;
use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::settings::{LogFormat, LoggingConfig, SunlightConfig};

/// `--log-level` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// File settings with the CLI level laid over them
pub fn resolve(config: &SunlightConfig, arg_log_level: Option<LogLevel>) -> LoggingConfig {
    let mut logging = config.logging.clone().unwrap_or_default();
    if let Some(level) = arg_log_level {
        logging.level = LevelFilter::from(level).to_string().to_lowercase();
    }
    logging
}

pub fn run(config: &SunlightConfig, arg_log_level: Option<LogLevel>) -> Result<()> {
    init_logging(&resolve(config, arg_log_level));
    Ok(())
}

/// Filter for `level`; an unparsable directive falls back to `info`
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(LevelFilter::INFO.to_string()))
}

/// Install the global subscriber. Logs go to stderr, stdout carries results.
/// A second call is a no-op.
pub fn init_logging(cfg: &LoggingConfig) {
    let format: Box<dyn Layer<Registry> + Send + Sync> = match cfg.format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .boxed(),
    };

    let _ = tracing_subscriber::registry()
        .with(format)
        .with(env_filter(&cfg.level))
        .try_init();
}
