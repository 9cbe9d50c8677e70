//! # Structured Logging Module
//!
//! Console logging through `tracing-subscriber`, with optional per-channel log
//! files. Library code logs on two channels, expressed as tracing targets:
//!
//! - [`CACHE_CHANNEL`] (`cache`): driver selection and backend failures
//! - [`HTTP_CHANNEL`] (`http`): retries and every failed request
//!
//! When a log directory is configured each channel is also written to
//! `<log_dir>/<channel>.log`.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::Utc;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Tracing target for cache driver and coordinator events.
pub const CACHE_CHANNEL: &str = "cache";

/// Tracing target for HTTP client events.
pub const HTTP_CHANNEL: &str = "http";

const CHANNELS: [&str; 2] = [CACHE_CHANNEL, HTTP_CHANNEL];

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();
/// Keeps the non-blocking file writers flushing for the process lifetime.
static FILE_GUARDS: OnceLock<Vec<WorkerGuard>> = OnceLock::new();

/// Logging setup options
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Explicit filter directive (e.g. `info,http=debug`); falls back to
    /// `RUST_LOG`, then to the environment default.
    pub level: Option<String>,
    /// Directory for per-channel log files
    pub log_dir: Option<PathBuf>,
}

/// Initialize structured logging. Safe to call more than once; only the
/// first call installs a subscriber.
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let directive = config
            .level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| get_log_level(&environment).to_string());

        let console = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stdout()))
            .with_filter(EnvFilter::new(directive));

        let mut guards = Vec::new();
        let channel_layers = config
            .log_dir
            .as_deref()
            .map(|dir| channel_file_layers(dir, &mut guards));

        let registry = tracing_subscriber::registry()
            .with(channel_layers)
            .with(console);

        if registry.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - keeping existing one");
        }

        let _ = FILE_GUARDS.set(guards);

        tracing::info!(
            environment = %environment,
            log_dir = ?config.log_dir,
            started_at = %Utc::now().to_rfc3339(),
            "Structured logging initialized"
        );
    });
}

type BoxedLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

fn channel_file_layers(dir: &Path, guards: &mut Vec<WorkerGuard>) -> Vec<BoxedLayer> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Failed to create log directory {}: {e}", dir.display());
        return Vec::new();
    }

    CHANNELS
        .iter()
        .map(|channel| {
            let appender = tracing_appender::rolling::never(dir, format!("{channel}.log"));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            guards.push(guard);

            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_filter(Targets::new().with_target(*channel, Level::DEBUG))
                .boxed()
        })
        .collect()
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("SGW_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}
