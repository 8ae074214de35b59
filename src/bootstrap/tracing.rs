//! Tracing configuration for Pantry
//!
//! ## Behavior / 行为
//!
//! - **Environment filter**: respects `RUST_LOG`, with sensible defaults
//! - **stderr**: always on, stdout is left to command output
//! - **File**: non-blocking writer when a log directory is configured

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// - **Development**: debug level for the app crates
/// - **Production**: info level
/// - HTTP internals are capped at warn either way
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        if is_dev { "debug" } else { "info" }.to_string(),
        "reqwest=warn".to_string(),
        "hyper=warn".to_string(),
        "hyper_util=warn".to_string(),
        "rustls=warn".to_string(),
        if is_dev { "pt_infra=debug" } else { "pt_infra=info" }.to_string(),
    ]
}

/// Initialize the tracing subscriber.
///
/// Call once from `main`, before anything logs. `log_dir` enables the file
/// layer; an empty path means stderr only.
///
/// ## Errors / 错误
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(log_dir: &Path) -> anyhow::Result<()> {
    let is_dev = is_development();

    // Step 1: environment filter, overridable with RUST_LOG
    let filter_directives = build_filter_directives(is_dev);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    // Step 2: writers
    let console_writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let file_writer = if log_dir.as_os_str().is_empty() {
        None
    } else {
        match build_file_writer(log_dir) {
            Ok(writer) => Some(writer),
            Err(err) => {
                eprintln!("Failed to initialize file logging, falling back to stderr: {err}");
                None
            }
        }
    };

    // Step 3: fmt layers
    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let console_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(console_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    // Step 4: register the global subscriber
    registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(log_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "pantry.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
