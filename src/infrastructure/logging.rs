use std::{env, io};

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::{config::LoggingConfig, infrastructure::directories::ResolvedPaths};

static INIT: OnceCell<()> = OnceCell::new();
static GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

// Console output goes to stderr so stdout stays free for rendered results.
pub fn init_tracing(logging: &LoggingConfig, paths: &ResolvedPaths, verbose: bool) -> Result<()> {
    INIT.get_or_try_init::<_, anyhow::Error>(|| {
        let directive = filter_directive(
            &logging.level,
            verbose,
            env::var(EnvFilter::DEFAULT_ENV).ok(),
        );
        let env_filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

        let file_appender = tracing_appender::rolling::daily(&paths.logs_dir, "doc-intake.log");
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        let _ = GUARD.set(guard);

        let console_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_target(true)
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_ansi(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        tracing::debug!(logs = %paths.logs_dir.display(), %directive, "tracing initialized");
        Ok(())
    })?;
    Ok(())
}

// --verbose > RUST_LOG > LOG_LEVEL
fn filter_directive(level: &str, verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| level.to_string())
}
