//! ---
//! agri_section: "01-core-functionality"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Shared primitives and utilities for the client core."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
//! Tracing bootstrap for the client shell.
//!
//! The shell draws on the alternate screen, so the terminal is never a log
//! sink: everything goes to a rolling daily file under the configured log
//! directory, for reading after the session ends.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

const LOG_ENV: &str = "AGRISMART_LOG";
const DEFAULT_PREFIX: &str = "agrismart";

// Keeps the non-blocking writer alive for the process lifetime.
static WORKER_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// Encoding of the session log file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    /// Human-readable lines, the default for a client session log.
    #[default]
    Pretty,
    /// One JSON object per line, for log ingestion.
    StructuredJson,
}

fn filter_from_env() -> EnvFilter {
    if let Ok(directive) = std::env::var(LOG_ENV) {
        match EnvFilter::try_new(&directive) {
            Ok(filter) => return filter,
            Err(err) => {
                eprintln!("invalid {LOG_ENV} directive ({err}); falling back to info");
            }
        }
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing with a rolling daily file sink.
///
/// The filter honours `AGRISMART_LOG` first, then `RUST_LOG`, defaulting
/// to `info`. Safe to call more than once; only the first call installs
/// the subscriber.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    std::fs::create_dir_all(&config.directory)
        .with_context(|| format!("creating log directory {}", config.directory.display()))?;
    let prefix = config.file_prefix.as_deref().unwrap_or(DEFAULT_PREFIX);
    let appender = tracing_appender::rolling::daily(&config.directory, format!("{prefix}.log"));
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = WORKER_GUARD.set(guard);

    let file_layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::StructuredJson => fmt::layer()
            .with_target(true)
            .json()
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter_from_env())
        .with(file_layer)
        .try_init()
        .ok();

    info!(log_dir = %config.directory.display(), format = ?config.format, "tracing initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn init_creates_the_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            directory: dir.path().join("logs"),
            format: LogFormat::Pretty,
            file_prefix: Some("shell".to_owned()),
        };
        init_tracing(&config).unwrap();
        assert!(dir.path().join("logs").is_dir());

        // A second call must not fail once the subscriber is installed.
        init_tracing(&config).unwrap();
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested: PathBuf = dir.path().join("a").join("b");
        let config = LoggingConfig {
            directory: nested.clone(),
            format: LogFormat::StructuredJson,
            file_prefix: None,
        };
        init_tracing(&config).unwrap();
        assert!(nested.is_dir());
    }
}
