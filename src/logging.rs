//! Logging configuration using the tracing ecosystem.
//!
//! Output goes to a daily-rotated file so it never draws over the TUI.
//! The level comes from `RUST_LOG`, or from `--debug` on the command line.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "coordprep=info,warn";

/// Log level forced by `--debug`.
const DEBUG_LOG_FILTER: &str = "coordprep=debug,warn";

/// Initialize the logging system.
///
/// Logs are stored in the platform-specific local data directory:
/// - Linux: `~/.local/share/coordprep/logs/`
/// - macOS: `~/Library/Application Support/coordprep/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\coordprep\logs\`
///
/// With `debug_mode` set, `RUST_LOG` is ignored and debug output is enabled for
/// this crate.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// or if a global subscriber is already set.
pub fn init(debug_mode: bool) -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "coordprep.log");

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(build_filter(debug_mode));

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        debug_mode,
        "coordprep starting up"
    );
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn build_filter(debug_mode: bool) -> EnvFilter {
    if debug_mode {
        return EnvFilter::new(DEBUG_LOG_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("coordprep").join("logs"))
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("coordprep shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_has_expected_structure() {
        let dir = get_log_directory().unwrap();
        assert!(dir.ends_with("coordprep/logs"));
    }

    #[test]
    fn test_debug_filter_overrides_env() {
        let filter = build_filter(true);
        assert!(filter.to_string().contains("coordprep=debug"));
    }
}
