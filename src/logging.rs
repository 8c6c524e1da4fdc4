//! Logging setup: `tracing` to a log file beside the settings file.
//!
//! Release builds run without a console, so stderr is only the fallback when
//! the log file cannot be opened. `RUST_LOG` overrides the default `info`
//! filter.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::model::constants::LOG_FILENAME;

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `<dir>/reticle.log`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(dir: &Path) {
    let log_path = dir.join(LOG_FILENAME);
    let file = fs::create_dir_all(dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });

    match file {
        Ok(file) => {
            let file_layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true);
            if tracing_subscriber::registry()
                .with(file_layer)
                .with(filter())
                .try_init()
                .is_ok()
            {
                tracing::info!(log_file = ?log_path, "Logging initialized");
            }
        }
        Err(e) => {
            // No subscriber yet, so this one goes straight to stderr
            eprintln!("Failed to open log file {:?}: {}, using stderr", log_path, e);
            init_stderr_only();
        }
    }
}

/// Fallback: stderr only.
pub fn init_stderr_only() {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter())
        .try_init();
}
