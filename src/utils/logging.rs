//! Diagnostic logging for noice.
//!
//! The terminal belongs to the browser, so logs only ever go to a file:
//! `NOICE_LOG=<file>` enables them, `NOICE_LOG_LEVEL` sets the filter
//! (an `EnvFilter` directive, `debug` by default).

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "NOICE_LOG";
const LEVEL_ENV: &str = "NOICE_LOG_LEVEL";
const DEFAULT_LEVEL: &str = "debug";

/// Installs the file subscriber when `NOICE_LOG` is set. Does nothing otherwise.
pub fn init() {
    let Some(path) = std::env::var_os(LOG_ENV).filter(|p| !p.is_empty()) else {
        return;
    };
    let level = std::env::var(LEVEL_ENV).unwrap_or_else(|_| DEFAULT_LEVEL.into());
    if let Err(e) = init_file(Path::new(&path), &level) {
        eprintln!("[Warning] logging disabled: {}: {}", Path::new(&path).display(), e);
    }
}

fn init_file(path: &Path, level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
}
