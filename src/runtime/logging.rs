use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, default_log_path};

/// Route `tracing` output to a log file; the terminal belongs to the TUI.
///
/// `LUMINA_LOG` takes precedence over `log.level`. Without a usable log path
/// nothing is installed and events are discarded.
pub fn init_logging(settings: &LogSettings) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    let Some(path) = settings.file.clone().or_else(default_log_path) else {
        return Ok(None);
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_env("LUMINA_LOG")
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    Ok(Some(path))
}
