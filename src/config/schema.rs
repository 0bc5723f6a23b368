use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lumina/config.toml` or `~/.config/lumina/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LUMINA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub catalog: CatalogSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume at startup, from 0.0 to 1.0.
    pub default_volume: f32,
    /// How long `play` may wait for a source to become ready (milliseconds).
    /// Set to 0 to wait indefinitely.
    pub ready_timeout_ms: u64,
    /// Timeout for downloading a remote source (milliseconds).
    pub fetch_timeout_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            default_volume: 0.8,
            ready_timeout_ms: 20_000,
            fetch_timeout_ms: 30_000,
            quit_fade_out_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing `H` / `L`.
    pub seek_step_seconds: u64,
    /// Volume change per `-` / `+` press.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step_seconds: 5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Name shown at the top of the sidebar.
    pub brand: String,
    /// Placeholder rendered in the header search box.
    pub search_placeholder: String,
    /// Whether the sidebar is shown at all.
    pub show_sidebar: bool,
    /// Hide the sidebar when the terminal is narrower than this.
    pub sidebar_min_width: u16,
    /// Number of tiles in the "Curated for You" row.
    pub recommendation_count: usize,
    /// Whether the cursor starts in "follow playback" mode.
    pub follow_playback: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            brand: "Lumina".to_string(),
            search_placeholder: "Search universe...".to_string(),
            show_sidebar: true,
            sidebar_min_width: 100,
            recommendation_count: 5,
            follow_playback: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// TOML file with `[[tracks]]` entries. The built-in playlist is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive used when `LUMINA_LOG` is not set, e.g. `info` or `lumina=debug`.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/lumina/lumina.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
