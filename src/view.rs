//! Pure presentation helpers shared by the UI.
//!
//! Everything here maps playback state onto text, numbers and colors, so it
//! can be tested without a terminal.

use std::time::Duration;

use ratatui::style::Color;

/// Bar heights cycled by the "now playing" equalizer.
const EQ_LEVELS: [char; 4] = ['▂', '▄', '▆', '█'];

/// Tiles in the "Curated for You" row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub title: String,
    pub subtitle: &'static str,
    pub cover: String,
}

/// Sidebar navigation tabs. Purely visual.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Discover,
    Trending,
    Vault,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Discover, Tab::Trending, Tab::Vault];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Discover => "Discover",
            Tab::Trending => "Trending",
            Tab::Vault => "My Vault",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Discover => Tab::Trending,
            Tab::Trending => Tab::Vault,
            Tab::Vault => Tab::Discover,
        }
    }
}

/// Leading cell of a track row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMarker {
    /// 1-based position, zero padded to two digits.
    Ordinal(String),
    /// The row is the active track and audio is advancing.
    NowPlaying,
}

/// Marker for the row at `position` (0-based).
pub fn row_marker(position: usize, active: bool, playing: bool) -> RowMarker {
    if active && playing {
        RowMarker::NowPlaying
    } else {
        RowMarker::Ordinal(format!("{:02}", position + 1))
    }
}

/// Three equalizer bars for animation frame `frame`, each offset like a staggered bounce.
pub fn equalizer(frame: u64) -> String {
    (0..3u64)
        .map(|bar| {
            let phase = (frame + bar * 2) % 6;
            // 0 1 2 3 2 1
            let level = if phase <= 3 { phase } else { 6 - phase };
            EQ_LEVELS[level as usize]
        })
        .collect()
}

/// Whether the pulsing indicator is lit on `frame`. Always lit while paused.
pub fn pulse_on(frame: u64, playing: bool) -> bool {
    !playing || (frame / 4) % 2 == 0
}

/// Progress through the track in percent, `0..=100`.
///
/// Unknown or zero durations read as 0.
pub fn progress_percent(elapsed: Duration, duration: Option<Duration>) -> f64 {
    match duration {
        Some(d) if !d.is_zero() => {
            (elapsed.as_secs_f64() / d.as_secs_f64() * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

pub fn volume_percent(volume: f32) -> u16 {
    (volume.clamp(0.0, 1.0) * 100.0).round() as u16
}

/// Format a duration as `m:ss`.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Parse `#rrggbb` into an RGB color.
pub fn accent_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Accent color with a fallback for malformed values.
pub fn accent_or_default(hex: &str) -> Color {
    accent_color(hex).unwrap_or(Color::White)
}

pub fn recommendations(count: usize) -> Vec<Recommendation> {
    (1..=count)
        .map(|n| Recommendation {
            title: format!("Sonic Flow Vol. {n}"),
            subtitle: "Album • Lumina AI",
            cover: format!("https://picsum.photos/seed/{}/400/400", n + 100),
        })
        .collect()
}
