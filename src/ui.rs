//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::audio::AudioOutput;
use crate::config::Settings;
use crate::view::{accent_or_default, format_duration};

mod panels;
mod player_bar;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("enter".to_string(), "play selected".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    // H/L and -/+ are filled dynamically from config.
    map.insert("0-9".to_string(), "jump to 0-90%".to_string());
    map.insert("tab".to_string(), "switch tab".to_string());
    map.insert("K".to_string(), "details".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the configured steps.
fn controls_text(seek_seconds: u64, volume_step: f32) -> String {
    let order = [
        "j/k", "h/l", "H/L", "enter", "space/p", "-/+", "0-9", "gg/G", "tab", "K", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] seek -/+{}s", seek_seconds)),
            "-/+" => Some(format!(
                "[-/+] volume -/+{}%",
                (volume_step * 100.0).round() as u32
            )),
            _ => CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the entire UI into `frame`. `frame_no` drives the small animations.
pub fn draw<O: AudioOutput>(frame: &mut Frame, app: &App<O>, frame_no: u64, settings: &Settings) {
    let ui = &settings.ui;
    let area = frame.area();

    let show_sidebar = ui.show_sidebar && area.width >= ui.sidebar_min_width;
    let (sidebar_area, main_area) = if show_sidebar {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(22), Constraint::Min(40)])
            .split(area);
        (Some(cols[0]), cols[1])
    } else {
        (None, area)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(6),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(main_area);

    if let Some(sidebar) = sidebar_area {
        panels::draw_sidebar(frame, sidebar, app, ui);
    }
    panels::draw_header(frame, rows[0], app, ui);
    panels::draw_hero(frame, rows[1], app, frame_no);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[2]);
    panels::draw_queue(frame, body[0], app, frame_no);
    panels::draw_lyrics(frame, body[1], app);

    panels::draw_recommendations(frame, rows[3], ui.recommendation_count);
    player_bar::draw_player_bar(frame, rows[4], app);

    // Overlay details popup (keeps the queue visible under it)
    if app.details_window {
        draw_details(frame, rows[2], app);
    }

    let footer = Paragraph::new(controls_text(
        settings.controls.seek_step_seconds,
        settings.controls.volume_step,
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" controls ")
            .padding(Padding::left(1)),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(footer, rows[5]);
}

fn draw_details<O: AudioOutput>(frame: &mut Frame, area: Rect, app: &App<O>) {
    let popup_area = centered_rect_sized(76, 11, area);
    frame.render_widget(Clear, popup_area);

    let track = app.selected_track();
    let meta = format!(
        "Title: {}\nArtist: {}\nAlbum: {}\nDuration: {}\nAccent: {}\nSource: {}\nCover: {}",
        track.title,
        track.artist,
        track.album,
        format_duration(track.nominal_duration()),
        track.accent,
        track.source,
        if track.cover.is_empty() { "-" } else { &track.cover },
    );
    let paragraph = Paragraph::new(meta)
        .block(
            Block::default()
                .padding(Padding::left(1))
                .borders(Borders::ALL)
                .border_style(accent_or_default(&track.accent))
                .title(" details (K closes) "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}
