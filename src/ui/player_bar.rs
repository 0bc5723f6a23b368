use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, LineGauge, Padding, Paragraph},
};

use crate::app::App;
use crate::audio::AudioOutput;
use crate::view::{accent_or_default, format_duration, progress_percent, volume_percent};

/// Transport controls, track progress and volume.
pub(super) fn draw_player_bar<O: AudioOutput>(frame: &mut Frame, area: Rect, app: &App<O>) {
    let state = app.state();
    let track = app.controller.current_track();
    let accent = accent_or_default(&track.accent);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let percent = progress_percent(state.elapsed, state.duration);
    let total = state
        .duration
        .map(format_duration)
        .unwrap_or_else(|| "-:--".to_string());
    let progress = LineGauge::default()
        .filled_style(Style::default().fg(accent))
        .unfilled_style(Style::default().fg(Color::DarkGray))
        .label(format!("{} / {}", format_duration(state.elapsed), total))
        .ratio(percent / 100.0);
    frame.render_widget(progress, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(24)])
        .split(rows[1]);

    let icon = if state.is_playing() {
        "⏸"
    } else if app.controller.is_pending() {
        "◌"
    } else {
        "▶"
    };
    let controls = Line::from(vec![
        Span::raw("⏮  "),
        Span::styled(icon, Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        Span::raw("  ⏭   "),
        Span::styled(
            track.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" · {}", track.artist), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(controls), cols[0]);

    let volume = Gauge::default()
        .gauge_style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .label(format!("vol {}%", volume_percent(state.volume)))
        .percent(volume_percent(state.volume));
    frame.render_widget(volume, cols[1]);
}
