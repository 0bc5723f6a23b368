//! Static and now-playing panels: sidebar, header, hero, queue, lyrics and
//! recommendations.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::audio::AudioOutput;
use crate::config::UiSettings;
use crate::view::{
    RowMarker, Tab, accent_or_default, equalizer, format_duration, pulse_on, recommendations,
    row_marker,
};

const DIM: Color = Color::DarkGray;

pub(super) fn draw_sidebar<O: AudioOutput>(
    frame: &mut Frame,
    area: Rect,
    app: &App<O>,
    ui: &UiSettings,
) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("◆ {}", ui.brand),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    for tab in Tab::ALL {
        let line = if tab == app.tab {
            Line::from(format!("▸ {}", tab.label())).bold()
        } else {
            Line::from(format!("  {}", tab.label())).fg(DIM)
        };
        lines.push(line);
    }

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::RIGHT)
            .padding(Padding::uniform(1)),
    );
    frame.render_widget(sidebar, area);
}

pub(super) fn draw_header<O: AudioOutput>(
    frame: &mut Frame,
    area: Rect,
    app: &App<O>,
    ui: &UiSettings,
) {
    let line = Line::from(vec![
        Span::styled("⌕ ", Style::default().fg(DIM)),
        Span::styled(ui.search_placeholder.as_str(), Style::default().fg(DIM)),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", app.tab.label()))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(header, area);
}

/// Big now-playing card with the pulsing "Now Streaming" badge.
pub(super) fn draw_hero<O: AudioOutput>(frame: &mut Frame, area: Rect, app: &App<O>, frame_no: u64) {
    let track = app.controller.current_track();
    let accent = accent_or_default(&track.accent);
    let playing = app.state().is_playing();

    let dot = if pulse_on(frame_no, playing) {
        Span::styled("● ", Style::default().fg(Color::LightBlue))
    } else {
        Span::styled("● ", Style::default().fg(DIM))
    };

    let lines = vec![
        Line::from(vec![
            dot,
            Span::styled(
                "NOW STREAMING",
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled(
            track.artist.to_uppercase(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} • {}", track.title, track.album).to_uppercase(),
            Style::default().fg(DIM),
        )),
    ];

    let hero = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(hero, area);
}

/// The track list ("The Vibe Queue").
pub(super) fn draw_queue<O: AudioOutput>(frame: &mut Frame, area: Rect, app: &App<O>, frame_no: u64) {
    let tracks = app.tracks();
    let current = app.controller.current_index();
    let playing = app.state().is_playing();

    // Center the selected item when possible by creating a visible window.
    let total = tracks.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, app.selected)
    } else {
        let half = list_height / 2;
        let mut start = app.selected.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, app.selected - start)
    };

    let items: Vec<ListItem> = tracks[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let pos = start + offset;
            let active = pos == current;
            let accent = accent_or_default(&track.accent);

            let marker = match row_marker(pos, active, playing) {
                RowMarker::NowPlaying => Span::styled(equalizer(frame_no), Style::default().fg(accent)),
                RowMarker::Ordinal(n) => {
                    let style = if active {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(DIM)
                    };
                    Span::styled(format!("{n:>3}"), style)
                }
            };

            let title_style = if active {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let heart = if active {
                Span::styled(" ♥", Style::default().fg(Color::Red))
            } else {
                Span::raw("  ")
            };

            ListItem::new(Line::from(vec![
                marker,
                Span::raw("  "),
                Span::styled(track.title.as_str(), title_style),
                Span::styled(format!("  {}", track.artist.to_uppercase()), Style::default().fg(DIM)),
                Span::styled(format!("  {}", track.album), Style::default().fg(DIM)),
                heart,
                Span::styled(
                    format!("  {}", format_duration(track.nominal_duration())),
                    Style::default().fg(DIM),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" The Vibe Queue "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Lyrics of the current track ("Live Canvas"); the first line lights up while playing.
pub(super) fn draw_lyrics<O: AudioOutput>(frame: &mut Frame, area: Rect, app: &App<O>) {
    let track = app.controller.current_track();
    let playing = app.state().is_playing();

    let lines: Vec<Line> = if track.lyrics.is_empty() {
        vec![Line::from("No lyrics for this track").fg(DIM).italic()]
    } else {
        track
            .lyrics
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let style = match (i, playing) {
                    (0, true) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    (0, false) => Style::default().fg(Color::Gray),
                    _ => Style::default().fg(DIM),
                };
                Line::from(Span::styled(text.as_str(), style))
            })
            .collect()
    };

    let lyrics = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Live Canvas ")
                .padding(Padding::horizontal(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(lyrics, area);
}

/// "Curated for You" tiles.
pub(super) fn draw_recommendations(frame: &mut Frame, area: Rect, count: usize) {
    let block = Block::default().borders(Borders::ALL).title(" Curated for You ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let recs = recommendations(count);
    if recs.is_empty() {
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, recs.len() as u32); recs.len()])
        .split(inner);

    for (rec, col) in recs.iter().zip(cols.iter()) {
        let tile = Paragraph::new(vec![
            Line::from(rec.title.as_str()).bold(),
            Line::from(rec.subtitle.to_uppercase()).fg(DIM),
            Line::from(rec.cover.as_str()).fg(DIM).italic(),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(tile, *col);
    }
}
