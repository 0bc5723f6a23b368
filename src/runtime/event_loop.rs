use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioOutput;
use crate::config;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Animation frame counter, advanced once per redraw.
    pub frame: u64,
}

/// Main terminal event loop: applies output signals, draws, handles input.
/// Returns `Ok(())` when shutdown is requested.
pub fn run<O: AudioOutput>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<O>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Failures are logged by the controller; the UI only shows the paused icon.
        app.controller.pump_events();
        app.controller.tick(Instant::now());
        app.sync_selection();

        state.frame = state.frame.wrapping_add(1);
        let frame_no = state.frame;
        terminal.draw(|f| ui::draw(f, app, frame_no, settings))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns true when the user asked to quit.
fn handle_key_event<O: AudioOutput>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<O>,
    state: &mut EventLoopState,
) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    let seek_step = settings.controls.seek_step_seconds.min(i64::MAX as u64) as i64;
    let volume_step = settings.controls.volume_step;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => {
            app.activate_selected();
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            app.toggle_play();
        }
        KeyCode::Char('l') | KeyCode::Right => app.skip(1),
        KeyCode::Char('h') | KeyCode::Left => app.skip(-1),
        KeyCode::Char('L') => app.seek_by(seek_step),
        KeyCode::Char('H') => app.seek_by(-seek_step),
        KeyCode::Char(c @ '0'..='9') => app.seek_to_tenth(c as u8 - b'0'),
        KeyCode::Char('-') => app.nudge_volume(-volume_step),
        KeyCode::Char('+') | KeyCode::Char('=') => app.nudge_volume(volume_step),
        KeyCode::Tab => app.cycle_tab(),
        KeyCode::Char('K') => app.toggle_details_window(),
        KeyCode::Esc if app.details_window => app.toggle_details_window(),
        _ => {}
    }

    false
}
