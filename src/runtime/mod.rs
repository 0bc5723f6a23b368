use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioOutput;
use crate::catalog::Catalog;
use crate::playback::PlaybackController;

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, warning) = settings::load_settings();

    let log_path = logging::init_logging(&settings.log)?;
    if let Some(msg) = warning {
        tracing::warn!("{msg}");
    }
    if let Some(path) = &log_path {
        tracing::info!("logging to {}", path.display());
    }

    // A catalog file on the command line wins over `catalog.path`.
    let catalog_path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.catalog.path.clone());
    let catalog = match &catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };

    let output = RodioOutput::new(&settings.audio);
    let controller = PlaybackController::new(output, catalog, &settings.audio);
    let mut app = App::new(controller, settings.ui.follow_playback);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &mut state)
    })();

    tracing::info!(generation = %app.controller.generation(), "shutting down");
    app.controller
        .shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
