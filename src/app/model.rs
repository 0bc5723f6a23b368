//! Application model: `App` wraps the playback controller with UI state.
//!
//! `App` owns the cursor position, the follow-playback flag, the active
//! sidebar tab and the details popup, and turns user intents into controller
//! calls.

use std::time::Duration;

use crate::audio::AudioOutput;
use crate::catalog::Track;
use crate::playback::{PlayRequest, PlaybackController, PlaybackState};
use crate::view::Tab;

/// The main application model.
pub struct App<O: AudioOutput> {
    pub controller: PlaybackController<O>,
    pub selected: usize,
    pub follow_playback: bool,
    pub tab: Tab,
    pub details_window: bool,
}

impl<O: AudioOutput> App<O> {
    /// Create a new `App` around `controller`, with the cursor on the loaded track.
    pub fn new(controller: PlaybackController<O>, follow_playback: bool) -> Self {
        let selected = controller.current_index();
        Self {
            controller,
            selected,
            follow_playback,
            tab: Tab::default(),
            details_window: false,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        self.controller.state()
    }

    pub fn tracks(&self) -> &[Track] {
        self.controller.catalog().tracks()
    }

    pub fn selected_track(&self) -> &Track {
        self.controller.catalog().track(self.selected)
    }

    pub fn toggle_details_window(&mut self) {
        self.details_window = !self.details_window;
    }

    pub fn cycle_tab(&mut self) {
        self.tab = self.tab.next();
    }

    /// Enable following playback (cursor follows currently playing track).
    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
        self.sync_selection();
    }

    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    /// Move the cursor onto the current track while following playback.
    pub fn sync_selection(&mut self) {
        if self.follow_playback {
            self.selected = self.controller.current_index();
        }
    }

    /// Activate the row under the cursor.
    ///
    /// The active row toggles play/pause; any other row is loaded and played.
    pub fn activate_selected(&mut self) -> Option<PlayRequest> {
        self.activate_row(self.selected)
    }

    pub fn activate_row(&mut self, index: usize) -> Option<PlayRequest> {
        if index == self.controller.current_index() {
            let req = self.controller.toggle_play();
            self.follow_playback_on();
            return req;
        }
        self.controller.mark_interaction();
        self.controller.load_track(index as isize);
        let req = self.controller.play();
        self.follow_playback_on();
        Some(req)
    }

    pub fn toggle_play(&mut self) -> Option<PlayRequest> {
        self.controller.toggle_play()
    }

    /// Skip button: counts as an interaction.
    pub fn skip(&mut self, direction: isize) {
        self.controller.mark_interaction();
        self.controller.skip(direction);
        self.follow_playback_on();
    }

    /// Seek relative to the current position by `delta_secs`.
    pub fn seek_by(&mut self, delta_secs: i64) {
        let elapsed = self.state().elapsed;
        let step = Duration::from_secs(delta_secs.unsigned_abs());
        let target = if delta_secs < 0 {
            elapsed.saturating_sub(step)
        } else {
            elapsed.saturating_add(step)
        };
        self.controller.seek_to(target);
    }

    /// Seek to `tenths` × 10% of the track (`0..=9`).
    pub fn seek_to_tenth(&mut self, tenths: u8) {
        let fraction = f64::from(tenths.min(9)) / 10.0;
        self.controller.seek(fraction);
    }

    pub fn nudge_volume(&mut self, delta: f32) {
        let level = self.controller.volume() + delta;
        self.controller.set_volume(level);
    }

    /// Move selection to the next track, wrapping around.
    pub fn next(&mut self) {
        self.follow_playback_off();
        self.selected = (self.selected + 1) % self.controller.catalog().len();
    }

    /// Move selection to the previous track, wrapping around.
    pub fn prev(&mut self) {
        self.follow_playback_off();
        let len = self.controller.catalog().len();
        self.selected = (self.selected + len - 1) % len;
    }

    pub fn select_first(&mut self) {
        self.follow_playback_off();
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.follow_playback_off();
        self.selected = self.controller.catalog().len() - 1;
    }
}
