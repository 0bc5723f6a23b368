//! Playback controller: the single owner of playback state.
//!
//! `PlaybackController` drives an `AudioOutput`, applies the signals it
//! reports back, and exposes a read-only `PlaybackState` for rendering.

mod controller;
mod state;

pub use controller::*;
pub use state::*;

#[cfg(test)]
mod tests;
