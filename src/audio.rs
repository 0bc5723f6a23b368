//! Audio output: the platform boundary the playback controller drives.
//!
//! `AudioOutput` is the contract; `RodioOutput` implements it with a
//! dedicated audio thread that fetches, decodes and plays one source at a
//! time and reports progress back as `OutputEvent`s.

mod output;
mod player;
mod sink;
mod source;
mod thread;
mod types;

pub use output::AudioOutput;
pub use player::RodioOutput;
pub use types::*;
