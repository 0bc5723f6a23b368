//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the playback controller,
//! cursor and view flags.

mod model;

pub use model::*;
