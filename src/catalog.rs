//! Track catalog: the fixed, ordered playlist the player works through.
//!
//! The catalog is built once at startup (either the built-in tracks or a
//! TOML file) and never changes afterwards.

mod builtin;
mod load;
mod model;

pub use model::*;
