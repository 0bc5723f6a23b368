//! Audio-related small types: load generations, signals and commands.

use std::fmt;
use std::sync::mpsc::Sender;
use std::time::Duration;

use super::source::SourceError;

/// Monotonic counter identifying one track load.
///
/// Every signal coming back from the output carries the generation of the
/// load it belongs to, so late signals from a replaced source can be dropped.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies one `resume` request so its reply can be matched to the
/// `play()` that sent it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResumeId(pub u64);

impl ResumeId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Signals reported by the output.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEventKind {
    /// Playback position advanced.
    TimeUpdate(Duration),
    /// The decoder reported the authoritative duration.
    MetadataLoaded(Duration),
    /// The source is decoded and can start immediately.
    Ready,
    /// A resume request succeeded; audio is advancing.
    Resumed(ResumeId),
    /// A resume request was refused.
    Rejected { request: ResumeId, reason: String },
    /// The source could not be fetched or decoded.
    LoadFailed(String),
    /// The source played to its end.
    Ended,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputEvent {
    pub generation: Generation,
    pub kind: OutputEventKind,
}

/// Sending half of the signal stream, handed to the output on attach.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: Sender<OutputEvent>,
}

impl EventSink {
    pub fn new(tx: Sender<OutputEvent>) -> Self {
        Self { tx }
    }

    /// Emit one signal. Returns false once the subscriber has gone away.
    pub fn emit(&self, generation: Generation, kind: OutputEventKind) -> bool {
        self.tx.send(OutputEvent { generation, kind }).is_ok()
    }
}

#[derive(Debug)]
pub(super) enum OutputCmd {
    /// Start reporting signals to `sink`.
    Attach(EventSink),
    /// Stop reporting signals.
    Detach,
    /// Replace the current source and begin fetching it.
    Load { generation: Generation, source: String },
    /// Result of a background fetch.
    Fetched {
        generation: Generation,
        result: Result<Vec<u8>, SourceError>,
    },
    /// Start or continue playback of the given load.
    Resume {
        generation: Generation,
        request: ResumeId,
    },
    Pause,
    Seek(Duration),
    SetVolume(f32),
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
