use std::time::{Duration, Instant};

use crate::audio::{Generation, ResumeId};
use crate::error::PlaybackError;

/// Whether audio is advancing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Transport {
    Playing,
    #[default]
    Paused,
}

/// Snapshot of what the player is doing, as shown by the UI.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    /// Index into the catalog of the loaded track.
    pub current: usize,
    pub transport: Transport,
    pub elapsed: Duration,
    /// Unknown until the decoder reports it.
    pub duration: Option<Duration>,
    /// Output volume in `[0, 1]`.
    pub volume: f32,
    /// Set once the user has explicitly toggled play/pause or picked a track.
    pub interacted: bool,
}

impl PlaybackState {
    pub fn new(volume: f32) -> Self {
        Self {
            current: 0,
            transport: Transport::Paused,
            elapsed: Duration::ZERO,
            duration: None,
            volume,
            interacted: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.transport == Transport::Playing
    }
}

/// Where an in-flight `play()` is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayPhase {
    /// Waiting for the source to report `Ready`.
    AwaitingReady,
    /// Resume requested; waiting for `Resumed` or `Rejected`.
    AwaitingResume,
}

#[derive(Copy, Clone, Debug)]
pub(super) struct PendingPlay {
    pub generation: Generation,
    /// Echoed by the output's reply to this play's resume.
    pub request: ResumeId,
    pub phase: PlayPhase,
    pub since: Instant,
}

/// What `play()` did synchronously.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayRequest {
    /// Transport was already playing; nothing to do.
    AlreadyPlaying,
    /// Another `play()` for this load is still in flight; coalesced.
    Pending,
    /// Source not ready yet; resume will be issued on `Ready`.
    AwaitingReady,
    /// Resume issued; outcome will follow.
    Resuming,
    /// The source already failed to load.
    Rejected(PlaybackError),
}

/// How an asynchronous `play()` ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    Failed(PlaybackError),
}
