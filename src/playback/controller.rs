use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use crate::audio::{AudioOutput, EventSink, Generation, OutputEvent, OutputEventKind, ResumeId};
use crate::catalog::{Catalog, Track};
use crate::config::AudioSettings;
use crate::error::PlaybackError;

use super::state::{PendingPlay, PlayOutcome, PlayPhase, PlayRequest, PlaybackState, Transport};

/// Owns the output and every piece of mutable playback state.
///
/// All mutation happens on the thread that owns the controller. Signals from
/// the output are queued on a channel and applied by `pump_events`.
pub struct PlaybackController<O: AudioOutput> {
    output: O,
    catalog: Catalog,
    state: PlaybackState,
    generation: Generation,
    /// The current source reported `Ready`.
    ready: bool,
    /// The current source failed to fetch or decode.
    load_error: Option<String>,
    pending: Option<PendingPlay>,
    /// Id handed to the most recent `play()`.
    last_request: ResumeId,
    ready_timeout: Option<Duration>,
    events: Receiver<OutputEvent>,
    closed: bool,
}

impl<O: AudioOutput> PlaybackController<O> {
    /// Subscribe to `output` and load the first track, paused.
    pub fn new(mut output: O, catalog: Catalog, settings: &AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel();
        output.attach(EventSink::new(tx));

        let volume = settings.default_volume.clamp(0.0, 1.0);
        output.set_volume(volume);

        let ready_timeout =
            (settings.ready_timeout_ms > 0).then(|| Duration::from_millis(settings.ready_timeout_ms));

        let mut controller = Self {
            output,
            catalog,
            state: PlaybackState::new(volume),
            generation: Generation::default(),
            ready: false,
            load_error: None,
            pending: None,
            last_request: ResumeId::default(),
            ready_timeout,
            events: rx,
            closed: false,
        };
        controller.load_track(0);
        controller
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_track(&self) -> &Track {
        self.catalog.track(self.state.current)
    }

    pub fn current_index(&self) -> usize {
        self.state.current
    }

    /// A `play()` is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn volume(&self) -> f32 {
        self.state.volume
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn mark_interaction(&mut self) {
        self.state.interacted = true;
    }

    /// Replace the current source with the track at `index` (wrapped).
    ///
    /// Any in-flight `play()` for the previous source is abandoned.
    pub fn load_track(&mut self, index: isize) {
        let index = self.catalog.wrap_index(index);
        self.generation = self.generation.next();
        self.pending = None;
        self.ready = false;
        self.load_error = None;

        let track = self.catalog.track(index);
        tracing::info!(
            generation = %self.generation,
            id = track.id,
            "loading \"{}\" by {}",
            track.title,
            track.artist
        );
        self.output.set_source(self.generation, &track.source);

        self.state.current = index;
        self.state.elapsed = Duration::ZERO;
        self.state.duration = None;
        self.state.transport = Transport::Paused;
    }

    /// Start playback of the current source.
    pub fn play(&mut self) -> PlayRequest {
        if self.state.is_playing() {
            return PlayRequest::AlreadyPlaying;
        }
        if self.pending.is_some() {
            return PlayRequest::Pending;
        }
        if let Some(reason) = &self.load_error {
            let err = PlaybackError::rejected(reason.clone());
            tracing::error!(generation = %self.generation, "{err}");
            self.state.transport = Transport::Paused;
            return PlayRequest::Rejected(err);
        }

        self.last_request = self.last_request.next();
        let request = self.last_request;
        let since = Instant::now();
        if self.ready {
            self.output.resume(self.generation, request);
            self.pending = Some(PendingPlay {
                generation: self.generation,
                request,
                phase: PlayPhase::AwaitingResume,
                since,
            });
            PlayRequest::Resuming
        } else {
            self.pending = Some(PendingPlay {
                generation: self.generation,
                request,
                phase: PlayPhase::AwaitingReady,
                since,
            });
            PlayRequest::AwaitingReady
        }
    }

    /// Pause. Idempotent; also abandons an in-flight `play()`.
    pub fn pause(&mut self) {
        self.output.pause();
        self.pending = None;
        self.state.transport = Transport::Paused;
    }

    pub fn toggle_play(&mut self) -> Option<PlayRequest> {
        self.state.interacted = true;
        if self.state.is_playing() || self.pending.is_some() {
            self.pause();
            None
        } else {
            Some(self.play())
        }
    }

    /// Move to the neighbouring track. `direction` is `-1` or `+1`.
    ///
    /// Playback continues on the new track when something was playing or
    /// the user has interacted before.
    pub fn skip(&mut self, direction: isize) {
        let was_playing = self.state.is_playing() || self.pending.is_some();
        let target = self.state.current as isize + direction.signum();
        self.load_track(target);
        if was_playing || self.state.interacted {
            self.play();
        }
    }

    /// Seek to `fraction` of the track. Targets 0 while the duration is unknown.
    pub fn seek(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        let target = self
            .state
            .duration
            .map(|d| d.mul_f64(fraction))
            .unwrap_or(Duration::ZERO);
        self.set_position(target);
    }

    /// Seek to an absolute position, clamped to the known duration.
    pub fn seek_to(&mut self, position: Duration) {
        let target = match self.state.duration {
            Some(d) => position.min(d),
            None => Duration::ZERO,
        };
        self.set_position(target);
    }

    fn set_position(&mut self, target: Duration) {
        self.output.set_position(target);
        self.state.elapsed = target;
    }

    pub fn set_volume(&mut self, level: f32) {
        if !level.is_finite() {
            return;
        }
        let level = level.clamp(0.0, 1.0);
        self.output.set_volume(level);
        self.state.volume = level;
    }

    /// Apply every queued signal. Returns the outcomes of any plays that resolved.
    pub fn pump_events(&mut self) -> Vec<PlayOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            if let Some(outcome) = self.handle_event(event) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Apply one signal from the output.
    pub fn handle_event(&mut self, event: OutputEvent) -> Option<PlayOutcome> {
        if event.generation != self.generation {
            tracing::trace!(
                generation = %event.generation,
                current = %self.generation,
                "ignoring stale {:?}",
                event.kind
            );
            return None;
        }

        match event.kind {
            OutputEventKind::TimeUpdate(pos) => {
                self.state.elapsed = match self.state.duration {
                    Some(d) => pos.min(d),
                    None => pos,
                };
                None
            }
            OutputEventKind::MetadataLoaded(duration) => {
                self.state.duration = Some(duration);
                None
            }
            OutputEventKind::Ready => {
                self.ready = true;
                if let Some(p) = self.pending.as_mut() {
                    if p.phase == PlayPhase::AwaitingReady && p.generation == self.generation {
                        p.phase = PlayPhase::AwaitingResume;
                        self.output.resume(self.generation, p.request);
                    }
                }
                None
            }
            OutputEventKind::Resumed(request) => {
                if self.take_pending(request).is_some() {
                    self.state.transport = Transport::Playing;
                    tracing::debug!(generation = %self.generation, "playback started");
                    Some(PlayOutcome::Started)
                } else {
                    if self.pending.is_none() && !self.state.is_playing() {
                        // Paused while the resume was in flight.
                        self.output.pause();
                    }
                    None
                }
            }
            OutputEventKind::Rejected { request, reason } => {
                self.take_pending(request)?;
                Some(self.fail(reason))
            }
            OutputEventKind::LoadFailed(reason) => {
                self.ready = false;
                self.load_error = Some(reason.clone());
                if self.pending.take().is_some() {
                    Some(self.fail(reason))
                } else {
                    tracing::warn!(generation = %self.generation, "source failed to load: {reason}");
                    None
                }
            }
            OutputEventKind::Ended => {
                tracing::debug!(generation = %self.generation, "track ended");
                self.skip(1);
                None
            }
        }
    }

    /// Settle the pending play if `request` is the resume it is waiting on.
    fn take_pending(&mut self, request: ResumeId) -> Option<PendingPlay> {
        match self.pending {
            Some(p) if p.phase == PlayPhase::AwaitingResume && p.request == request => {
                self.pending.take()
            }
            _ => {
                tracing::trace!(generation = %self.generation, ?request, "ignoring stale resume reply");
                None
            }
        }
    }

    /// Expire a readiness wait that has outlived the configured timeout.
    pub fn tick(&mut self, now: Instant) -> Option<PlayOutcome> {
        let timeout = self.ready_timeout?;
        let pending = self.pending?;
        if pending.phase != PlayPhase::AwaitingReady
            || now.saturating_duration_since(pending.since) < timeout
        {
            return None;
        }
        self.pending = None;
        Some(self.fail(format!("source not ready after {}ms", timeout.as_millis())))
    }

    fn fail(&mut self, reason: String) -> PlayOutcome {
        let err = PlaybackError::rejected(reason);
        tracing::error!(generation = %self.generation, "{err}");
        self.state.transport = Transport::Paused;
        PlayOutcome::Failed(err)
    }

    /// Unsubscribe and stop the output, fading out over `fade_out`.
    pub fn shutdown(&mut self, fade_out: Duration) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.pending = None;
        self.output.detach();
        self.output.close(fade_out);
        self.state.transport = Transport::Paused;
    }
}

impl<O: AudioOutput> Drop for PlaybackController<O> {
    fn drop(&mut self) {
        if !self.closed {
            self.output.pause();
            self.output.detach();
        }
    }
}
