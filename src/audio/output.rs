use std::time::Duration;

use super::types::{EventSink, Generation, ResumeId};

/// The platform audio-output facility as seen by the playback controller.
///
/// Commands are fire-and-forget; their effects (readiness, resume outcome,
/// progress, completion) come back through the attached `EventSink`, each
/// tagged with the load generation it belongs to.
pub trait AudioOutput {
    /// Subscribe to output signals. Replaces any previous subscriber.
    fn attach(&mut self, events: EventSink);

    /// Stop delivering signals.
    fn detach(&mut self);

    /// Replace the current source with `source` and start loading it.
    fn set_source(&mut self, generation: Generation, source: &str);

    /// Ask the output to start or continue playing the current source.
    ///
    /// The reply (`Resumed` or `Rejected`) echoes `request`.
    fn resume(&mut self, generation: Generation, request: ResumeId);

    /// Suspend playback. Always succeeds.
    fn pause(&mut self);

    fn set_position(&mut self, position: Duration);

    fn set_volume(&mut self, volume: f32);

    /// Stop all output before teardown.
    fn close(&mut self, _fade_out: Duration) {}
}
