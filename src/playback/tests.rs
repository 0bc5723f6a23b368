use super::*;
use crate::audio::{AudioOutput, EventSink, Generation, OutputEvent, OutputEventKind, ResumeId};
use crate::catalog::Catalog;
use crate::config::AudioSettings;
use crate::error::PlaybackError;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Attach,
    Detach,
    SetSource(Generation, String),
    Resume(Generation, ResumeId),
    Pause,
    SetPosition(Duration),
    SetVolume(f32),
    Close(Duration),
}

/// Scripted behavior plus a log of every call the controller made.
#[derive(Default)]
struct Script {
    calls: Vec<Call>,
    sink: Option<EventSink>,
    /// Report metadata + `Ready` as soon as a source is set.
    auto_ready: bool,
    /// Answer `resume` with `Rejected` instead of `Resumed`.
    reject_resume: Option<String>,
    /// Record `resume` calls without answering them.
    hold_replies: bool,
    duration: Option<Duration>,
}

#[derive(Clone, Default)]
struct FakeOutput {
    script: Rc<RefCell<Script>>,
}

impl FakeOutput {
    fn emit(&self, generation: Generation, kind: OutputEventKind) {
        let s = self.script.borrow();
        if let Some(sink) = &s.sink {
            sink.emit(generation, kind);
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.script.borrow().calls.clone()
    }

    fn clear_calls(&self) {
        self.script.borrow_mut().calls.clear();
    }

    fn sources(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SetSource(_, s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl AudioOutput for FakeOutput {
    fn attach(&mut self, events: EventSink) {
        let mut s = self.script.borrow_mut();
        s.calls.push(Call::Attach);
        s.sink = Some(events);
    }

    fn detach(&mut self) {
        let mut s = self.script.borrow_mut();
        s.calls.push(Call::Detach);
        s.sink = None;
    }

    fn set_source(&mut self, generation: Generation, source: &str) {
        let (auto_ready, duration) = {
            let mut s = self.script.borrow_mut();
            s.calls.push(Call::SetSource(generation, source.to_string()));
            (s.auto_ready, s.duration)
        };
        if auto_ready {
            if let Some(d) = duration {
                self.emit(generation, OutputEventKind::MetadataLoaded(d));
            }
            self.emit(generation, OutputEventKind::Ready);
        }
    }

    fn resume(&mut self, generation: Generation, request: ResumeId) {
        let (reject, hold) = {
            let mut s = self.script.borrow_mut();
            s.calls.push(Call::Resume(generation, request));
            (s.reject_resume.clone(), s.hold_replies)
        };
        if hold {
            return;
        }
        match reject {
            Some(reason) => self.emit(generation, OutputEventKind::Rejected { request, reason }),
            None => self.emit(generation, OutputEventKind::Resumed(request)),
        }
    }

    fn pause(&mut self) {
        self.script.borrow_mut().calls.push(Call::Pause);
    }

    fn set_position(&mut self, position: Duration) {
        self.script
            .borrow_mut()
            .calls
            .push(Call::SetPosition(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.script.borrow_mut().calls.push(Call::SetVolume(volume));
    }

    fn close(&mut self, fade_out: Duration) {
        self.script.borrow_mut().calls.push(Call::Close(fade_out));
    }
}

fn settings() -> AudioSettings {
    AudioSettings {
        default_volume: 0.8,
        ready_timeout_ms: 1_000,
        fetch_timeout_ms: 1_000,
        quit_fade_out_ms: 0,
    }
}

fn ready_output() -> FakeOutput {
    let out = FakeOutput::default();
    {
        let mut s = out.script.borrow_mut();
        s.auto_ready = true;
        s.duration = Some(Duration::from_secs(372));
    }
    out
}

fn controller(out: &FakeOutput) -> PlaybackController<FakeOutput> {
    let mut c = PlaybackController::new(out.clone(), Catalog::builtin(), &settings());
    c.pump_events();
    c
}

fn source_of(index: usize) -> String {
    Catalog::builtin().track(index).source.clone()
}

#[test]
fn new_attaches_and_loads_first_track_paused() {
    let out = ready_output();
    let c = controller(&out);

    let calls = out.calls();
    assert_eq!(calls[0], Call::Attach);
    assert_eq!(calls[1], Call::SetVolume(0.8));
    assert_eq!(out.sources(), vec![source_of(0)]);

    assert_eq!(c.current_index(), 0);
    assert_eq!(c.state().transport, Transport::Paused);
    assert_eq!(c.state().duration, Some(Duration::from_secs(372)));
    assert!(!c.state().interacted);
}

#[test]
fn toggle_play_plays_then_pauses() {
    let out = ready_output();
    let mut c = controller(&out);

    assert_eq!(c.toggle_play(), Some(PlayRequest::Resuming));
    assert_eq!(c.pump_events(), vec![PlayOutcome::Started]);
    assert!(c.state().is_playing());
    assert!(c.state().interacted);

    assert_eq!(c.toggle_play(), None);
    assert!(!c.state().is_playing());
    assert_eq!(out.calls().last(), Some(&Call::Pause));
}

#[test]
fn pause_is_idempotent() {
    let out = ready_output();
    let mut c = controller(&out);

    c.pause();
    assert_eq!(c.state().transport, Transport::Paused);
    c.pause();
    assert_eq!(c.state().transport, Transport::Paused);
}

#[test]
fn skip_wraps_in_both_directions() {
    let out = ready_output();
    let mut c = controller(&out);

    c.skip(-1);
    assert_eq!(c.current_index(), 3);
    c.skip(1);
    assert_eq!(c.current_index(), 0);
    c.skip(1);
    assert_eq!(c.current_index(), 1);
}

#[test]
fn skip_back_from_first_reloads_last_and_resets_elapsed() {
    let out = ready_output();
    let mut c = controller(&out);
    c.pump_events();
    c.seek(0.5);
    assert_eq!(c.state().elapsed, Duration::from_secs(186));
    out.clear_calls();

    c.skip(-1);

    assert_eq!(c.current_index(), 3);
    assert_eq!(out.sources(), vec![source_of(3)]);
    assert_eq!(c.state().elapsed, Duration::ZERO);
    assert_eq!(c.state().duration, None);
}

#[test]
fn skip_without_interaction_stays_paused() {
    let out = ready_output();
    let mut c = controller(&out);
    out.clear_calls();

    c.skip(1);
    c.pump_events();

    assert!(!c.state().is_playing());
    assert!(!out.calls().iter().any(|c| matches!(c, Call::Resume(..))));
}

#[test]
fn skip_after_interaction_continues_playing() {
    let out = ready_output();
    let mut c = controller(&out);
    c.toggle_play();
    c.pump_events();
    c.toggle_play();
    assert!(!c.state().is_playing());

    c.skip(1);
    c.pump_events();

    assert_eq!(c.current_index(), 1);
    assert!(c.state().is_playing());
}

#[test]
fn seek_uses_fraction_of_duration_and_clamps() {
    let out = ready_output();
    let mut c = controller(&out);

    c.seek(0.5);
    assert_eq!(c.state().elapsed, Duration::from_secs(186));
    assert_eq!(
        out.calls().last(),
        Some(&Call::SetPosition(Duration::from_secs(186)))
    );

    c.seek(2.0);
    assert_eq!(c.state().elapsed, Duration::from_secs(372));
    c.seek(-1.0);
    assert_eq!(c.state().elapsed, Duration::ZERO);
}

#[test]
fn seek_targets_zero_when_duration_unknown() {
    let out = FakeOutput::default();
    let mut c = controller(&out);
    assert_eq!(c.state().duration, None);

    c.seek(0.75);
    assert_eq!(c.state().elapsed, Duration::ZERO);
    assert_eq!(out.calls().last(), Some(&Call::SetPosition(Duration::ZERO)));
}

#[test]
fn seek_to_clamps_to_duration() {
    let out = ready_output();
    let mut c = controller(&out);

    c.seek_to(Duration::from_secs(1_000));
    assert_eq!(c.state().elapsed, Duration::from_secs(372));
}

#[test]
fn set_volume_reads_back_exactly() {
    let out = ready_output();
    let mut c = controller(&out);

    for level in [0.0_f32, 0.25, 0.5, 0.73, 1.0] {
        c.set_volume(level);
        assert_eq!(c.volume(), level);
        assert_eq!(out.calls().last(), Some(&Call::SetVolume(level)));
    }

    c.set_volume(1.7);
    assert_eq!(c.volume(), 1.0);
    c.set_volume(f32::NAN);
    assert_eq!(c.volume(), 1.0);
}

#[test]
fn time_update_is_clamped_to_duration() {
    let out = ready_output();
    let mut c = controller(&out);
    let generation = c.generation();

    c.handle_event(OutputEvent {
        generation,
        kind: OutputEventKind::TimeUpdate(Duration::from_secs(400)),
    });
    assert_eq!(c.state().elapsed, Duration::from_secs(372));
}

#[test]
fn play_waits_for_ready_before_resuming() {
    let out = FakeOutput::default();
    let mut c = controller(&out);
    let generation = c.generation();

    assert_eq!(c.play(), PlayRequest::AwaitingReady);
    assert!(c.is_pending());
    assert!(!out.calls().iter().any(|c| matches!(c, Call::Resume(..))));

    // Repeated play while pending coalesces.
    assert_eq!(c.play(), PlayRequest::Pending);

    c.handle_event(OutputEvent {
        generation,
        kind: OutputEventKind::Ready,
    });
    assert_eq!(out.calls().last(), Some(&Call::Resume(generation, ResumeId(1))));

    let outcome = c.handle_event(OutputEvent {
        generation,
        kind: OutputEventKind::Resumed(ResumeId(1)),
    });
    assert_eq!(outcome, Some(PlayOutcome::Started));
    assert!(c.state().is_playing());
    assert_eq!(c.play(), PlayRequest::AlreadyPlaying);
}

#[test]
fn rejected_resume_leaves_paused_and_reports_error() {
    let out = ready_output();
    out.script.borrow_mut().reject_resume = Some("autoplay blocked".to_string());
    let mut c = controller(&out);

    c.toggle_play();
    let outcomes = c.pump_events();

    assert_eq!(
        outcomes,
        vec![PlayOutcome::Failed(PlaybackError::rejected("autoplay blocked"))]
    );
    assert_eq!(c.state().transport, Transport::Paused);
    assert!(!c.is_pending());
}

#[test]
fn ended_on_last_track_wraps_to_first_and_plays() {
    let out = ready_output();
    let mut c = controller(&out);
    c.load_track(3);
    c.toggle_play();
    c.pump_events();
    assert!(c.state().is_playing());
    let generation = c.generation();

    c.handle_event(OutputEvent {
        generation,
        kind: OutputEventKind::Ended,
    });
    c.pump_events();

    assert_eq!(c.current_index(), 0);
    assert!(c.state().is_playing());
}

#[test]
fn stale_ready_does_not_start_playback() {
    let out = FakeOutput::default();
    let mut c = controller(&out);
    let old = c.generation();

    c.play();
    c.load_track(2);
    assert!(!c.is_pending());

    c.handle_event(OutputEvent {
        generation: old,
        kind: OutputEventKind::Ready,
    });
    c.handle_event(OutputEvent {
        generation: old,
        kind: OutputEventKind::Resumed(ResumeId(1)),
    });

    assert!(!c.state().is_playing());
    assert!(!out.calls().iter().any(|c| matches!(c, Call::Resume(..))));
}

#[test]
fn resumed_after_pause_is_reverted() {
    let out = FakeOutput::default();
    let mut c = controller(&out);
    let generation = c.generation();
    c.handle_event(OutputEvent {
        generation,
        kind: OutputEventKind::Ready,
    });

    assert_eq!(c.play(), PlayRequest::Resuming);
    c.pause();
    out.clear_calls();

    let outcome = c.handle_event(OutputEvent {
        generation,
        kind: OutputEventKind::Resumed(ResumeId(1)),
    });

    assert_eq!(outcome, None);
    assert!(!c.state().is_playing());
    assert_eq!(out.calls(), vec![Call::Pause]);
}

#[test]
fn replies_to_an_earlier_resume_do_not_settle_a_later_play() {
    let out = ready_output();
    out.script.borrow_mut().hold_replies = true;
    let mut c = controller(&out);
    let generation = c.generation();

    c.toggle_play();
    c.toggle_play();
    c.toggle_play();
    assert_eq!(
        out.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Resume(..)))
            .collect::<Vec<_>>(),
        vec![
            Call::Resume(generation, ResumeId(1)),
            Call::Resume(generation, ResumeId(2)),
        ]
    );
    out.clear_calls();

    // The first reply belongs to the play that was paused; it must not
    // settle the second one or pause the output.
    let first = c.handle_event(OutputEvent {
        generation,
        kind: OutputEventKind::Resumed(ResumeId(1)),
    });
    assert_eq!(first, None);
    assert!(c.is_pending());
    assert!(out.calls().is_empty());

    let second = c.handle_event(OutputEvent {
        generation,
        kind: OutputEventKind::Resumed(ResumeId(2)),
    });
    assert_eq!(second, Some(PlayOutcome::Started));
    assert!(c.state().is_playing());
    assert!(!out.calls().contains(&Call::Pause));
}

#[test]
fn late_rejection_of_an_earlier_resume_is_ignored() {
    let out = ready_output();
    out.script.borrow_mut().hold_replies = true;
    let mut c = controller(&out);
    let generation = c.generation();

    c.toggle_play();
    c.toggle_play();
    c.toggle_play();

    let stale = c.handle_event(OutputEvent {
        generation,
        kind: OutputEventKind::Rejected {
            request: ResumeId(1),
            reason: "interrupted".to_string(),
        },
    });
    assert_eq!(stale, None);
    assert!(c.is_pending());

    let outcome = c.handle_event(OutputEvent {
        generation,
        kind: OutputEventKind::Resumed(ResumeId(2)),
    });
    assert_eq!(outcome, Some(PlayOutcome::Started));
    assert_eq!(c.state().transport, Transport::Playing);
}

#[test]
fn load_failure_rejects_pending_and_later_plays() {
    let out = FakeOutput::default();
    let mut c = controller(&out);
    let generation = c.generation();

    c.play();
    let outcome = c.handle_event(OutputEvent {
        generation,
        kind: OutputEventKind::LoadFailed("404".to_string()),
    });
    assert_eq!(
        outcome,
        Some(PlayOutcome::Failed(PlaybackError::rejected("404")))
    );

    assert_eq!(
        c.play(),
        PlayRequest::Rejected(PlaybackError::rejected("404"))
    );
    assert!(!c.state().is_playing());
}

#[test]
fn readiness_timeout_fails_the_pending_play() {
    let out = FakeOutput::default();
    let mut c = controller(&out);

    c.play();
    assert_eq!(c.tick(Instant::now()), None);

    let later = Instant::now() + Duration::from_secs(5);
    match c.tick(later) {
        Some(PlayOutcome::Failed(PlaybackError::Rejected { reason })) => {
            assert!(reason.contains("not ready"));
        }
        other => panic!("expected timeout failure, got {other:?}"),
    }
    assert!(!c.is_pending());
    assert_eq!(c.state().transport, Transport::Paused);
}

#[test]
fn zero_ready_timeout_waits_forever() {
    let out = FakeOutput::default();
    let mut s = settings();
    s.ready_timeout_ms = 0;
    let mut c = PlaybackController::new(out.clone(), Catalog::builtin(), &s);

    c.play();
    assert_eq!(c.tick(Instant::now() + Duration::from_secs(3_600)), None);
    assert!(c.is_pending());
}

#[test]
fn shutdown_detaches_and_closes_once() {
    let out = ready_output();
    let mut c = controller(&out);
    out.clear_calls();

    c.shutdown(Duration::from_millis(300));
    c.shutdown(Duration::from_millis(300));
    drop(c);

    assert_eq!(
        out.calls(),
        vec![Call::Detach, Call::Close(Duration::from_millis(300))]
    );
}

#[test]
fn drop_without_shutdown_pauses_and_detaches() {
    let out = ready_output();
    let c = controller(&out);
    out.clear_calls();

    drop(c);

    assert_eq!(out.calls(), vec![Call::Pause, Call::Detach]);
}
