use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::create_paused_sink;
use super::source::{SourceError, fetch};
use super::types::{EventSink, Generation, OutputCmd, OutputEventKind, ResumeId};

/// How often the thread reports position and checks for end of track.
const TICK: Duration = Duration::from_millis(200);

/// What the thread currently holds for the active generation.
enum Slot {
    Empty,
    Loading,
    Ready(Sink),
    Failed(String),
}

pub(super) struct OutputThread {
    stream: Option<OutputStream>,
    /// Feeds fetch results back into our own command queue.
    loopback: Sender<OutputCmd>,
    events: Option<EventSink>,
    generation: Generation,
    slot: Slot,
    playing: bool,
    volume: f32,
    fetch_timeout: Duration,
}

pub(super) fn spawn_output_thread(
    rx: Receiver<OutputCmd>,
    loopback: Sender<OutputCmd>,
    fetch_timeout: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when the stream is dropped, which
                // scribbles over the TUI.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                tracing::error!("no audio output device: {e}");
                None
            }
        };

        let mut state = OutputThread::new(stream, loopback, fetch_timeout);

        loop {
            match rx.recv_timeout(TICK) {
                Ok(OutputCmd::Quit { fade_out_ms }) => {
                    state.quit(fade_out_ms);
                    break;
                }
                Ok(cmd) => state.handle(cmd),
                Err(RecvTimeoutError::Timeout) => state.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("audio thread stopped");
    })
}

impl OutputThread {
    pub(super) fn new(
        stream: Option<OutputStream>,
        loopback: Sender<OutputCmd>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            stream,
            loopback,
            events: None,
            generation: Generation::default(),
            slot: Slot::Empty,
            playing: false,
            volume: 1.0,
            fetch_timeout,
        }
    }

    fn emit(&mut self, generation: Generation, kind: OutputEventKind) {
        let delivered = match &self.events {
            Some(events) => events.emit(generation, kind),
            None => return,
        };
        if !delivered {
            // Subscriber dropped its receiver without detaching.
            self.events = None;
        }
    }

    pub(super) fn handle(&mut self, cmd: OutputCmd) {
        match cmd {
            OutputCmd::Attach(sink) => self.events = Some(sink),
            OutputCmd::Detach => self.events = None,
            OutputCmd::Load { generation, source } => self.load(generation, source),
            OutputCmd::Fetched { generation, result } => self.fetched(generation, result),
            OutputCmd::Resume {
                generation,
                request,
            } => self.resume(generation, request),
            OutputCmd::Pause => {
                if let Slot::Ready(sink) = &self.slot {
                    sink.pause();
                }
                self.playing = false;
            }
            OutputCmd::Seek(position) => self.seek(position),
            OutputCmd::SetVolume(volume) => {
                self.volume = volume;
                if let Slot::Ready(sink) = &self.slot {
                    sink.set_volume(volume);
                }
            }
            // Handled by the loop.
            OutputCmd::Quit { .. } => {}
        }
    }

    fn load(&mut self, generation: Generation, source: String) {
        if let Slot::Ready(sink) = &self.slot {
            sink.stop();
        }
        self.generation = generation;
        self.slot = Slot::Loading;
        self.playing = false;

        tracing::debug!(%generation, %source, "loading source");

        let loopback = self.loopback.clone();
        let timeout = self.fetch_timeout;
        thread::spawn(move || {
            let result = fetch(&source, timeout);
            let _ = loopback.send(OutputCmd::Fetched { generation, result });
        });
    }

    fn fetched(&mut self, generation: Generation, result: Result<Vec<u8>, SourceError>) {
        if generation != self.generation {
            tracing::trace!(%generation, current = %self.generation, "dropping stale fetch");
            return;
        }

        let prepared = result.and_then(|bytes| match &self.stream {
            Some(stream) => create_paused_sink(stream, bytes, self.volume),
            None => Err(SourceError::NoDevice),
        });

        match prepared {
            Ok(prepared) => {
                self.slot = Slot::Ready(prepared.sink);
                if let Some(duration) = prepared.duration {
                    self.emit(generation, OutputEventKind::MetadataLoaded(duration));
                }
                self.emit(generation, OutputEventKind::Ready);
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(%generation, "source failed to load: {reason}");
                self.slot = Slot::Failed(reason.clone());
                self.emit(generation, OutputEventKind::LoadFailed(reason));
            }
        }
    }

    fn resume(&mut self, generation: Generation, request: ResumeId) {
        if generation != self.generation {
            self.emit(
                generation,
                OutputEventKind::Rejected {
                    request,
                    reason: "source was replaced".to_string(),
                },
            );
            return;
        }

        let outcome = match &self.slot {
            Slot::Ready(sink) => {
                sink.play();
                Ok(())
            }
            Slot::Failed(reason) => Err(reason.clone()),
            Slot::Loading => Err("source is still loading".to_string()),
            Slot::Empty => Err("no source loaded".to_string()),
        };

        match outcome {
            Ok(()) => {
                self.playing = true;
                self.emit(generation, OutputEventKind::Resumed(request));
            }
            Err(reason) => {
                self.playing = false;
                self.emit(generation, OutputEventKind::Rejected { request, reason });
            }
        }
    }

    fn seek(&mut self, position: Duration) {
        let Slot::Ready(sink) = &self.slot else {
            return;
        };
        if let Err(e) = sink.try_seek(position) {
            tracing::warn!("seek to {:?} failed: {e}", position);
        }
        let pos = sink.get_pos();
        let generation = self.generation;
        self.emit(generation, OutputEventKind::TimeUpdate(pos));
    }

    /// Periodic progress report and end-of-track detection.
    fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let Slot::Ready(sink) = &self.slot else {
            return;
        };

        let generation = self.generation;
        if sink.empty() {
            self.playing = false;
            self.emit(generation, OutputEventKind::Ended);
        } else {
            let pos = sink.get_pos();
            self.emit(generation, OutputEventKind::TimeUpdate(pos));
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Slot::Ready(sink) = &self.slot {
            if self.playing {
                fade_out_sink(sink, self.volume, fade_out_ms);
            }
            sink.stop();
        }
        self.playing = false;
        self.events = None;
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
