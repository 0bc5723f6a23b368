use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::output::AudioOutput;
use super::thread::spawn_output_thread;
use super::types::{EventSink, Generation, OutputCmd, ResumeId};

/// `AudioOutput` backed by `rodio` on the default output device.
pub struct RodioOutput {
    tx: Sender<OutputCmd>,
    join: Option<JoinHandle<()>>,
}

impl RodioOutput {
    pub fn new(settings: &AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<OutputCmd>();
        let fetch_timeout = Duration::from_millis(settings.fetch_timeout_ms);
        let handle = spawn_output_thread(rx, tx.clone(), fetch_timeout);

        Self {
            tx,
            join: Some(handle),
        }
    }

    fn send(&self, cmd: OutputCmd) {
        if self.tx.send(cmd).is_err() {
            tracing::warn!("audio thread is gone; command dropped");
        }
    }

    /// Stop the audio thread and wait for it. A second call is a no-op.
    fn quit(&mut self, fade_out: Duration) {
        let Some(h) = self.join.take() else {
            return;
        };
        self.send(OutputCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });
        let _ = h.join();
    }
}

impl AudioOutput for RodioOutput {
    fn attach(&mut self, events: EventSink) {
        self.send(OutputCmd::Attach(events));
    }

    fn detach(&mut self) {
        self.send(OutputCmd::Detach);
    }

    fn set_source(&mut self, generation: Generation, source: &str) {
        self.send(OutputCmd::Load {
            generation,
            source: source.to_string(),
        });
    }

    fn resume(&mut self, generation: Generation, request: ResumeId) {
        self.send(OutputCmd::Resume {
            generation,
            request,
        });
    }

    fn pause(&mut self) {
        self.send(OutputCmd::Pause);
    }

    fn set_position(&mut self, position: Duration) {
        self.send(OutputCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(OutputCmd::SetVolume(volume));
    }

    fn close(&mut self, fade_out: Duration) {
        self.quit(fade_out);
    }
}

impl Drop for RodioOutput {
    fn drop(&mut self) {
        // The thread holds its own loopback sender, so it never sees a
        // disconnect on its own.
        self.quit(Duration::ZERO);
    }
}
