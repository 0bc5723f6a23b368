//! Creating `rodio` sinks from fetched source bytes.
//!
//! The helpers here decode an in-memory source and prepare a paused `Sink`
//! at the requested volume.

use std::io::Cursor;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::source::SourceError;

/// A decoded source attached to the mixer, not yet playing.
pub(super) struct PreparedSink {
    pub sink: Sink,
    pub duration: Option<Duration>,
}

/// Decode `bytes` and report the total duration when the decoder knows it.
///
/// The byte length is passed along so formats without timing headers
/// (plain CBR MP3, Vorbis) still get a duration and can be seeked.
pub(super) fn decode(
    bytes: Vec<u8>,
) -> Result<(Decoder<Cursor<Vec<u8>>>, Option<Duration>), SourceError> {
    let len = bytes.len() as u64;
    let decoder = Decoder::builder()
        .with_data(Cursor::new(bytes))
        .with_byte_len(len)
        .build()?;
    let duration = decoder.total_duration();
    Ok((decoder, duration))
}

/// Decode `bytes` and create a paused `Sink` for it.
pub(super) fn create_paused_sink(
    stream: &OutputStream,
    bytes: Vec<u8>,
    volume: f32,
) -> Result<PreparedSink, SourceError> {
    let (decoder, duration) = decode(bytes)?;

    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    sink.set_volume(volume);
    sink.append(decoder);

    Ok(PreparedSink { sink, duration })
}
