//! Clip playback. Compiled to a silent engine without the `sound` feature.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available: {0}")]
    NoDevice(String),
}

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
    use tracing::warn;

    use super::AudioError;
    use crate::assets::AudioClip;

    pub struct AudioEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    /// A looping clip; stops when `stop` is called or the handle is dropped.
    pub struct Playback {
        sink: Sink,
    }

    impl Playback {
        pub fn stop(&self) {
            self.sink.stop();
        }
    }

    impl Drop for Playback {
        fn drop(&mut self) {
            self.sink.stop();
        }
    }

    impl AudioEngine {
        pub fn try_new() -> Result<Self, AudioError> {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|error| AudioError::NoDevice(error.to_string()))?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }

        fn sink_with(&self, clip: &AudioClip) -> Option<(Sink, Decoder<Cursor<Vec<u8>>>)> {
            let sink = match Sink::try_new(&self.handle) {
                Ok(sink) => sink,
                Err(error) => {
                    warn!(clip = %clip.name, error = %error, "audio_sink_failed");
                    return None;
                }
            };
            match Decoder::new(Cursor::new(clip.bytes.as_ref().clone())) {
                Ok(source) => Some((sink, source)),
                Err(error) => {
                    warn!(clip = %clip.name, error = %error, "audio_decode_failed");
                    None
                }
            }
        }

        pub fn play_once(&self, clip: &AudioClip) {
            if let Some((sink, source)) = self.sink_with(clip) {
                sink.append(source);
                sink.detach();
            }
        }

        pub fn play_looped(&self, clip: &AudioClip) -> Option<Playback> {
            let (sink, source) = self.sink_with(clip)?;
            sink.append(source.repeat_infinite());
            Some(Playback { sink })
        }
    }
}

#[cfg(feature = "sound")]
pub use inner::{AudioEngine, Playback};

#[cfg(not(feature = "sound"))]
pub struct AudioEngine;

#[cfg(not(feature = "sound"))]
pub struct Playback;

#[cfg(not(feature = "sound"))]
impl Playback {
    pub fn stop(&self) {}
}

#[cfg(not(feature = "sound"))]
impl AudioEngine {
    pub fn try_new() -> Result<Self, AudioError> {
        Ok(AudioEngine)
    }

    pub fn play_once(&self, _clip: &crate::assets::AudioClip) {}

    pub fn play_looped(&self, _clip: &crate::assets::AudioClip) -> Option<Playback> {
        Some(Playback)
    }
}
