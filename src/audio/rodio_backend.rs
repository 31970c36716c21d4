//! Rodio audio backend implementation
//!
//! Uses the Rodio library for cross-platform audio playback. Clips are kept
//! as encoded bytes and decoded per instance, so every instance can start
//! at its own offset.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::{AudioBackend, ClipHandle, SoundHandle};
use crate::errors::{BeatError, Result};

/// One playable instance of a clip
struct RodioSound {
    data: Arc<[u8]>,
    offset: Duration,
    /// Created on first `play`; dropped on `stop`
    sink: Option<Sink>,
}

/// Rodio-based audio backend
pub struct RodioBackend {
    /// Audio output stream (must be kept alive)
    _output_stream: OutputStream,
    /// Output stream handle for creating sinks
    stream_handle: OutputStreamHandle,
    clips: HashMap<ClipHandle, Arc<[u8]>>,
    sounds: HashMap<SoundHandle, RodioSound>,
    next_id: u32,
}

impl RodioBackend {
    /// Opens the default output device.
    pub fn new() -> Result<Self> {
        let (output_stream, stream_handle) =
            OutputStream::try_default().map_err(|e| BeatError::AudioBackend(format!("Failed to open output stream: {e}")))?;

        log::info!("Audio output stream opened");

        Ok(Self {
            _output_stream: output_stream,
            stream_handle,
            clips: HashMap::new(),
            sounds: HashMap::new(),
            next_id: 0,
        })
    }

    fn next_handle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn sound_mut(&mut self, sound: SoundHandle) -> Result<&mut RodioSound> {
        self.sounds.get_mut(&sound).ok_or(BeatError::InvalidAudioHandle)
    }
}

impl AudioBackend for RodioBackend {
    fn load_clip(&mut self, path: &Path) -> Result<ClipHandle> {
        let load_error = |reason: String| BeatError::AudioClipLoad {
            path: path.to_path_buf(),
            reason,
        };

        let bytes = std::fs::read(path).map_err(|e| load_error(e.to_string()))?;
        let data: Arc<[u8]> = Arc::from(bytes);

        // Validate once up front so a broken file fails at startup
        Decoder::new(Cursor::new(Arc::clone(&data))).map_err(|e| load_error(e.to_string()))?;

        let handle = ClipHandle(self.next_handle_id());
        self.clips.insert(handle, data);
        log::debug!("Loaded audio clip {:?} from {}", handle, path.display());
        Ok(handle)
    }

    fn create_instance(&mut self, clip: ClipHandle) -> Result<SoundHandle> {
        let data = self.clips.get(&clip).cloned().ok_or(BeatError::InvalidAudioHandle)?;
        let handle = SoundHandle(self.next_handle_id());
        self.sounds.insert(
            handle,
            RodioSound {
                data,
                offset: Duration::ZERO,
                sink: None,
            },
        );
        Ok(handle)
    }

    fn set_start_offset(&mut self, sound: SoundHandle, offset: Duration) -> Result<()> {
        self.sound_mut(sound)?.offset = offset;
        Ok(())
    }

    fn play(&mut self, sound: SoundHandle) -> Result<()> {
        let stream_handle = self.stream_handle.clone();
        let entry = self.sound_mut(sound)?;

        if let Some(sink) = &entry.sink {
            sink.play();
            return Ok(());
        }

        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| BeatError::AudioBackend(format!("Failed to create sink: {e}")))?;
        let source = Decoder::new(Cursor::new(Arc::clone(&entry.data)))
            .map_err(|e| BeatError::AudioBackend(format!("Failed to decode audio: {e}")))?;
        sink.append(source.skip_duration(entry.offset));
        entry.sink = Some(sink);
        Ok(())
    }

    fn pause(&mut self, sound: SoundHandle) -> Result<()> {
        if let Some(sink) = &self.sound_mut(sound)?.sink {
            sink.pause();
        }
        Ok(())
    }

    fn stop(&mut self, sound: SoundHandle) -> Result<()> {
        if let Some(sink) = self.sound_mut(sound)?.sink.take() {
            sink.stop();
        }
        Ok(())
    }

    fn release(&mut self, sound: SoundHandle) {
        if let Some(entry) = self.sounds.remove(&sound)
            && let Some(sink) = entry.sink
        {
            sink.stop();
        }
    }
}
