//! Audio module
//!
//! Music playback is an external, independently scheduled resource. The
//! core only issues fire-and-forget commands through [`AudioBackend`] and
//! never waits on playback.
//!
//! The rodio implementation lives behind the `audio` cargo feature.

#[cfg(feature = "audio")]
pub mod rodio_backend;

use std::path::Path;
use std::time::Duration;

use crate::errors::Result;

/// Handle to a decoded-and-validated clip held by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipHandle(pub u32);

/// Handle to a playable instance of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// Audio backend trait for platform abstraction
///
/// Single-threaded: the game owns its backend and calls it from the frame
/// loop only.
pub trait AudioBackend {
    /// Loads a clip from disk. Fails if the path is missing or unreadable,
    /// or the data cannot be decoded.
    fn load_clip(&mut self, path: &Path) -> Result<ClipHandle>;

    /// Creates a stopped, playable instance of `clip`.
    fn create_instance(&mut self, clip: ClipHandle) -> Result<SoundHandle>;

    /// Sets where in the clip playback begins.
    fn set_start_offset(&mut self, sound: SoundHandle, offset: Duration) -> Result<()>;

    /// Starts playback, or resumes it after [`pause`](Self::pause).
    fn play(&mut self, sound: SoundHandle) -> Result<()>;

    /// Pauses playback, keeping the position.
    fn pause(&mut self, sound: SoundHandle) -> Result<()>;

    /// Stops playback.
    fn stop(&mut self, sound: SoundHandle) -> Result<()>;

    /// Frees the instance. The handle is invalid afterwards.
    fn release(&mut self, sound: SoundHandle);
}
