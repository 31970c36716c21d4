use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{BeatError, Result};

/// Startup options, resolved once and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Play the music track in sync with the keyframes
    pub enable_music: bool,
    /// Paddle tracks the ball perfectly (demo mode)
    pub enable_autoplay: bool,
    /// Music clip loaded at startup when `enable_music` is set
    pub music_path: PathBuf,
    /// Seconds into the track where a session starts
    pub start_time: f64,
    /// Scale applied to pointer motion before it moves the paddle
    pub mouse_sensitivity: f32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            enable_music: false,
            enable_autoplay: false,
            music_path: PathBuf::from("res/Hall of the Mountain King.ogg"),
            start_time: 0.0,
            mouse_sensitivity: 1.0,
        }
    }
}

impl GameOptions {
    /// Parses options from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks that `start_time` is finite and fits a track offset.
    pub fn validate(&self) -> Result<()> {
        if !self.start_time.is_finite() {
            return Err(BeatError::InvalidOption {
                name: "start_time",
                reason: format!("{} is not a finite number of seconds", self.start_time),
            });
        }
        self.start_offset()?;
        Ok(())
    }

    /// Music offset for a session start. Negative start times seek to 0.
    pub fn start_offset(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.start_time.max(0.0)).map_err(|e| BeatError::InvalidOption {
            name: "start_time",
            reason: e.to_string(),
        })
    }
}
