//! Keyframe timeline
//!
//! Beat data for the music track: an ordered list of timestamps, each
//! tagged with where the ball must be at that moment. The game resolves the
//! current interval every frame and drives the ball height from it.

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{BeatError, Result};

/// Where the ball is at a keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyframeEndpoint {
    Bottom,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Seconds into the track
    pub time: f64,
    pub endpoint: KeyframeEndpoint,
}

impl Keyframe {
    #[must_use]
    pub const fn new(time: f64, endpoint: KeyframeEndpoint) -> Self {
        Self { time, endpoint }
    }
}

/// The span between two consecutive keyframes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeInterval {
    pub start: f64,
    pub end: f64,
    pub origin: KeyframeEndpoint,
    pub destination: KeyframeEndpoint,
}

impl KeyframeInterval {
    /// Fraction of the interval elapsed at `elapsed`, clamped to `[0, 1]`.
    #[must_use]
    pub fn fraction_complete(&self, elapsed: f64) -> f64 {
        ((elapsed - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    /// Ball rising from the paddle: the moment a hit is checked.
    #[must_use]
    pub fn is_launch(&self) -> bool {
        self.origin == KeyframeEndpoint::Bottom && self.destination == KeyframeEndpoint::Top
    }
}

/// Validated keyframe sequence: at least two entries, strictly increasing
/// timestamps.
///
/// The final entry only closes the last interval. Resolution never moves
/// past the second-to-last entry, and that last interval is treated as
/// extending to infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTimeline {
    frames: Vec<Keyframe>,
}

impl KeyframeTimeline {
    pub fn new(frames: Vec<Keyframe>) -> Result<Self> {
        if frames.len() < 2 {
            return Err(BeatError::InvalidKeyframes(format!(
                "need at least 2 keyframes, got {}",
                frames.len()
            )));
        }
        if let Some(i) = frames
            .windows(2)
            .position(|w| w[1].time.partial_cmp(&w[0].time) != Some(Ordering::Greater))
        {
            return Err(BeatError::InvalidKeyframes(format!(
                "timestamps must strictly increase (entry {} at {}s, entry {} at {}s)",
                i,
                frames[i].time,
                i + 1,
                frames[i + 1].time
            )));
        }
        Ok(Self { frames })
    }

    /// Parses a JSON array of `{ "time": seconds, "endpoint": "bottom" | "top" }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let frames: Vec<Keyframe> = serde_json::from_str(json)?;
        Self::new(frames)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// A steady beat: `count` keyframes `period` seconds apart, alternating
    /// Bottom / Top starting at Bottom on t = 0. At least two are produced.
    #[must_use]
    pub fn metronome(period: f64, count: usize) -> Self {
        let period = if period > 0.0 { period } else { 1.0 };
        let frames = (0..count.max(2))
            .map(|i| {
                let endpoint = if i % 2 == 0 {
                    KeyframeEndpoint::Bottom
                } else {
                    KeyframeEndpoint::Top
                };
                Keyframe::new(i as f64 * period, endpoint)
            })
            .collect();
        Self { frames }
    }

    #[must_use]
    pub fn frames(&self) -> &[Keyframe] {
        &self.frames
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Highest index resolution can reach.
    #[inline]
    #[must_use]
    pub fn last_interval_index(&self) -> usize {
        self.frames.len() - 2
    }

    /// Scans forward from `current` to the last keyframe whose timestamp is
    /// not after `elapsed`. Never rewinds.
    #[must_use]
    pub fn resolve(&self, elapsed: f64, current: usize) -> usize {
        let last = self.last_interval_index();
        let mut index = current.min(last);
        while index < last && self.frames[index + 1].time <= elapsed {
            index += 1;
        }
        index
    }

    /// Interval starting at `index` (clamped to the last interval).
    #[must_use]
    pub fn interval(&self, index: usize) -> KeyframeInterval {
        let index = index.min(self.last_interval_index());
        let from = self.frames[index];
        let to = self.frames[index + 1];
        KeyframeInterval {
            start: from.time,
            end: to.time,
            origin: from.endpoint,
            destination: to.endpoint,
        }
    }
}
