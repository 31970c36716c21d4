use std::time::{Duration, Instant};

/// Frame timer for the game loop.
///
/// The first [`tick`](Self::tick) measures from construction, so create the
/// timer right before the loop starts.
pub struct Timer {
    start_time: Instant,
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a new timer starting from now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Records a frame boundary and returns the delta in seconds.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;
        self.dt_seconds()
    }

    /// Time since the last tick, without recording a frame boundary.
    #[must_use]
    pub fn delta_since_tick(&self) -> Duration {
        self.last_update.elapsed()
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f64 {
        self.delta.as_secs_f64()
    }
}
