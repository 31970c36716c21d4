use glam::Vec3;

use crate::game::physics::INITIAL_BALL_DIRECTION;

/// Session phase.
///
/// `Idle → Running ⇄ Paused`, `Running → Lost → Idle`. There is no terminal
/// phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    Paused,
    Lost,
}

/// Mutable simulation state, advanced once per frame by
/// [`Game::update`](crate::game::Game::update).
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: GamePhase,
    /// Seconds since the session started; keeps running while paused or lost
    pub total_elapsed: f64,
    /// Seconds of music played; frozen outside `Running`
    pub game_elapsed: f64,
    pub ball_position: Vec3,
    pub ball_direction: Vec3,
    /// Paddle axes, both always in `[0, 1]`
    pub pad_x: f32,
    pub pad_z: f32,
    pub current_keyframe: usize,
    pub previous_keyframe: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Idle,
            total_elapsed: 0.0,
            game_elapsed: 0.0,
            ball_position: Vec3::ZERO,
            ball_direction: INITIAL_BALL_DIRECTION,
            pad_x: 0.0,
            pad_z: 0.0,
            current_keyframe: 0,
            previous_keyframe: 0,
        }
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.phase != GamePhase::Idle
    }

    #[inline]
    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.phase == GamePhase::Lost
    }

    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Sets the paddle axes, clamping each into `[0, 1]`.
    pub fn set_paddle(&mut self, pad_x: f32, pad_z: f32) {
        self.pad_x = pad_x.clamp(0.0, 1.0);
        self.pad_z = pad_z.clamp(0.0, 1.0);
    }

    /// Moves the paddle by normalised offsets, clamping into `[0, 1]`.
    pub fn move_paddle(&mut self, dx: f32, dz: f32) {
        self.set_paddle(self.pad_x + dx, self.pad_z + dz);
    }

    /// Enters `Running` with both clocks at `start_time`.
    pub(crate) fn begin_session(&mut self, start_time: f64) {
        self.total_elapsed = start_time;
        self.game_elapsed = start_time;
        self.phase = GamePhase::Running;
    }

    /// Back to `Idle` after a loss, ready for a fresh session.
    pub(crate) fn reset_session(&mut self) {
        self.phase = GamePhase::Idle;
        self.current_keyframe = 0;
        self.previous_keyframe = 0;
        self.ball_direction = INITIAL_BALL_DIRECTION;
    }
}
