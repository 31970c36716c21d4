//! Ball and paddle physics
//!
//! Everything here is a pure function of the play field and the current
//! game state. The field is an axis-aligned box; the ball moves freely in
//! X/Z and bounces off the walls, while its height follows the music.

use glam::Vec3;

use crate::game::keyframes::{KeyframeEndpoint, KeyframeInterval};

pub const BOX_POSITION: Vec3 = Vec3::new(0.0, -10.0, -80.0);
pub const BOX_DIMENSIONS: Vec3 = Vec3::new(180.0, 90.0, 90.0);
pub const PAD_DIMENSIONS: Vec3 = Vec3::new(30.0, 3.0, 40.0);
pub const BALL_RADIUS: f32 = 3.0;
/// Lateral ball speed in units per second
pub const BALL_SPEED: f32 = 60.0;
pub const INITIAL_BALL_DIRECTION: Vec3 = Vec3::new(1.0, 1.0, 0.2);
/// Keeps the ball from travelling too close to the camera
pub const CAMERA_WALL_OFFSET: f32 = 30.0;

/// Dimensions of the play box, paddle and ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayField {
    pub box_position: Vec3,
    pub box_dimensions: Vec3,
    pub pad_dimensions: Vec3,
    pub ball_radius: f32,
    pub camera_wall_offset: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            box_position: BOX_POSITION,
            box_dimensions: BOX_DIMENSIONS,
            pad_dimensions: PAD_DIMENSIONS,
            ball_radius: BALL_RADIUS,
            camera_wall_offset: CAMERA_WALL_OFFSET,
        }
    }
}

/// Range the ball centre may occupy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallBounds {
    /// Ball resting on the paddle
    pub bottom_y: f32,
    /// Ball touching the ceiling
    pub top_y: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    /// Near wall, pulled in by the camera clearance
    pub max_z: f32,
}

impl BallBounds {
    #[inline]
    #[must_use]
    pub fn vertical_travel(&self) -> f32 {
        self.top_y - self.bottom_y
    }
}

/// Rectangle covered by the paddle in the X/Z plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleFootprint {
    pub left_x: f32,
    pub right_x: f32,
    pub front_z: f32,
    pub back_z: f32,
}

impl PaddleFootprint {
    /// Edges count as inside.
    #[must_use]
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.left_x && x <= self.right_x && z >= self.front_z && z <= self.back_z
    }
}

impl PlayField {
    #[must_use]
    pub fn ball_bounds(&self) -> BallBounds {
        let half = self.box_dimensions / 2.0;
        let r = self.ball_radius;
        BallBounds {
            bottom_y: self.box_position.y - half.y + r + self.pad_dimensions.y,
            top_y: self.box_position.y + half.y - r,
            min_x: self.box_position.x - half.x + r,
            max_x: self.box_position.x + half.x - r,
            min_z: self.box_position.z - half.z + r,
            max_z: self.box_position.z + half.z - r - self.camera_wall_offset,
        }
    }

    /// Far end of the Z range the paddle maps onto. The paddle can reach
    /// under the camera clearance even though the ball cannot.
    #[inline]
    fn paddle_max_z(&self, bounds: &BallBounds) -> f32 {
        bounds.max_z + self.camera_wall_offset
    }

    #[must_use]
    pub fn paddle_footprint(&self, pad_x: f32, pad_z: f32) -> PaddleFootprint {
        let left_x = self.box_position.x - self.box_dimensions.x / 2.0
            + (1.0 - pad_x) * (self.box_dimensions.x - self.pad_dimensions.x);
        let front_z = self.box_position.z - self.box_dimensions.z / 2.0
            + (1.0 - pad_z) * (self.box_dimensions.z - self.pad_dimensions.z);
        PaddleFootprint {
            left_x,
            right_x: left_x + self.pad_dimensions.x,
            front_z,
            back_z: front_z + self.pad_dimensions.z,
        }
    }

    /// World position of the paddle's centre, resting on the box floor.
    #[must_use]
    pub fn paddle_position(&self, pad_x: f32, pad_z: f32) -> Vec3 {
        let footprint = self.paddle_footprint(pad_x, pad_z);
        Vec3::new(
            footprint.left_x + self.pad_dimensions.x / 2.0,
            self.box_position.y - self.box_dimensions.y / 2.0 + self.pad_dimensions.y / 2.0,
            footprint.front_z + self.pad_dimensions.z / 2.0,
        )
    }

    /// Ball resting on top of the paddle, used before a session starts.
    #[must_use]
    pub fn ball_over_paddle(&self, pad_x: f32, pad_z: f32) -> Vec3 {
        let b = self.ball_bounds();
        Vec3::new(
            b.min_x + (1.0 - pad_x) * (b.max_x - b.min_x),
            b.bottom_y,
            b.min_z + (1.0 - pad_z) * (self.paddle_max_z(&b) - b.min_z),
        )
    }

    /// Paddle axes that put the paddle exactly under the ball.
    #[must_use]
    pub fn autoplay_paddle(&self, ball: Vec3) -> (f32, f32) {
        let b = self.ball_bounds();
        let pad_x = 1.0 - (ball.x - b.min_x) / (b.max_x - b.min_x);
        let pad_z = 1.0 - (ball.z - b.min_z) / (self.paddle_max_z(&b) - b.min_z);
        (pad_x, pad_z)
    }
}

/// Height of an endpoint.
#[inline]
#[must_use]
pub fn endpoint_height(bounds: &BallBounds, endpoint: KeyframeEndpoint) -> f32 {
    match endpoint {
        KeyframeEndpoint::Bottom => bounds.bottom_y,
        KeyframeEndpoint::Top => bounds.top_y,
    }
}

/// Ball height for a fraction of the way through an interval.
#[must_use]
pub fn interpolate_height(bounds: &BallBounds, origin: KeyframeEndpoint, destination: KeyframeEndpoint, fraction: f64) -> f32 {
    let fraction = fraction as f32;
    let travel = bounds.vertical_travel();
    match (origin, destination) {
        (KeyframeEndpoint::Bottom, KeyframeEndpoint::Bottom) => bounds.bottom_y,
        (KeyframeEndpoint::Top, KeyframeEndpoint::Top) => bounds.top_y,
        (KeyframeEndpoint::Top, KeyframeEndpoint::Bottom) => bounds.bottom_y + travel * (1.0 - fraction),
        (KeyframeEndpoint::Bottom, KeyframeEndpoint::Top) => bounds.bottom_y + travel * fraction,
    }
}

/// Ball height at `elapsed` seconds inside `interval`.
#[must_use]
pub fn ball_height(bounds: &BallBounds, interval: &KeyframeInterval, elapsed: f64) -> f32 {
    interpolate_height(bounds, interval.origin, interval.destination, interval.fraction_complete(elapsed))
}

/// Moves the ball laterally. Y is left to [`ball_height`].
pub fn advance_ball(position: &mut Vec3, direction: Vec3, dt: f64) {
    let step = dt as f32 * BALL_SPEED;
    position.x += step * direction.x;
    position.z += step * direction.z;
}

/// Clamps the ball into the X/Z bounds, flipping the direction component of
/// each wall it crossed. Axes are handled independently; the Y component of
/// the direction is never touched.
pub fn bounce(position: &mut Vec3, direction: &mut Vec3, bounds: &BallBounds) {
    if position.x < bounds.min_x {
        position.x = bounds.min_x;
        direction.x = -direction.x;
    } else if position.x > bounds.max_x {
        position.x = bounds.max_x;
        direction.x = -direction.x;
    }

    if position.z < bounds.min_z {
        position.z = bounds.min_z;
        direction.z = -direction.z;
    } else if position.z > bounds.max_z {
        position.z = bounds.max_z;
        direction.z = -direction.z;
    }
}
