use glam::{Mat4, Vec3};

/// Paddle-follow camera.
///
/// The camera sits at a fixed world position. Its orientation is a pure
/// function of the paddle position, recomputed every frame by
/// [`follow_paddle`](Self::follow_paddle).
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,

    // === Projection ===
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    // Cached matrices, read-only for the renderer
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
    pub(crate) view_projection_matrix: Mat4,
}

impl Camera {
    /// `fov` is the vertical field of view in degrees.
    #[must_use]
    pub fn new_perspective(position: Vec3, fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            position,
            fov: fov.to_radians(),
            aspect,
            near,
            far,

            view_matrix: Mat4::from_translation(-position),
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
        };

        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        // GL clip-space convention (depth in [-1, 1])
        self.projection_matrix = Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far);
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// Orients the camera from the paddle position (both axes in `[0, 1]`).
    pub fn follow_paddle(&mut self, pad_x: f32, pad_z: f32) {
        self.view_matrix = Mat4::from_rotation_x(tilt(pad_z))
            * Mat4::from_rotation_y(look_rotation(pad_x))
            * Mat4::from_translation(-self.position);
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection_matrix
    }
}

/// Horizontal look rotation: a logistic curve centred at `pad_x = 0.5`,
/// ranging over `(-0.3, 0.3)` radians.
#[inline]
#[must_use]
pub fn look_rotation(pad_x: f32) -> f32 {
    -0.6 / (1.0 + (-5.0 * (pad_x - 0.5)).exp()) + 0.3
}

/// Vertical tilt: `0.3` radians at the near edge, easing quadratically to
/// `0.1` at the far edge.
#[inline]
#[must_use]
pub fn tilt(pad_z: f32) -> f32 {
    0.3 + 0.2 * (-pad_z * pad_z)
}

/// Orthographic projection for screen-space overlays, origin bottom-left.
#[must_use]
pub fn overlay_projection(width: f32, height: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, width, 0.0, height, -1.0, 1.0)
}
