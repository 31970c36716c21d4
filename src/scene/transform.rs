use glam::{Mat3, Mat4, Vec3};

/// Transform component
///
/// Local placement of a node relative to its parent, plus the matrices the
/// transform system caches on it every frame.
///
/// Rotation is stored as Euler angles in radians and applied in Y, X, Z
/// order. Rotation and scale pivot around `reference_point`, which is
/// expressed in local space.
#[derive(Debug, Clone)]
pub struct Transform {
    // === Public properties ===
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub reference_point: Vec3,

    // === Matrix cache ===
    // Valid only after a propagation pass from the root in the current frame.
    pub(crate) world_matrix: Mat4,
    pub(crate) normal_matrix: Mat3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            reference_point: Vec3::ZERO,

            world_matrix: Mat4::IDENTITY,
            normal_matrix: Mat3::IDENTITY,
        }
    }

    /// Builds the local matrix:
    /// `T(position) · T(ref) · Ry · Rx · Rz · S(scale) · T(−ref)`.
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_translation(self.reference_point)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale)
            * Mat4::from_translation(-self.reference_point)
    }

    // ========================================================================
    // Getters & Helpers
    // ========================================================================

    /// World matrix from the last propagation pass
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Normal matrix from the last propagation pass (geometry nodes only)
    #[inline]
    #[must_use]
    pub fn normal_matrix(&self) -> &Mat3 {
        &self.normal_matrix
    }

    /// Translation column of the world matrix
    #[inline]
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.w_axis.truncate()
    }

    pub fn set_world_matrix(&mut self, mat: Mat4) {
        self.world_matrix = mat;
    }

    pub fn set_normal_matrix(&mut self, mat: Mat3) {
        self.normal_matrix = mat;
    }

    /// Sets a uniform scale on all three axes
    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Inverse-transpose of the upper 3x3 of `world`.
#[inline]
#[must_use]
pub fn normal_matrix_of(world: &Mat4) -> Mat3 {
    Mat3::from_mat4(*world).inverse().transpose()
}
