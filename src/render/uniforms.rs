//! Uniform names shared with the shader program.

/// Per-draw model (world) matrix
pub const MODEL: &str = "M";
/// Per-draw normal matrix
pub const NORMAL: &str = "N";
/// Per-draw flag: screen-space geometry
pub const IS_2D: &str = "is2D";
/// Per-draw flag: sample normal and roughness maps
pub const USE_NORMAL_MAP: &str = "useNM";
/// Per-draw projection × view
pub const VIEW_PROJECTION: &str = "VP";

pub const LIGHTS_COUNT: &str = "lightsCount";
pub const CAMERA_POSITION: &str = "cameraPos";
pub const BALL_POSITION: &str = "ballPos";
pub const BALL_RADIUS: &str = "ballRadius";

/// Texture unit layout for normal-mapped geometry
pub const DIFFUSE_UNIT: u32 = 0;
pub const NORMAL_MAP_UNIT: u32 = 1;
pub const ROUGHNESS_MAP_UNIT: u32 = 2;

#[must_use]
pub fn light_position(index: u32) -> String {
    format!("lights[{index}].position")
}

#[must_use]
pub fn light_color(index: u32) -> String {
    format!("lights[{index}].color")
}
