//! Render walks
//!
//! Two depth-first pre-order traversals over the scene, run after the
//! transform system has refreshed every world matrix for the frame:
//!
//! 1. [`push_lights`] uploads each point light's world position and colour
//!    into its `lights[i]` slot.
//! 2. [`draw_nodes`] sets per-node uniforms and issues one indexed draw for
//!    every node that has a mesh.
//!
//! Sibling order follows the child lists. There is no depth sorting; the
//! surface is expected to have depth testing enabled.

use glam::{Mat4, Vec3};

use crate::render::surface::{RenderSurface, UniformValue};
use crate::render::uniforms;
use crate::scene::Scene;
use crate::scene::node::{NodeKind, SceneNode};

/// Frame-global values produced by the game for the shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Projection × view for world geometry
    pub view_projection: Mat4,
    /// Projection for screen-space geometry
    pub overlay_projection: Mat4,
    pub camera_position: Vec3,
    pub ball_position: Vec3,
    pub ball_radius: f32,
}

/// Renders one frame: frame uniforms, then lights, then geometry.
pub fn render_frame(scene: &Scene, frame: &FrameUniforms, surface: &mut dyn RenderSurface) {
    surface.set_uniform(uniforms::LIGHTS_COUNT, UniformValue::Int(scene.light_count() as i32));
    surface.set_uniform(uniforms::CAMERA_POSITION, UniformValue::Vec3(frame.camera_position));
    surface.set_uniform(uniforms::BALL_POSITION, UniformValue::Vec3(frame.ball_position));
    surface.set_uniform(uniforms::BALL_RADIUS, UniformValue::Float(frame.ball_radius));

    push_lights(scene, surface);
    draw_nodes(scene, &frame.view_projection, &frame.overlay_projection, surface);
}

/// Pushes `(world position, colour)` of every point light, keyed by its
/// light index. Other nodes are traversed but contribute nothing.
pub fn push_lights(scene: &Scene, surface: &mut dyn RenderSurface) {
    for (_, node) in scene.iter_pre_order(scene.root()) {
        match &node.kind {
            NodeKind::PointLight(light) => {
                let index = light.index().get();
                surface.set_uniform(
                    &uniforms::light_position(index),
                    UniformValue::Vec3(node.transform.world_position()),
                );
                surface.set_uniform(&uniforms::light_color(index), UniformValue::Vec3(light.color));
            }
            // Spot lights have no shader slot layout yet
            NodeKind::SpotLight(_)
            | NodeKind::Geometry
            | NodeKind::Geometry2D { .. }
            | NodeKind::NormalMappedGeometry { .. } => {}
        }
    }
}

/// Draws every node that has a mesh, dispatching on its kind.
pub fn draw_nodes(scene: &Scene, view_projection: &Mat4, overlay_projection: &Mat4, surface: &mut dyn RenderSurface) {
    for (_, node) in scene.iter_pre_order(scene.root()) {
        draw_node(node, view_projection, overlay_projection, surface);
    }
}

fn draw_node(node: &SceneNode, view_projection: &Mat4, overlay_projection: &Mat4, surface: &mut dyn RenderSurface) {
    let Some(mesh) = node.mesh else {
        return;
    };

    match &node.kind {
        NodeKind::Geometry => {
            set_node_matrices(node, surface);
            surface.set_uniform(uniforms::IS_2D, UniformValue::Bool(false));
            surface.set_uniform(uniforms::USE_NORMAL_MAP, UniformValue::Bool(false));
            surface.set_uniform(uniforms::VIEW_PROJECTION, UniformValue::Mat4(*view_projection));
        }
        NodeKind::NormalMappedGeometry { textures } => {
            set_node_matrices(node, surface);
            surface.set_uniform(uniforms::IS_2D, UniformValue::Bool(false));
            surface.set_uniform(uniforms::USE_NORMAL_MAP, UniformValue::Bool(true));
            surface.set_uniform(uniforms::VIEW_PROJECTION, UniformValue::Mat4(*view_projection));
            surface.bind_texture_unit(uniforms::DIFFUSE_UNIT, textures.diffuse);
            surface.bind_texture_unit(uniforms::NORMAL_MAP_UNIT, textures.normal);
            surface.bind_texture_unit(uniforms::ROUGHNESS_MAP_UNIT, textures.roughness);
        }
        NodeKind::Geometry2D { texture } => {
            set_node_matrices(node, surface);
            surface.set_uniform(uniforms::IS_2D, UniformValue::Bool(true));
            surface.set_uniform(uniforms::USE_NORMAL_MAP, UniformValue::Bool(false));
            surface.set_uniform(uniforms::VIEW_PROJECTION, UniformValue::Mat4(*overlay_projection));
            surface.bind_texture_unit(uniforms::DIFFUSE_UNIT, *texture);
        }
        NodeKind::PointLight(_) | NodeKind::SpotLight(_) => return,
    }

    surface.bind_vertex_buffer(mesh);
    surface.draw_indexed(mesh.index_count);
}

fn set_node_matrices(node: &SceneNode, surface: &mut dyn RenderSurface) {
    surface.set_uniform(uniforms::MODEL, UniformValue::Mat4(node.transform.world_matrix));
    surface.set_uniform(uniforms::NORMAL, UniformValue::Mat3(node.transform.normal_matrix));
}
