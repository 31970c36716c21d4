use glam::{Mat3, Mat4, Vec3};

use crate::resources::{MeshHandle, TextureHandle};

/// Value passed to [`RenderSurface::set_uniform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    Mat3(Mat3),
    Mat4(Mat4),
}

/// Rendering capability consumed by the render walks.
///
/// Implemented by the graphics backend (shader program + GL/wgpu context)
/// and by [`CommandBuffer`](crate::render::CommandBuffer).
pub trait RenderSurface {
    /// Sets a named uniform on the active shader program.
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    /// Binds a texture to a texture unit.
    fn bind_texture_unit(&mut self, unit: u32, texture: TextureHandle);

    /// Binds the vertex buffer the next draw reads from.
    fn bind_vertex_buffer(&mut self, mesh: MeshHandle);

    /// Issues an indexed triangle draw from the bound vertex buffer.
    fn draw_indexed(&mut self, index_count: u32);
}
