use crate::render::surface::{RenderSurface, UniformValue};
use crate::resources::{MeshHandle, TextureHandle};

/// One call recorded by [`CommandBuffer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    SetUniform { name: String, value: UniformValue },
    BindTexture { unit: u32, texture: TextureHandle },
    BindVertexBuffer(MeshHandle),
    DrawIndexed { index_count: u32 },
}

/// A [`RenderSurface`] that records every call in order.
///
/// Used by the headless frontend and by tests to inspect a frame.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<RenderCommand>,
}

impl CommandBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drops the recorded frame, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of draw calls recorded
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawIndexed { .. }))
            .count()
    }

    /// Most recent value set for `name`, if any.
    #[must_use]
    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::SetUniform { name: n, value } if n == name => Some(*value),
            _ => None,
        })
    }
}

impl RenderSurface for CommandBuffer {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.commands.push(RenderCommand::SetUniform {
            name: name.to_owned(),
            value,
        });
    }

    fn bind_texture_unit(&mut self, unit: u32, texture: TextureHandle) {
        self.commands.push(RenderCommand::BindTexture { unit, texture });
    }

    fn bind_vertex_buffer(&mut self, mesh: MeshHandle) {
        self.commands.push(RenderCommand::BindVertexBuffer(mesh));
    }

    fn draw_indexed(&mut self, index_count: u32) {
        self.commands.push(RenderCommand::DrawIndexed { index_count });
    }
}
