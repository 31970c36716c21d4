//! Render module
//!
//! The core does not own a GPU. It walks the scene and drives an external
//! [`RenderSurface`] that can set named uniforms, bind textures and vertex
//! buffers, and issue indexed draws.
//!
//! - [`surface`]: the surface trait and uniform value types
//! - [`uniforms`]: uniform names shared with the shader
//! - [`walk`]: the light-push walk and the draw walk
//! - [`commands`]: a recording surface for headless runs and tests

pub mod commands;
pub mod surface;
pub mod uniforms;
pub mod walk;

pub use commands::{CommandBuffer, RenderCommand};
pub use surface::{RenderSurface, UniformValue};
pub use walk::{FrameUniforms, draw_nodes, push_lights, render_frame};
