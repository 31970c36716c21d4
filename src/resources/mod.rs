//! Core resource definitions
//!
//! Opaque handles and state containers the core consumes from its
//! collaborators, with no dependency on a GPU or windowing implementation:
//! - [`MeshHandle`]: vertex buffer plus index count
//! - [`TextureHandle`] / [`MaterialTextures`]: texture units
//! - [`Input`]: pointer button and motion state

pub mod input;
pub mod mesh;
pub mod texture;

pub use input::{ButtonState, Input, MouseButton};
pub use mesh::MeshHandle;
pub use texture::{MaterialTextures, TextureHandle};
