//! Scene graph module
//!
//! Manages the node hierarchy and per-frame transform state:
//! - SceneNode: tree element (kind, mesh, transform)
//! - Transform: position / Euler rotation / scale around a reference point
//! - Scene: node arena rooted at a single root node
//! - Light: light attributes and the light-index registry
//! - Camera: paddle-follow camera and projections
//! - TransformSystem: world/normal matrix propagation

pub mod camera;
pub mod light;
pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use camera::Camera;
pub use light::{Light, LightIndex};
pub use node::{NodeKind, SceneNode};
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle of a node inside a [`Scene`].
    pub struct NodeHandle;
}
