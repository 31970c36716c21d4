#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod app;
pub mod audio;
pub mod errors;
pub mod game;
pub mod render;
pub mod resources;
pub mod scene;
pub mod utils;

pub use audio::{AudioBackend, ClipHandle, SoundHandle};
pub use errors::{BeatError, Result};
pub use game::{Game, GameOptions, GamePhase, GameState, KeyframeEndpoint, KeyframeTimeline};
pub use render::{CommandBuffer, RenderCommand, RenderSurface, UniformValue};
pub use resources::{Input, MaterialTextures, MeshHandle, MouseButton, TextureHandle};
pub use scene::{NodeHandle, NodeKind, Scene, SceneNode, Transform};
