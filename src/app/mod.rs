//! Platform integration
//!
//! The core never talks to a window system directly. [`input_adapter`]
//! translates winit events into [`Input`](crate::resources::Input), which
//! the game reads once per frame.

pub mod input_adapter;
