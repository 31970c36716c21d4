//! Utility Module
//!
//! - [`time`]: frame timing for the game loop

pub mod time;

pub use time::Timer;
