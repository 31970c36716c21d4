//! Error Types
//!
//! This module defines the error types used throughout the engine.
//!
//! # Overview
//!
//! The main error type [`BeatError`] covers the few failure modes the core
//! reports to its caller:
//! - Startup failures (the music clip cannot be loaded or played)
//! - Keyframe data that violates the timeline contract
//! - Startup options out of range
//! - I/O and JSON errors while reading configuration or keyframe files
//!
//! Steady-state frame updates never return errors. Anomalies there (clamped
//! input, failed audio commands) are handled or logged locally.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the engine.
#[derive(Error, Debug)]
pub enum BeatError {
    // ========================================================================
    // Audio Errors
    // ========================================================================
    /// The music clip could not be opened or decoded.
    #[error("Failed to load audio clip '{path}': {reason}")]
    AudioClipLoad {
        /// Path that was requested
        path: PathBuf,
        /// Backend-specific description
        reason: String,
    },

    /// The audio backend could not open an output device or a playable instance.
    #[error("Audio backend error: {0}")]
    AudioBackend(String),

    /// A clip or sound handle does not refer to a live resource.
    #[error("Invalid audio handle")]
    InvalidAudioHandle,

    // ========================================================================
    // Data Errors
    // ========================================================================
    /// Keyframe data is too short or not strictly increasing.
    #[error("Invalid keyframe data: {0}")]
    InvalidKeyframes(String),

    /// A startup option is outside the range the engine can honour.
    #[error("Invalid option '{name}': {reason}")]
    InvalidOption {
        name: &'static str,
        reason: String,
    },

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, BeatError>`.
pub type Result<T> = std::result::Result<T, BeatError>;
