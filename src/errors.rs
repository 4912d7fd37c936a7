//! Error Types
//!
//! This module defines the error type used throughout the crate.
//!
//! # Overview
//!
//! [`Error`] covers the failure modes of the scene core:
//! - Asset loading failures (reported, the model is skipped)
//! - Clip integrity failures (detected once when an action is bound)
//! - Stale bindings (a bound node disappeared, the frame is skipped)
//! - Degenerate viewports (zero-sized resize, ignored by the engine)
//! - Configuration, I/O and host errors
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`.
//!
//! ```rust,ignore
//! use diorama::errors::Result;
//!
//! fn integrate() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Asset Errors
    // ========================================================================
    /// A model could not be loaded or parsed.
    #[error("Failed to load asset '{path}': {reason}")]
    AssetLoad {
        /// Path or URI that was requested
        path: String,
        /// Human-readable cause
        reason: String,
    },

    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// A clip cannot be bound to the model it was played on.
    #[error("Clip '{clip}' cannot be bound: {reason}")]
    ClipIntegrity {
        /// Name of the offending clip
        clip: String,
        /// What failed to resolve
        reason: String,
    },

    /// A bound node no longer exists in the scene.
    #[error("Animation binding refers to a removed node ({node})")]
    StaleBinding {
        /// Debug representation of the node handle
        node: String,
    },

    // ========================================================================
    // Viewport Errors
    // ========================================================================
    /// A resize with a zero dimension was requested.
    #[error("Degenerate viewport size {width}x{height}")]
    DegenerateViewport {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    // ========================================================================
    // Configuration & I/O Errors
    // ========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Async & Host Errors
    // ========================================================================
    /// A background task failed to complete.
    #[error("Task join error: {0}")]
    TaskJoin(String),

    /// glTF parsing error.
    #[cfg(feature = "gltf")]
    #[error("glTF error: {0}")]
    Gltf(String),

    /// Event loop error (winit).
    #[cfg(feature = "winit")]
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::TaskJoin(err.to_string())
    }
}

#[cfg(feature = "gltf")]
impl From<gltf::Error> for Error {
    fn from(err: gltf::Error) -> Self {
        Error::Gltf(err.to_string())
    }
}

impl Error {
    /// Builds a [`Error::ClipIntegrity`] for the given clip.
    pub(crate) fn clip_integrity(clip: &str, reason: impl Into<String>) -> Self {
        Error::ClipIntegrity {
            clip: clip.to_string(),
            reason: reason.into(),
        }
    }
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
