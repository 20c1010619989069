//! Error types for the collision world, scene loading and settings

use thiserror::Error;

use crate::world::ShapeId;

/// Errors raised by [`MoveValidator`](crate::world::MoveValidator) mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    /// The id is not (or no longer) registered.
    #[error("shape {0} is not registered")]
    NotFound(ShapeId),

    /// Non-positive extents or non-finite coordinates.
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// Every shape id has been handed out
    #[error("shape ids exhausted")]
    IdsExhausted,
}

/// Errors raised while parsing or populating a scene layout.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error(transparent)]
    World(#[from] WorldError),
}

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}
