//! Error types for envelope editing
//!
//! Pointer interaction never fails: out-of-range input is clamped. Errors only
//! come from building the model with impossible geometry, loading config, or
//! releasing a drag whose clip disappeared in the meantime.

use crate::clip::ClipId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("clip duration must be finite and positive, got {0}")]
    InvalidDuration(f64),

    #[error("region has no area ({width}x{height})")]
    EmptyRegion { width: f32, height: f32 },

    #[error("zoom must be finite and positive, got {0} pixels per second")]
    InvalidZoom(f64),

    #[error("lane height must be positive, got {0}")]
    InvalidLaneHeight(f32),

    #[error("clip {0} no longer exists on the track")]
    ClipNotFound(ClipId),

    #[error("invalid editor config: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, EnvelopeError>;
