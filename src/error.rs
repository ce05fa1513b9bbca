//! # Error Types (`error.rs`)
//!
//! Every fallible operation in the crate reports one of the enums below. They are split by
//! concern so that callers only match on what their operation can actually produce:
//!
//! - [`ConfigError`]: rejected or unreadable [`Options`](crate::Options).
//! - [`MorphError`]: inconsistent morph target data handed to [`MorphGeometry`](crate::MorphGeometry).
//! - [`AppError`]: failures while starting or running the application event loop.

use std::path::PathBuf;

/// Errors produced while loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("double click duration must not be negative, got {0} ms")]
    NegativeDoubleClickDuration(i64),

    #[error("target frame rate must be greater than zero")]
    ZeroTargetFps,

    #[error("window size must be non-zero, got {width}x{height}")]
    InvalidWindowSize { width: u32, height: u32 },

    #[error("failed reading config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed parsing config")]
    Parse(#[from] toml::de::Error),
}

/// Errors produced by morph geometry bookkeeping.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MorphError {
    #[error("expected {expected} weights, got {actual}")]
    WeightCount { expected: usize, actual: usize },

    #[error("morph target has {actual} vertices, base geometry has {expected}")]
    VertexCountMismatch { expected: usize, actual: usize },

    #[error("morph target carries normals but the base geometry does not")]
    MissingBaseNormals,
}

/// Errors produced while running the application.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Morph(#[from] MorphError),

    #[error("event loop failure")]
    EventLoop(#[from] winit::error::EventLoopError),
}
