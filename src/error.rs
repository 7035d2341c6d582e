//! # Error Types
//!
//! Errors reported by tower generation and export. Numerical issues inside the
//! easing solver are never surfaced here; they degrade to the nearest estimate.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid shape parameters that have no safe clamped default.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tower needs at least one floor")]
    NoFloors,

    #[error("{floors} floors exceeds the supported maximum of {max}")]
    TooManyFloors { floors: u32, max: u32 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("invalid color '{input}', expected #rrggbb")]
    InvalidColor { input: String },
}

/// Failures while reading or writing a TOML parameter file.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error(transparent)]
    Invalid(#[from] ConfigError),

    #[error("failed to parse parameters: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize parameters: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while serializing or reparsing the interchange mesh text.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot export a mesh with zero vertices")]
    EmptyMesh,

    #[error("index buffer length {len} is not a multiple of 3")]
    MalformedIndices { len: usize },

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("failed to parse OBJ text: {0}")]
    Parse(#[from] tobj::LoadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error for building a tower.
#[derive(Debug, Error)]
pub enum TowerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("floor {floor} produced a non-invertible transform")]
    SingularTransform { floor: u32 },
}

pub type Result<T, E = TowerError> = std::result::Result<T, E>;
