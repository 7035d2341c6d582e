//! # Tower Forge Prelude
//!
//! This module provides a convenient way to import commonly used types from the
//! crate. It's designed to reduce boilerplate imports for hosts that rebuild and
//! export towers.
//!
//! ## Usage
//!
//! ```rust
//! use tower_forge::prelude::*;
//!
//! let mut params = ParameterSet::default();
//! params.floors = 12;
//! params.twist_gradient = GradientMode::EaseInOut;
//!
//! let mut builder = TowerMeshBuilder::new();
//! let mesh = builder.build(&params).unwrap();
//! let obj = MeshExporter::new().export(&mesh).unwrap();
//! assert!(obj.starts_with('#'));
//! ```

// Re-export configuration types
pub use crate::params::{BezierControlPoints, BezierPoint, FloorSpacing, GradientMode, ParameterSet};

// Re-export geometry and shading types
pub use crate::gfx::color::{ColorRamp, Rgb};
pub use crate::gfx::geometry::{BaseProfile, BaseProfileCache};
pub use crate::gfx::gradient::{CubicBezier, Easing};
pub use crate::gfx::tower::{BuildOptions, GeneratedMesh, MeshSlot, TowerMeshBuilder};
pub use crate::gfx::vertex::TowerVertex;

// Re-export export and error types
pub use crate::error::{ConfigError, ExportError, ParamsError, TowerError};
pub use crate::export::{parse_obj, ExportOptions, MeshExporter};
pub use crate::performance::BuildMonitor;
