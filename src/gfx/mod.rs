//! # Geometry and Shading Module
//!
//! Everything needed to turn a [`ParameterSet`](crate::params::ParameterSet) into
//! renderable buffers.
//!
//! ## Architecture Overview
//!
//! - **Profiles** ([`geometry`]) - Unit prism cross-sections, cached per side count
//! - **Gradients** ([`gradient`]) - Easing curves including a cubic-Bezier solver
//! - **Color** ([`color`]) - OkLab color ramps between two endpoints
//! - **Tower** ([`tower`]) - Per-floor transforms and buffer assembly
//! - **Vertex** ([`vertex`]) - Interleaved GPU vertex layout
//!
//! ## Usage
//!
//! ```rust
//! use tower_forge::gfx::TowerMeshBuilder;
//! use tower_forge::params::ParameterSet;
//!
//! let mut builder = TowerMeshBuilder::new();
//! let mesh = builder.build(&ParameterSet::default()).unwrap();
//! assert!(mesh.triangle_count() > 0);
//! ```

pub mod color;
pub mod geometry;
pub mod gradient;
pub mod tower;
pub mod vertex;

// Re-export commonly used types
pub use color::{ColorRamp, OkLab, Rgb};
pub use geometry::{BaseProfile, BaseProfileCache};
pub use gradient::{CubicBezier, Easing};
pub use tower::{BuildOptions, GeneratedMesh, MeshSlot, TowerMeshBuilder};
pub use vertex::TowerVertex;
