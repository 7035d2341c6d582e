// src/lib.rs
//! Tower Forge
//!
//! Parametric twisted-tower mesh generation: stacked polygon floors with eased
//! twist, scale and color gradients, exported as vertex-colored OBJ.

pub mod error;
pub mod export;
pub mod gfx;
pub mod params;
pub mod performance;
pub mod prelude;

// Re-export main types for convenience
pub use error::{ConfigError, ExportError, ParamsError, TowerError};
pub use export::MeshExporter;
pub use gfx::tower::{GeneratedMesh, TowerMeshBuilder};
pub use params::ParameterSet;

/// Builds a tower with a throwaway builder. Use [`TowerMeshBuilder`] directly to
/// keep the profile cache across rebuilds.
pub fn build_tower(params: &ParameterSet) -> error::Result<GeneratedMesh> {
    TowerMeshBuilder::new().build(params)
}
