//! # Procedural Geometry Generation
//!
//! This module produces the unit cross-section replicated for every floor of a
//! tower, and caches it per side count so regenerations don't rebuild it.
//!
//! ## Usage
//!
//! ```rust
//! use tower_forge::gfx::geometry::{BaseProfileCache, profile_vertex_count};
//!
//! let mut cache = BaseProfileCache::new();
//! let hexagon = cache.profile(6.0);
//! assert_eq!(hexagon.vertex_count(), profile_vertex_count(6));
//! ```

pub mod cache;
pub mod primitives;

pub use cache::BaseProfileCache;
pub use primitives::*;

/// Unit-radius, unit-height polygon prism centered at the origin, Y up.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseProfile {
    /// Polygon side count, already clamped
    pub sides: u32,
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Unit normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl BaseProfile {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
