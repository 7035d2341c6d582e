//! # Prism Generation
//!
//! The floor cross-section is a closed polygon prism: a side band of quads plus a
//! flat fan cap at the top and bottom. Caps and sides don't share vertices, so the
//! rim keeps a hard edge.

use super::BaseProfile;
use std::f32::consts::PI;

/// Vertices produced by [`generate_prism`] for `sides` sides.
pub const fn profile_vertex_count(sides: u32) -> usize {
    // side band: 2 rings of (sides + 1), each cap: sides centers + (sides + 1) ring
    6 * sides as usize + 4
}

/// Indices produced by [`generate_prism`] for `sides` sides.
pub const fn profile_index_count(sides: u32) -> usize {
    // 2 triangles per side quad, 1 per cap segment
    12 * sides as usize
}

/// Angular offset so a flat face, not an edge, faces +X for triangles and squares.
fn alignment_offset(sides: u32) -> f32 {
    match sides {
        3 => PI / 6.0,
        4 => PI / 4.0,
        _ => 0.0,
    }
}

/// Generate a unit polygon prism
///
/// # Arguments
/// * `sides` - Number of polygon sides, at least 3
///
/// Returns a prism of radius 1.0 extending from y = -0.5 to y = 0.5. The first
/// ring vertex sits on +Z and the polygon winds toward +X.
pub fn generate_prism(sides: u32) -> BaseProfile {
    let segs = sides.max(3);
    let half_height = 0.5;
    let offset = alignment_offset(segs);

    let mut positions = Vec::with_capacity(profile_vertex_count(segs));
    let mut normals = Vec::with_capacity(profile_vertex_count(segs));
    let mut indices = Vec::with_capacity(profile_index_count(segs));

    let ring = |i: u32| {
        let theta = offset + i as f32 * 2.0 * PI / segs as f32;
        (theta.sin(), theta.cos())
    };

    // Side band, top ring first
    for y in [half_height, -half_height] {
        for i in 0..=segs {
            let (sin_t, cos_t) = ring(i);
            positions.push([sin_t, y, cos_t]);
            normals.push([sin_t, 0.0, cos_t]);
        }
    }

    let stride = segs + 1;
    for i in 0..segs {
        let top_current = i;
        let bottom_current = stride + i;
        let bottom_next = stride + i + 1;
        let top_next = i + 1;

        indices.extend_from_slice(&[top_current, bottom_current, top_next]);
        indices.extend_from_slice(&[bottom_current, bottom_next, top_next]);
    }

    // Caps: one center vertex per segment so each fan triangle owns its apex
    for top in [true, false] {
        let sign = if top { 1.0 } else { -1.0 };
        let y = half_height * sign;

        let center_start = positions.len() as u32;
        for _ in 0..segs {
            positions.push([0.0, y, 0.0]);
            normals.push([0.0, sign, 0.0]);
        }

        let ring_start = positions.len() as u32;
        for i in 0..=segs {
            let (sin_t, cos_t) = ring(i);
            positions.push([sin_t, y, cos_t]);
            normals.push([0.0, sign, 0.0]);
        }

        for i in 0..segs {
            let center = center_start + i;
            let current = ring_start + i;
            let next = current + 1;
            if top {
                indices.extend_from_slice(&[current, next, center]);
            } else {
                indices.extend_from_slice(&[next, current, center]);
            }
        }
    }

    BaseProfile {
        sides: segs,
        positions,
        normals,
        indices,
    }
}
