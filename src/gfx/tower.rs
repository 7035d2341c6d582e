//! # Tower Mesh Builder
//!
//! Replicates the cached floor profile once per floor, placing each copy with its
//! own translate/twist/scale transform and a flat floor color, and merges the
//! copies into one set of vertex, normal, color and index buffers.
//!
//! Floors are disconnected shells: no vertex is shared across a floor boundary, so
//! twist, scale and color may jump between floors without seams.
//!
//! ```rust
//! use tower_forge::gfx::tower::TowerMeshBuilder;
//! use tower_forge::params::ParameterSet;
//!
//! let mut builder = TowerMeshBuilder::new();
//! let mesh = builder.build(&ParameterSet::default()).unwrap();
//! assert_eq!(mesh.vertex_count() % 48, 0);
//! ```

use std::time::Instant;

use cgmath::{Deg, InnerSpace, Matrix, Matrix3, Matrix4, SquareMatrix, Vector3, Vector4};
use log::{debug, warn};

use crate::error::{Result, TowerError};
use crate::gfx::color::ColorRamp;
use crate::gfx::geometry::BaseProfileCache;
use crate::gfx::gradient::Easing;
use crate::gfx::vertex::TowerVertex;
use crate::params::ParameterSet;
use crate::performance::BuildMonitor;

/// Smallest effective floor radius.
pub const MIN_RADIUS: f32 = 0.05;
/// Smallest effective slab thickness.
pub const MIN_THICKNESS: f32 = 0.05;

/// Switches for optional output buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Emit per-vertex normals. When off, the normal buffer is left empty.
    pub normals: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { normals: true }
    }
}

/// Placement of a single floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorFrame {
    /// Normalized position along the tower, 0 at the bottom floor.
    pub t: f32,
    pub twist_degrees: f32,
    pub radius: f32,
    pub thickness: f32,
    pub elevation: f32,
}

impl FloorFrame {
    /// Translate, then rotate about Y, then scale (radius, thickness, radius).
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(0.0, self.elevation, 0.0))
            * Matrix4::from_angle_y(Deg(self.twist_degrees))
            * Matrix4::from_nonuniform_scale(self.radius, self.thickness, self.radius)
    }
}

/// Inverse-transpose of the upper 3x3, for transforming normals.
fn inverse_transpose(matrix: &Matrix4<f32>) -> Option<Matrix3<f32>> {
    let upper = Matrix3::from_cols(matrix.x.truncate(), matrix.y.truncate(), matrix.z.truncate());
    upper.invert().map(|inverse| inverse.transpose())
}

/// Merged buffers of a generated tower. Positions, normals and colors are flat
/// `xyz`/`rgb` arrays indexed in parallel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneratedMesh {
    pub positions: Vec<f32>,
    /// Empty when the mesh was built without normals.
    pub normals: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u32>,
}

/// Axis-aligned box plus enclosing sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub center: [f32; 3],
    pub radius: f32,
}

impl GeneratedMesh {
    pub fn from_buffers(
        positions: Vec<f32>,
        normals: Vec<f32>,
        colors: Vec<f32>,
        indices: Vec<u32>,
    ) -> Self {
        Self {
            positions,
            normals,
            colors,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty() && self.normals.len() == self.positions.len()
    }

    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty() && self.colors.len() == self.positions.len()
    }

    /// Position of vertex `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.vertex_count()`.
    pub fn position(&self, index: usize) -> [f32; 3] {
        let i = index * 3;
        [self.positions[i], self.positions[i + 1], self.positions[i + 2]]
    }

    /// Returns `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Bounds> {
        if self.vertex_count() == 0 {
            return None;
        }

        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for p in self.positions.chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }

        let center = [
            (min[0] + max[0]) * 0.5,
            (min[1] + max[1]) * 0.5,
            (min[2] + max[2]) * 0.5,
        ];
        let radius = self
            .positions
            .chunks_exact(3)
            .map(|p| {
                let d = [p[0] - center[0], p[1] - center[1], p[2] - center[2]];
                (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
            })
            .fold(0.0_f32, f32::max);

        Some(Bounds {
            min,
            max,
            center,
            radius,
        })
    }

    /// Normals derived from the current positions and triangles.
    pub fn recompute_normals(&self) -> Vec<f32> {
        compute_vertex_normals(&self.positions, &self.indices)
    }

    /// Interleaves the buffers for GPU upload. Missing normals are recomputed,
    /// missing colors default to white.
    pub fn to_vertices(&self) -> Vec<TowerVertex> {
        let recomputed;
        let normals = if self.has_normals() {
            &self.normals
        } else {
            recomputed = self.recompute_normals();
            &recomputed
        };

        (0..self.vertex_count())
            .map(|i| {
                let j = i * 3;
                let color = if self.has_colors() {
                    [self.colors[j], self.colors[j + 1], self.colors[j + 2]]
                } else {
                    [1.0, 1.0, 1.0]
                };
                TowerVertex {
                    position: self.position(i),
                    normal: [normals[j], normals[j + 1], normals[j + 2]],
                    color,
                }
            })
            .collect()
    }

    /// Interleaved [`TowerVertex`] data as raw bytes.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_vertices()).to_vec()
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Area-weighted vertex normals from triangle faces.
///
/// Triangles referencing vertices outside `positions` are skipped; vertices not
/// touched by any triangle get a zero normal.
pub fn compute_vertex_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let vertex_count = positions.len() / 3;
    let mut normals = vec![0.0; vertex_count * 3];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
            continue;
        }

        let vertex = |i: usize| Vector3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]);
        let (v0, v1, v2) = (vertex(i0), vertex(i1), vertex(i2));

        // Cross product length is twice the area, which weights large faces more
        let face_normal = (v1 - v0).cross(v2 - v0);

        for vertex_idx in [i0, i1, i2] {
            normals[vertex_idx * 3] += face_normal.x;
            normals[vertex_idx * 3 + 1] += face_normal.y;
            normals[vertex_idx * 3 + 2] += face_normal.z;
        }
    }

    for n in normals.chunks_exact_mut(3) {
        let length = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if length > 0.0 {
            n[0] /= length;
            n[1] /= length;
            n[2] /= length;
        }
    }

    normals
}

/// Builds tower meshes from parameter snapshots.
///
/// The builder owns the profile cache and build metrics. Every call is a full
/// rebuild; side or floor count changes alter the buffer layout anyway.
#[derive(Debug, Default)]
pub struct TowerMeshBuilder {
    cache: BaseProfileCache,
    monitor: BuildMonitor,
    options: BuildOptions,
}

impl TowerMeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing, possibly pre-warmed, profile cache.
    pub fn with_cache(cache: BaseProfileCache) -> Self {
        Self {
            cache,
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    pub fn cache(&self) -> &BaseProfileCache {
        &self.cache
    }

    pub fn monitor(&self) -> &BuildMonitor {
        &self.monitor
    }

    pub fn into_cache(self) -> BaseProfileCache {
        self.cache
    }

    /// Placement of every floor for `params`, bottom first.
    pub fn floor_frames(params: &ParameterSet) -> Vec<FloorFrame> {
        let twist = Easing::resolve(params.twist_gradient, params.bezier.as_ref());
        let scale = Easing::resolve(params.scale_gradient, params.bezier.as_ref());
        (0..params.floors)
            .map(|floor| floor_frame(params, &twist, &scale, floor))
            .collect()
    }

    /// Generate the merged tower buffers for `params`.
    pub fn build(&mut self, params: &ParameterSet) -> Result<GeneratedMesh> {
        params.validate()?;
        let started = Instant::now();

        let options = self.options;
        let floors = params.floors;
        let sides = params.sides();
        let profile = self.cache.template(sides);

        let verts_per_floor = profile.vertex_count();
        let indices_per_floor = profile.index_count();
        let total_vertices = verts_per_floor * floors as usize;
        let total_indices = indices_per_floor * floors as usize;

        let mut positions = Vec::with_capacity(total_vertices * 3);
        let mut normals = Vec::with_capacity(if options.normals { total_vertices * 3 } else { 0 });
        let mut colors = Vec::with_capacity(total_vertices * 3);
        let mut indices = Vec::with_capacity(total_indices);

        let twist = Easing::resolve(params.twist_gradient, params.bezier.as_ref());
        let scale = Easing::resolve(params.scale_gradient, params.bezier.as_ref());
        let ramp = ColorRamp::new(params.color_start, params.color_end).with_brighten(params.brighten);

        for floor in 0..floors {
            let frame = floor_frame(params, &twist, &scale, floor);
            let matrix = frame.matrix();
            let color = ramp.at(frame.t).to_array();

            for position in &profile.positions {
                let p = matrix * Vector4::new(position[0], position[1], position[2], 1.0);
                positions.extend_from_slice(&[p.x, p.y, p.z]);
                colors.extend_from_slice(&color);
            }

            if options.normals {
                let normal_matrix =
                    inverse_transpose(&matrix).ok_or(TowerError::SingularTransform { floor })?;
                for normal in &profile.normals {
                    let n = (normal_matrix * Vector3::from(*normal)).normalize();
                    normals.extend_from_slice(&[n.x, n.y, n.z]);
                }
            }

            let base = floor * verts_per_floor as u32;
            indices.extend(profile.indices.iter().map(|&i| i + base));
        }

        debug_assert_eq!(positions.len(), total_vertices * 3);
        debug_assert_eq!(indices.len(), total_indices);

        let mesh = GeneratedMesh {
            positions,
            normals,
            colors,
            indices,
        };

        let elapsed = started.elapsed();
        let within_budget = self
            .monitor
            .record(elapsed, mesh.vertex_count(), mesh.index_count());
        debug!(
            "built tower: {} floors x {} sides -> {} vertices, {} indices in {:.2}ms",
            floors,
            sides,
            mesh.vertex_count(),
            mesh.index_count(),
            elapsed.as_secs_f32() * 1000.0
        );
        if !within_budget {
            warn!(
                "tower build took {:.2}ms, over the interactive frame budget",
                elapsed.as_secs_f32() * 1000.0
            );
        }

        Ok(mesh)
    }
}

fn floor_frame(params: &ParameterSet, twist: &Easing, scale: &Easing, floor: u32) -> FloorFrame {
    let floors = params.floors;
    let t = if floors <= 1 {
        0.0
    } else {
        floor as f32 / (floors - 1) as f32
    };

    let twist_degrees = params.twist_min + (params.twist_max - params.twist_min) * twist.evaluate(t);
    let scale_factor = params.scale_min + (params.scale_max - params.scale_min) * scale.evaluate(t);
    let radius = (params.base_radius * scale_factor).max(MIN_RADIUS);
    let thickness = params.slab_thickness.max(MIN_THICKNESS);

    let elevation = if floors <= 1 {
        0.0
    } else {
        -params.spacing.span(floors) * 0.5 + floor as f32 * params.spacing.step(floors)
    };

    FloorFrame {
        t,
        twist_degrees,
        radius,
        thickness,
        elevation,
    }
}

/// Owns the mesh currently handed to a renderer.
///
/// Replacing the mesh returns the previous one so the caller can release its
/// GPU resources; nothing is reclaimed implicitly.
#[derive(Debug, Default)]
pub struct MeshSlot {
    current: Option<GeneratedMesh>,
    generation: u64,
}

impl MeshSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&GeneratedMesh> {
        self.current.as_ref()
    }

    /// Number of meshes installed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use = "the previous mesh must be released by the caller"]
    pub fn replace(&mut self, mesh: GeneratedMesh) -> Option<GeneratedMesh> {
        self.generation += 1;
        self.current.replace(mesh)
    }

    #[must_use = "the released mesh must be disposed by the caller"]
    pub fn release(&mut self) -> Option<GeneratedMesh> {
        self.current.take()
    }

    /// Rebuild from `params` and install the result, returning the previous mesh.
    /// On error the current mesh stays in place.
    #[must_use = "the previous mesh must be released by the caller"]
    pub fn regenerate(
        &mut self,
        builder: &mut TowerMeshBuilder,
        params: &ParameterSet,
    ) -> Result<Option<GeneratedMesh>> {
        let mesh = builder.build(params)?;
        Ok(self.replace(mesh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{profile_index_count, profile_vertex_count};
    use crate::params::{FloorSpacing, GradientMode};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn all_finite(values: &[f32]) -> bool {
        values.iter().all(|v| v.is_finite())
    }

    #[test]
    fn test_buffer_sizes_match_floors_and_sides() {
        let mut builder = TowerMeshBuilder::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut cases: Vec<(u32, u32)> = vec![(1, 3), (1, 128), (500, 3), (500, 128), (2, 4)];
        for _ in 0..40 {
            cases.push((rng.random_range(1..=500), rng.random_range(3..=128)));
        }

        for (floors, sides) in cases {
            let params = ParameterSet {
                floors,
                floor_sides: sides as f32,
                ..Default::default()
            };
            let mesh = builder.build(&params).unwrap();
            let f = floors as usize;
            assert_eq!(mesh.vertex_count(), f * profile_vertex_count(sides));
            assert_eq!(mesh.index_count(), f * profile_index_count(sides));
            assert_eq!(mesh.normals.len(), mesh.positions.len());
            assert_eq!(mesh.colors.len(), mesh.positions.len());
            let max_index = *mesh.indices.iter().max().unwrap() as usize;
            assert!(max_index < mesh.vertex_count());
        }
    }

    #[test]
    fn test_single_floor_is_centered() {
        let params = ParameterSet {
            floors: 1,
            twist_min: 15.0,
            twist_max: 90.0,
            scale_min: 0.5,
            scale_max: 2.0,
            ..Default::default()
        };
        let frames = TowerMeshBuilder::floor_frames(&params);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].t, 0.0);
        assert_eq!(frames[0].elevation, 0.0);
        assert_eq!(frames[0].twist_degrees, 15.0);
        assert_eq!(frames[0].radius, params.base_radius * 0.5);

        let mesh = TowerMeshBuilder::new().build(&params).unwrap();
        assert_eq!(mesh.vertex_count(), profile_vertex_count(params.sides()));
        assert!(all_finite(&mesh.positions));
        assert!(all_finite(&mesh.normals));
        assert!(all_finite(&mesh.colors));

        let bounds = mesh.bounds().unwrap();
        assert!(bounds.center[1].abs() < 1e-5);
    }

    #[test]
    fn test_floors_stack_symmetrically() {
        let params = ParameterSet {
            floors: 5,
            spacing: FloorSpacing::PerFloor(3.0),
            ..Default::default()
        };
        let elevations: Vec<f32> = TowerMeshBuilder::floor_frames(&params)
            .iter()
            .map(|f| f.elevation)
            .collect();
        assert_eq!(elevations, vec![-6.0, -3.0, 0.0, 3.0, 6.0]);

        let params = ParameterSet {
            floors: 3,
            spacing: FloorSpacing::TotalHeight(10.0),
            ..Default::default()
        };
        let elevations: Vec<f32> = TowerMeshBuilder::floor_frames(&params)
            .iter()
            .map(|f| f.elevation)
            .collect();
        assert_eq!(elevations, vec![-5.0, 0.0, 5.0]);
    }

    #[test]
    fn test_twist_and_scale_follow_gradients() {
        let params = ParameterSet {
            floors: 3,
            twist_min: 0.0,
            twist_max: 100.0,
            scale_min: 1.0,
            scale_max: 2.0,
            twist_gradient: GradientMode::EaseIn,
            scale_gradient: GradientMode::Linear,
            ..Default::default()
        };
        let frames = TowerMeshBuilder::floor_frames(&params);
        assert!((frames[1].twist_degrees - 25.0).abs() < 1e-4);
        assert!((frames[2].twist_degrees - 100.0).abs() < 1e-4);
        assert!((frames[1].radius - params.base_radius * 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_reversed_twist_range() {
        let params = ParameterSet {
            floors: 2,
            twist_min: 90.0,
            twist_max: -90.0,
            ..Default::default()
        };
        let frames = TowerMeshBuilder::floor_frames(&params);
        assert_eq!(frames[0].twist_degrees, 90.0);
        assert_eq!(frames[1].twist_degrees, -90.0);
    }

    #[test]
    fn test_build_is_deterministic() {
        let params = ParameterSet {
            floors: 37,
            floor_sides: 7.0,
            scale_gradient: GradientMode::Bezier,
            twist_gradient: GradientMode::EaseInOut,
            ..Default::default()
        };
        let first = TowerMeshBuilder::new().build(&params).unwrap();
        let mut builder = TowerMeshBuilder::new();
        builder.build(&params).unwrap();
        let second = builder.build(&params).unwrap();

        let bits = |v: &[f32]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first.positions), bits(&second.positions));
        assert_eq!(bits(&first.normals), bits(&second.normals));
        assert_eq!(bits(&first.colors), bits(&second.colors));
        assert_eq!(first.indices, second.indices);
    }

    #[test]
    fn test_degenerate_scale_keeps_positive_radius() {
        for (min, max) in [(0.0, 0.0), (-3.0, 0.0), (0.0, 1.0)] {
            let params = ParameterSet {
                floors: 10,
                scale_min: min,
                scale_max: max,
                ..Default::default()
            };
            for frame in TowerMeshBuilder::floor_frames(&params) {
                assert!(frame.radius >= MIN_RADIUS);
            }
            let mesh = TowerMeshBuilder::new().build(&params).unwrap();
            assert!(all_finite(&mesh.positions));
            assert!(all_finite(&mesh.normals));
        }
    }

    #[test]
    fn test_floor_colors_are_uniform() {
        let params = ParameterSet {
            floors: 4,
            brighten: 0.0,
            ..Default::default()
        };
        let mesh = TowerMeshBuilder::new().build(&params).unwrap();
        let per_floor = profile_vertex_count(params.sides()) * 3;

        for floor in mesh.colors.chunks(per_floor) {
            let first = &floor[0..3];
            assert!(floor.chunks(3).all(|c| c == first));
        }

        let bottom = crate::gfx::color::Rgb::new(mesh.colors[0], mesh.colors[1], mesh.colors[2]);
        let diff = bottom
            .to_u8()
            .iter()
            .zip(params.color_start.to_u8().iter())
            .all(|(a, b)| a.abs_diff(*b) <= 1);
        assert!(diff);
    }

    #[test]
    fn test_default_build_reaches_endpoint_colors() {
        let params = ParameterSet::default();
        assert!(params.brighten > 0.0);
        let mesh = TowerMeshBuilder::new().build(&params).unwrap();

        let color_at = |v: usize| {
            crate::gfx::color::Rgb::new(mesh.colors[v * 3], mesh.colors[v * 3 + 1], mesh.colors[v * 3 + 2])
                .to_u8()
        };
        let close = |a: [u8; 3], b: [u8; 3]| a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 1);

        assert!(close(color_at(0), params.color_start.to_u8()));
        assert!(close(color_at(mesh.vertex_count() - 1), params.color_end.to_u8()));
    }

    #[test]
    fn test_normals_are_unit_and_outward() {
        let params = ParameterSet {
            floors: 6,
            floor_sides: 5.0,
            twist_max: 200.0,
            ..Default::default()
        };
        let mesh = TowerMeshBuilder::new().build(&params).unwrap();
        for n in mesh.normals.chunks(3) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }

        // Side normals keep pointing away from the tower axis after scaling and twist
        let per_floor = profile_vertex_count(5);
        let band = 2 * (5 + 1);
        for floor in 0..6 {
            for i in 0..band {
                let v = floor * per_floor + i;
                let p = mesh.position(v);
                let n = &mesh.normals[v * 3..v * 3 + 3];
                assert!(p[0] * n[0] + p[2] * n[2] > 0.0);
            }
        }
    }

    #[test]
    fn test_build_without_normals() {
        let mut builder = TowerMeshBuilder::new().with_options(BuildOptions { normals: false });
        let mesh = builder.build(&ParameterSet::default()).unwrap();
        assert!(mesh.normals.is_empty());
        assert!(!mesh.has_normals());

        let vertices = mesh.to_vertices();
        assert_eq!(vertices.len(), mesh.vertex_count());
        assert!(vertices.iter().all(|v| v.normal.iter().all(|c| c.is_finite())));
        assert_eq!(
            mesh.vertex_bytes().len(),
            mesh.vertex_count() * TowerVertex::STRIDE
        );
        assert_eq!(mesh.index_bytes().len(), mesh.index_count() * 4);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = ParameterSet {
            floors: 0,
            ..Default::default()
        };
        assert!(matches!(
            TowerMeshBuilder::new().build(&params),
            Err(TowerError::Config(_))
        ));
    }

    #[test]
    fn test_cache_is_reused_across_builds() {
        let mut builder = TowerMeshBuilder::new();
        let params = ParameterSet::default();
        builder.build(&params).unwrap();
        builder.build(&params).unwrap();
        assert_eq!(builder.cache().len(), 1);
        assert_eq!(builder.cache().stats(), (1, 1));
        assert_eq!(builder.monitor().metrics().builds, 2);
    }

    #[test]
    fn test_prewarmed_cache_is_kept() {
        let mut cache = BaseProfileCache::new();
        cache.profile(6.0);
        cache.profile(4.0);

        let mut builder = TowerMeshBuilder::with_cache(cache);
        builder.build(&ParameterSet::default()).unwrap();
        assert_eq!(builder.cache().stats(), (1, 2));

        let cache = builder.into_cache();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_recomputed_normals_on_cap() {
        let mesh = TowerMeshBuilder::new()
            .build(&ParameterSet {
                floors: 1,
                ..Default::default()
            })
            .unwrap();
        let recomputed = mesh.recompute_normals();
        let sides = 6usize;
        // first top-cap center vertex follows the side band
        let top_center = 2 * (sides + 1);
        let n = &recomputed[top_center * 3..top_center * 3 + 3];
        assert!((n[1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_mesh_slot_hands_back_previous() {
        let mut builder = TowerMeshBuilder::new();
        let mut slot = MeshSlot::new();
        let params = ParameterSet {
            floors: 3,
            ..Default::default()
        };

        assert!(slot.regenerate(&mut builder, &params).unwrap().is_none());
        let previous = slot.regenerate(&mut builder, &params).unwrap();
        assert!(previous.is_some());
        assert_eq!(slot.generation(), 2);

        let bad = ParameterSet {
            base_radius: 0.0,
            ..params.clone()
        };
        assert!(slot.regenerate(&mut builder, &bad).is_err());
        assert!(slot.current().is_some());

        assert!(slot.release().is_some());
        assert!(slot.current().is_none());
    }
}
