//! # Vertex Data Structures
//!
//! GPU-ready interleaved vertex format for handing a generated tower to a renderer.

/// A tower vertex with position, normal and per-floor color.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, which is required for GPU buffer operations. The stride is 36 bytes:
/// position at offset 0, normal at 12, color at 24.
///
/// # Examples
///
/// ```
/// use tower_forge::gfx::vertex::TowerVertex;
///
/// let vertex = TowerVertex {
///     position: [0.0, 1.0, 0.0],
///     normal: [0.0, 1.0, 0.0],
///     color: [1.0, 0.5, 0.25],
/// };
/// let bytes: &[u8] = bytemuck::bytes_of(&vertex);
/// assert_eq!(bytes.len(), TowerVertex::STRIDE);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TowerVertex {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// sRGB color [r, g, b] in 0..1, uniform across a floor
    pub color: [f32; 3],
}

impl TowerVertex {
    pub const STRIDE: usize = std::mem::size_of::<TowerVertex>();
    pub const NORMAL_OFFSET: usize = std::mem::size_of::<[f32; 3]>();
    pub const COLOR_OFFSET: usize = 2 * std::mem::size_of::<[f32; 3]>();
}
