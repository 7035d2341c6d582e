//! # OBJ Export
//!
//! Serializes a generated tower to Wavefront OBJ text with per-vertex colors.
//!
//! ## Axis Convention
//!
//! Towers are built Y-up. On export every position and normal is remapped with the
//! fixed rule `(x, y, z) -> (x, z, -y)` so the vertical axis becomes the depth axis
//! and the tower stands upright in Z-up tools. The remap is noted in the file header.
//!
//! ## Format
//!
//! ```text
//! # header comments
//! v <x> <y> <z> <r> <g> <b>
//! vn <x> <y> <z>
//! f <a>//<a> <b>//<b> <c>//<c>
//! ```
//!
//! Values are written with 6 decimals and faces are 1-indexed. Without normals,
//! faces fall back to `f a b c`.

use std::io::{self, BufReader, Write};
use std::path::Path;

use log::info;

use crate::error::ExportError;
use crate::gfx::tower::{compute_vertex_normals, GeneratedMesh};

/// Header line documenting the axis remap.
pub const AXIS_NOTE: &str = "# Axis remap: (x, y, z) -> (x, z, -y), vertical Y becomes Z";

/// Y-up to Z-up remap applied to positions and normals.
pub fn remap_axes([x, y, z]: [f32; 3]) -> [f32; 3] {
    [x, z, -y]
}

/// Values that round to zero at 6 decimals print as `0.000000`, never `-0.000000`.
fn canonical(v: f32) -> f32 {
    if (v * 1e6).round() == 0.0 {
        0.0
    } else {
        v
    }
}

/// Export switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Write `vn` lines and `a//a` face references.
    pub normals: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { normals: true }
    }
}

/// Writes [`GeneratedMesh`] buffers as OBJ text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshExporter {
    options: ExportOptions,
}

impl MeshExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Serialize `mesh` to an OBJ string.
    ///
    /// Normals are always recomputed from the current positions and triangles, so a
    /// mesh built without normals still exports consistent ones.
    pub fn export(&self, mesh: &GeneratedMesh) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        self.write_to(mesh, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Serialize `mesh` into `writer`. Preconditions are checked before anything is
    /// written.
    pub fn write_to<W: Write>(&self, mesh: &GeneratedMesh, writer: &mut W) -> Result<(), ExportError> {
        validate(mesh)?;

        let vertex_count = mesh.vertex_count();
        let normals = if self.options.normals {
            Some(compute_vertex_normals(&mesh.positions, &mesh.indices))
        } else {
            None
        };

        writeln!(writer, "# Parametric tower OBJ export")?;
        writeln!(writer, "{AXIS_NOTE}")?;
        writeln!(writer, "# Columns: v x y z r g b")?;
        writeln!(
            writer,
            "# Vertices: {}, Triangles: {}",
            vertex_count,
            mesh.triangle_count()
        )?;

        for i in 0..vertex_count {
            let [x, y, z] = remap_axes(mesh.position(i)).map(canonical);
            let [r, g, b] = if mesh.has_colors() {
                [mesh.colors[i * 3], mesh.colors[i * 3 + 1], mesh.colors[i * 3 + 2]]
            } else {
                [1.0, 1.0, 1.0]
            }
            .map(canonical);
            writeln!(writer, "v {x:.6} {y:.6} {z:.6} {r:.6} {g:.6} {b:.6}")?;
        }

        if let Some(normals) = &normals {
            for n in normals.chunks_exact(3) {
                let [x, y, z] = remap_axes([n[0], n[1], n[2]]).map(canonical);
                writeln!(writer, "vn {x:.6} {y:.6} {z:.6}")?;
            }
        }

        for triangle in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0] + 1, triangle[1] + 1, triangle[2] + 1];
            if normals.is_some() {
                writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
            } else {
                writeln!(writer, "f {a} {b} {c}")?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// Export to a file. Nothing is written when a precondition fails.
    pub fn save(&self, mesh: &GeneratedMesh, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let text = self.export(mesh)?;
        std::fs::write(path, text)?;
        info!(
            "exported {} vertices, {} triangles to {}",
            mesh.vertex_count(),
            mesh.triangle_count(),
            path.display()
        );
        Ok(())
    }
}

fn validate(mesh: &GeneratedMesh) -> Result<(), ExportError> {
    let vertex_count = mesh.vertex_count();
    if vertex_count == 0 {
        return Err(ExportError::EmptyMesh);
    }
    if mesh.indices.len() % 3 != 0 {
        return Err(ExportError::MalformedIndices {
            len: mesh.indices.len(),
        });
    }
    if let Some(&index) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(ExportError::IndexOutOfRange {
            index,
            vertex_count,
        });
    }
    Ok(())
}

/// What a reparsed OBJ blob contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjSummary {
    pub models: usize,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub has_normals: bool,
    pub has_colors: bool,
}

/// Reads OBJ text back with `tobj`, e.g. to verify an export.
pub fn parse_obj(text: &str) -> Result<ObjSummary, ExportError> {
    let mut reader = BufReader::new(io::Cursor::new(text.as_bytes()));
    let (models, _materials) = tobj::load_obj_buf(
        &mut reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_: &Path| Err(tobj::LoadError::OpenFileFailed),
    )?;

    let mut summary = ObjSummary {
        models: models.len(),
        vertex_count: 0,
        triangle_count: 0,
        has_normals: false,
        has_colors: false,
    };
    for model in &models {
        let mesh = &model.mesh;
        summary.vertex_count += mesh.positions.len() / 3;
        summary.triangle_count += mesh.indices.len() / 3;
        summary.has_normals |= !mesh.normals.is_empty();
        summary.has_colors |= !mesh.vertex_color.is_empty();
    }
    Ok(summary)
}

/// Load an OBJ file and summarize it.
pub fn verify_file(path: impl AsRef<Path>) -> Result<ObjSummary, ExportError> {
    let text = std::fs::read_to_string(path)?;
    parse_obj(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_mesh() -> GeneratedMesh {
        GeneratedMesh::from_buffers(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, -1.0],
            Vec::new(),
            vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_remap_axes() {
        assert_eq!(remap_axes([1.0, 2.0, 3.0]), [1.0, 3.0, -2.0]);
    }

    #[test]
    fn test_triangle_export_lines() {
        let text = MeshExporter::new().export(&triangle_mesh()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines.contains(&AXIS_NOTE));
        assert!(lines.contains(&"v 1.000000 0.000000 0.000000 0.000000 1.000000 0.000000"));
        assert!(lines.contains(&"v 0.000000 -1.000000 0.000000 0.000000 0.000000 1.000000"));
        assert!(lines.contains(&"f 1//1 2//2 3//3"));

        // Triangle lies in the Y = 0 plane facing +Y, which maps to -Z
        let normals: Vec<&&str> = lines.iter().filter(|l| l.starts_with("vn ")).collect();
        assert_eq!(normals.len(), 3);
        assert!(normals.iter().all(|l| **l == "vn 0.000000 0.000000 -1.000000"));
    }

    #[test]
    fn test_export_without_normals() {
        let exporter = MeshExporter::with_options(ExportOptions { normals: false });
        let text = exporter.export(&triangle_mesh()).unwrap();
        assert!(!text.contains("vn "));
        assert!(text.lines().any(|l| l == "f 1 2 3"));
    }

    #[test]
    fn test_missing_colors_default_to_white() {
        let mut mesh = triangle_mesh();
        mesh.colors.clear();
        let text = MeshExporter::new().export(&mesh).unwrap();
        assert!(text.lines().any(|l| l == "v 0.000000 0.000000 0.000000 1.000000 1.000000 1.000000"));
    }

    #[test]
    fn test_precondition_errors() {
        let exporter = MeshExporter::new();
        assert!(matches!(
            exporter.export(&GeneratedMesh::default()),
            Err(ExportError::EmptyMesh)
        ));

        let mut mesh = triangle_mesh();
        mesh.indices.push(0);
        assert!(matches!(
            exporter.export(&mesh),
            Err(ExportError::MalformedIndices { len: 4 })
        ));

        let mut mesh = triangle_mesh();
        mesh.indices[2] = 9;
        assert!(matches!(
            exporter.export(&mesh),
            Err(ExportError::IndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_failed_save_writes_nothing() {
        let path = std::env::temp_dir().join("tower_forge_empty_export.obj");
        let _ = std::fs::remove_file(&path);
        assert!(MeshExporter::new().save(&GeneratedMesh::default(), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_zero_is_never_signed() {
        assert_eq!(format!("{:.6}", canonical(-0.0)), "0.000000");
        assert_eq!(format!("{:.6}", canonical(-2e-7)), "0.000000");
        assert_eq!(format!("{:.6}", canonical(-0.25)), "-0.250000");

        let text = MeshExporter::new().export(&triangle_mesh()).unwrap();
        assert!(!text.contains("-0.000000"));
    }

    #[test]
    fn test_saved_file_verifies() {
        let path = std::env::temp_dir().join("tower_forge_triangle_export.obj");
        MeshExporter::new().save(&triangle_mesh(), &path).unwrap();
        let summary = verify_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(summary.vertex_count, 3);
        assert_eq!(summary.triangle_count, 1);
        assert!(summary.has_colors);
    }

    #[test]
    fn test_verify_missing_file() {
        let path = std::env::temp_dir().join("tower_forge_does_not_exist.obj");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(verify_file(&path), Err(ExportError::Io(_))));
    }

    #[test]
    fn test_parse_triangle() {
        let text = MeshExporter::new().export(&triangle_mesh()).unwrap();
        let summary = parse_obj(&text).unwrap();
        assert_eq!(summary.vertex_count, 3);
        assert_eq!(summary.triangle_count, 1);
        assert!(summary.has_normals);
        assert!(summary.has_colors);
    }
}
