//! Binary brick format.
//!
//! Little-endian layout, used both for per-cell outputs and as a fast
//! pre-parsed input format:
//!
//! ```text
//! offset 0:                     u64 vertex_count
//! offset 8:                     u64 face_count
//! offset 16:                    f32[3] * vertex_count   (x, y, z)
//! offset 16 + 12*vertex_count:  u64[3] * face_count     (0-based vertex ids)
//! ```
//!
//! The writer emits a zeroed header first, streams the vertex and face
//! records, then seeks back to offset 0 and patches in the true counts.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use nalgebra::Point3;

use crate::brick::Brick;
use crate::error::{GridError, Result};
use crate::mesh::TriMesh;

const HEADER_SIZE: usize = 16;
const VERTEX_SIZE: usize = 12;
const FACE_SIZE: usize = 24;

/// Load a mesh from a binary brick file.
///
/// Validates the declared counts against the actual file size and every
/// face index against the vertex count before building the mesh.
pub fn load<P: AsRef<Path>>(path: P) -> Result<TriMesh> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    let truncated = |what: &str| GridError::LoadError {
        path: path.to_path_buf(),
        message: format!("file truncated: {what}"),
    };

    if bytes.len() < HEADER_SIZE {
        return Err(truncated("missing header"));
    }
    let vertex_count = u64::from_le_bytes(bytes[0..8].try_into().unwrap()) as usize;
    let face_count = u64::from_le_bytes(bytes[8..16].try_into().unwrap()) as usize;

    // Header counts are untrusted; the size computation must not overflow
    let expected = vertex_count
        .checked_mul(VERTEX_SIZE)
        .and_then(|v| v.checked_add(face_count.checked_mul(FACE_SIZE)?))
        .and_then(|body| body.checked_add(HEADER_SIZE));
    let Some(expected) = expected else {
        return Err(GridError::LoadError {
            path: path.to_path_buf(),
            message: format!(
                "header declares {vertex_count} vertices and {face_count} faces, \
                 larger than any possible file"
            ),
        });
    };
    if bytes.len() < expected {
        return Err(truncated(&format!(
            "expected {expected} bytes for {vertex_count} vertices and {face_count} faces, got {}",
            bytes.len()
        )));
    }

    let mut positions = Vec::with_capacity(vertex_count);
    let mut offset = HEADER_SIZE;
    for _ in 0..vertex_count {
        let mut coords = [0.0f32; 3];
        for c in &mut coords {
            *c = f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap());
            offset += 4;
        }
        positions.push(Point3::new(coords[0], coords[1], coords[2]));
    }

    let mut indices = Vec::with_capacity(face_count * 3);
    for _ in 0..face_count * 3 {
        let id = u64::from_le_bytes(bytes[offset..offset + 8].try_into().unwrap());
        offset += 8;
        indices.push(id as usize);
    }

    TriMesh::from_buffers(positions, indices).map_err(|e| GridError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Save a brick to a binary brick file.
///
/// An empty brick produces a valid 16-byte file with zero counts.
pub fn save<P: AsRef<Path>>(brick: &Brick, path: P) -> Result<()> {
    let path = path.as_ref();
    let save_error = |e: std::io::Error| GridError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let file = File::create(path).map_err(save_error)?;
    let mut writer = BufWriter::new(file);

    // Placeholder header, patched once the body has been streamed
    writer.write_all(&[0u8; HEADER_SIZE]).map_err(save_error)?;

    let mut vertex_count = 0u64;
    for p in brick.positions() {
        for c in [p.x, p.y, p.z] {
            writer.write_all(&c.to_le_bytes()).map_err(save_error)?;
        }
        vertex_count += 1;
    }

    let mut face_count = 0u64;
    for face in brick.faces() {
        for &v in face {
            writer.write_all(&(v as u64).to_le_bytes()).map_err(save_error)?;
        }
        face_count += 1;
    }

    writer.seek(SeekFrom::Start(0)).map_err(save_error)?;
    writer.write_all(&vertex_count.to_le_bytes()).map_err(save_error)?;
    writer.write_all(&face_count.to_le_bytes()).map_err(save_error)?;
    writer.flush().map_err(save_error)?;

    Ok(())
}
