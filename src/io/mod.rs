//! Mesh and brick file I/O.
//!
//! Two formats are supported, selected by file extension:
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Wavefront OBJ subset | `.obj` | ✓ | ✓ | `v`/`f` records, one group, triangles only |
//! | Binary brick | `.brk` | ✓ | ✓ | little-endian, see [`brk`] |
//!
//! ```no_run
//! use brickgrid::io::{load_mesh, save_brick};
//! use brickgrid::brick::Brick;
//!
//! let mesh = load_mesh("model.obj").unwrap();
//! save_brick(&Brick::empty(), "out0.brk").unwrap();
//! ```

pub mod brk;
pub mod obj;

use std::path::Path;

use crate::brick::Brick;
use crate::error::{GridError, Result};
use crate::mesh::TriMesh;

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ text format (the `v`/`f` subset).
    Obj,
    /// Binary brick format.
    Brk,
}

impl Format {
    /// Detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            "brk" => Some(Format::Brk),
            _ => None,
        }
    }

    /// Detect format from a file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }

    /// Canonical file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Obj => "obj",
            Format::Brk => "brk",
        }
    }
}

fn detect_format(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| GridError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a mesh from a file with automatic format detection.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<TriMesh> {
    let path = path.as_ref();
    match detect_format(path)? {
        Format::Obj => obj::load(path),
        Format::Brk => brk::load(path),
    }
}

/// Save a brick to a file with automatic format detection.
pub fn save_brick<P: AsRef<Path>>(brick: &Brick, path: P) -> Result<()> {
    let path = path.as_ref();
    match detect_format(path)? {
        Format::Obj => obj::save(brick, path),
        Format::Brk => brk::save(brick, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_extension("obj"), Some(Format::Obj));
        assert_eq!(Format::from_extension("OBJ"), Some(Format::Obj));
        assert_eq!(Format::from_extension("brk"), Some(Format::Brk));
        assert_eq!(Format::from_extension("stl"), None);
        assert_eq!(Format::from_path("bricks/cell17.brk"), Some(Format::Brk));
        assert_eq!(Format::from_path("noextension"), None);
    }

    #[test]
    fn test_unknown_extension_is_an_error() {
        assert!(matches!(
            load_mesh("mesh.xyz"),
            Err(GridError::UnsupportedFormat { .. })
        ));
    }
}
