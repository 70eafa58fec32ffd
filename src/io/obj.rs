//! Wavefront OBJ support (the `v`/`f` subset).
//!
//! The loader handles exactly the structure the gridder can process: one
//! group of triangular faces. A second `g`/`o` group or a second `usemtl`
//! material switch is rejected, as are faces with more or fewer than three
//! vertices. Face elements may use the `v`, `v/vt`, `v//vn` or `v/vt/vn`
//! syntax; only the leading position index is kept.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;

use crate::brick::Brick;
use crate::error::{GridError, Result};
use crate::mesh::TriMesh;

/// Load a mesh from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use brickgrid::io::obj;
///
/// let mesh = obj::load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<TriMesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let parse_error = |line: usize, message: String| GridError::LoadError {
        path: path.to_path_buf(),
        message: format!("line {line}: {message}"),
    };

    let mut positions: Vec<Point3<f32>> = Vec::new();
    let mut indices: Vec<usize> = Vec::new();
    let mut groups = 0usize;
    let mut materials = 0usize;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = lineno + 1;
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        match keyword {
            "v" => {
                let mut coord = |axis: &str| -> Result<f32> {
                    tokens
                        .next()
                        .ok_or_else(|| parse_error(lineno, format!("vertex missing {axis}")))?
                        .parse::<f32>()
                        .map_err(|e| parse_error(lineno, format!("bad {axis} coordinate: {e}")))
                };
                let (x, y, z) = (coord("x")?, coord("y")?, coord("z")?);
                positions.push(Point3::new(x, y, z));
            }
            "f" => {
                let elements: Vec<&str> = tokens.collect();
                if elements.len() != 3 {
                    return Err(GridError::NonTriangularFace {
                        line: lineno,
                        vertex_count: elements.len(),
                    });
                }
                for element in elements {
                    // "7/1/3" -> position index 7
                    let id = element
                        .split('/')
                        .next()
                        .unwrap_or(element)
                        .parse::<usize>()
                        .map_err(|e| parse_error(lineno, format!("bad face index: {e}")))?;
                    if id < 1 {
                        return Err(parse_error(lineno, "face indices are 1-based".to_string()));
                    }
                    indices.push(id - 1);
                }
            }
            "g" | "o" => {
                groups += 1;
                if groups > 1 {
                    return Err(GridError::UnsupportedMeshStructure {
                        details: format!("line {lineno}: multiple groups are not supported"),
                    });
                }
            }
            "usemtl" => {
                materials += 1;
                if materials > 1 {
                    return Err(GridError::UnsupportedMeshStructure {
                        details: format!(
                            "line {lineno}: multiple material groups are not supported"
                        ),
                    });
                }
            }
            // Comments, normals, texcoords, mtllib, smoothing groups
            _ => {}
        }
    }

    TriMesh::from_buffers(positions, indices)
}

/// Save a brick as an OBJ file: one `v x y z` line per unique vertex, then
/// one `f i j k` line per face with 1-based indices.
///
/// An empty brick produces an empty (but valid) file.
pub fn save<P: AsRef<Path>>(brick: &Brick, path: P) -> Result<()> {
    let path = path.as_ref();
    let save_error = |e: std::io::Error| GridError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let file = File::create(path).map_err(save_error)?;
    let mut writer = BufWriter::new(file);

    for p in brick.positions() {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z).map_err(save_error)?;
    }
    for face in brick.faces() {
        writeln!(writer, "f {} {} {}", face[0] + 1, face[1] + 1, face[2] + 1)
            .map_err(save_error)?;
    }
    writer.flush().map_err(save_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::TriMesh;
    use std::io::Write as _;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_simple() {
        let file = write_temp(
            "# a triangle\n\
             v 0 0 0\n\
             v 1 0 0\n\
             v 0.5 1 0\n\
             f 1 2 3\n",
        );
        let mesh = load(file.path()).unwrap();
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_triangles(), 1);
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
        assert_eq!(*mesh.position(2), Point3::new(0.5, 1.0, 0.0));
    }

    #[test]
    fn test_load_slash_face_elements() {
        let file = write_temp(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             vn 0 0 1\n\
             f 1//1 2//1 3//1\n",
        );
        let mesh = load(file.path()).unwrap();
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
    }

    #[test]
    fn test_rejects_quad_face() {
        let file = write_temp("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        assert!(matches!(
            load(file.path()),
            Err(GridError::NonTriangularFace {
                line: 5,
                vertex_count: 4
            })
        ));
    }

    #[test]
    fn test_rejects_multiple_groups() {
        let file = write_temp("g first\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\ng second\n");
        assert!(matches!(
            load(file.path()),
            Err(GridError::UnsupportedMeshStructure { .. })
        ));
    }

    #[test]
    fn test_single_group_is_fine() {
        let file = write_temp("o thing\nusemtl steel\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert!(load(file.path()).is_ok());
    }

    #[test]
    fn test_rejects_malformed_vertex() {
        let file = write_temp("v 0 zero 0\n");
        assert!(matches!(
            load(file.path()),
            Err(GridError::LoadError { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_face_index() {
        let file = write_temp("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n");
        assert!(load(file.path()).is_err());
    }

    #[test]
    fn test_save_load_round_trip() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.25),
        ];
        let mesh = TriMesh::from_buffers(positions, vec![0, 1, 2]).unwrap();
        let brick = Brick::build(&mesh, &[0]);

        let file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        save(&brick, file.path()).unwrap();
        let reloaded = load(file.path()).unwrap();

        assert_eq!(reloaded.num_vertices(), 3);
        assert_eq!(reloaded.num_triangles(), 1);
        assert_eq!(reloaded.positions(), brick.positions());
        assert_eq!(reloaded.triangle(0), [0, 1, 2]);
    }

    #[test]
    fn test_save_to_missing_directory_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.obj");
        assert!(matches!(
            save(&Brick::empty(), &path),
            Err(GridError::SaveError { .. })
        ));
    }

    #[test]
    fn test_empty_brick_writes_valid_file() {
        let file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        save(&Brick::empty(), file.path()).unwrap();
        let mesh = load(file.path()).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.num_triangles(), 0);
    }
}
