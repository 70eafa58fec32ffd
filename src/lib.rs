//! # Brickgrid
//!
//! Partition a triangulated surface mesh onto a regular 3D grid and emit
//! each cell's geometry as a standalone "brick" mesh.
//!
//! Given a mesh and requested cell counts `(nx, ny, nz)`, the pipeline
//! computes the mesh bounding box, overlays the grid, assigns every
//! triangle to every cell it geometrically intersects (exact separating
//! axis test, so boundary-straddling triangles land in all the cells they
//! touch), and writes one self-contained sub-mesh per cell with a
//! deduplicated vertex set and remapped indices.
//!
//! ## Quick Start
//!
//! ```no_run
//! use brickgrid::prelude::*;
//!
//! // Load a mesh (format picked by extension: .obj or .brk)
//! let mesh = brickgrid::io::load_mesh("model.obj").unwrap();
//!
//! // Plan a 4x4x4 grid over its bounds
//! let grid = Grid::plan(&mesh.bounds(), 4, 4, 4).unwrap();
//!
//! // Write one brick file per cell: out0.brk .. out63.brk
//! let cells = write_bricks(&mesh, &grid, "out", Format::Brk, &GridOptions::default()).unwrap();
//! assert_eq!(cells, 64);
//! ```
//!
//! ## In-memory use
//!
//! ```
//! use brickgrid::prelude::*;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 1.0),
//! ];
//! let mesh = TriMesh::from_buffers(positions, vec![0, 1, 2]).unwrap();
//! let grid = Grid::plan(&mesh.bounds(), 2, 1, 1).unwrap();
//!
//! let bricks = grid_into_bricks(&mesh, &grid, &GridOptions::default());
//! assert_eq!(bricks.len(), 2);
//! // The triangle crosses x = 0.5, so both cells own a copy of it
//! assert_eq!(bricks[0].num_faces(), 1);
//! assert_eq!(bricks[1].num_faces(), 1);
//! ```
//!
//! The mesh is shared read-only across cells; each cell's working state is
//! task-local, so the fan-out runs data-parallel with no locking.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assign;
pub mod brick;
pub mod error;
pub mod geom;
pub mod grid;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// ```
/// use brickgrid::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assign::{assign_cell, grid_into_bricks, write_bricks, GridOptions};
    pub use crate::brick::Brick;
    pub use crate::error::{GridError, Result};
    pub use crate::geom::{triangle_box_intersects, Aabb};
    pub use crate::grid::Grid;
    pub use crate::io::Format;
    pub use crate::mesh::TriMesh;
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_tetrahedron_end_to_end() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let indices = vec![
            0, 2, 1, // bottom
            0, 1, 3, // front
            1, 2, 3, // right
            2, 0, 3, // left
        ];
        let mesh = TriMesh::from_buffers(positions, indices).unwrap();
        let grid = Grid::plan(&mesh.bounds(), 2, 2, 2).unwrap();

        let bricks = grid_into_bricks(&mesh, &grid, &GridOptions::default());
        assert_eq!(bricks.len(), 8);

        // Every triangle appears in at least one cell, and every brick's
        // faces index only its own vertices
        let total_faces: usize = bricks.iter().map(|b| b.num_faces()).sum();
        assert!(total_faces >= mesh.num_triangles());
        for brick in &bricks {
            for face in brick.faces() {
                for &v in face {
                    assert!(v < brick.num_vertices());
                }
            }
        }
    }
}
