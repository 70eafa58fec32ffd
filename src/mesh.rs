//! Indexed triangle mesh storage.
//!
//! A [`TriMesh`] owns a pair of flat buffers: vertex positions and a flat
//! triangle index buffer (three consecutive entries per triangle). It is
//! immutable once built and is shared read-only across all grid cells
//! during gridding.

use nalgebra::Point3;

use crate::error::{GridError, Result};
use crate::geom::{self, Aabb};

/// An indexed triangle mesh.
///
/// # Example
///
/// ```
/// use brickgrid::mesh::TriMesh;
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let mesh = TriMesh::from_buffers(positions, vec![0, 1, 2]).unwrap();
/// assert_eq!(mesh.num_triangles(), 1);
/// assert_eq!(mesh.triangle(0), [0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct TriMesh {
    positions: Vec<Point3<f32>>,
    indices: Vec<usize>,
}

impl TriMesh {
    /// Build a mesh from a vertex position buffer and a flat triangle index
    /// buffer (three indices per triangle).
    ///
    /// Fails if the index buffer length is not a multiple of three, or if
    /// any index is out of range for the position buffer.
    pub fn from_buffers(positions: Vec<Point3<f32>>, indices: Vec<usize>) -> Result<TriMesh> {
        if indices.len() % 3 != 0 {
            return Err(GridError::UnsupportedMeshStructure {
                details: format!(
                    "index buffer length {} is not a multiple of 3",
                    indices.len()
                ),
            });
        }
        for (t, tri) in indices.chunks_exact(3).enumerate() {
            for &v in tri {
                if v >= positions.len() {
                    return Err(GridError::InvalidVertexIndex {
                        triangle: t,
                        vertex: v,
                    });
                }
            }
        }
        Ok(TriMesh { positions, indices })
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// True if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The vertex position buffer.
    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    /// The flat triangle index buffer.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Position of vertex `v`.
    pub fn position(&self, v: usize) -> &Point3<f32> {
        &self.positions[v]
    }

    /// The three vertex indices of triangle `t`.
    pub fn triangle(&self, t: usize) -> [usize; 3] {
        [
            self.indices[3 * t],
            self.indices[3 * t + 1],
            self.indices[3 * t + 2],
        ]
    }

    /// The three vertex positions of triangle `t`.
    pub fn triangle_positions(&self, t: usize) -> [Point3<f32>; 3] {
        let [a, b, c] = self.triangle(t);
        [self.positions[a], self.positions[b], self.positions[c]]
    }

    /// Area of triangle `t`. Zero for degenerate triangles.
    pub fn triangle_area(&self, t: usize) -> f32 {
        let [a, b, c] = self.triangle_positions(t);
        geom::triangle_area(&a, &b, &c)
    }

    /// Compute the axis-aligned bounding box of all vertices.
    ///
    /// Folds [`Aabb::extend`] over the position buffer; the result is the
    /// tightest box containing every vertex. An empty mesh yields the
    /// canonical empty box, which callers must reject before planning a
    /// grid over it.
    pub fn bounds(&self) -> Aabb {
        let mut bounds = Aabb::empty();
        for p in &self.positions {
            bounds.extend(p);
        }
        bounds
    }
}
