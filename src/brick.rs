//! Per-cell brick construction: vertex dedup and index remapping.
//!
//! A brick is the standalone sub-mesh emitted for one grid cell. Building
//! one walks the cell's triangles in order, assigns each distinct vertex
//! position a fresh local id in first-seen order, and rewrites the faces
//! against that local index space. Dedup is keyed on the exact
//! floating-point position, not the original vertex index, so two global
//! vertices sharing a position (seam duplicates) fold into one local
//! vertex.

use std::collections::{BTreeMap, HashMap};

use nalgebra::Point3;
use ordered_float::OrderedFloat;

use crate::geom;
use crate::mesh::TriMesh;

type PositionKey = [OrderedFloat<f32>; 3];

fn position_key(p: &Point3<f32>) -> PositionKey {
    [OrderedFloat(p.x), OrderedFloat(p.y), OrderedFloat(p.z)]
}

/// A standalone sub-mesh for one grid cell: unique vertex positions plus
/// faces remapped into the local 0-based index space.
///
/// The OBJ writer adds one to each face index on the way out; the binary
/// writer emits them as stored.
#[derive(Debug, Clone, Default)]
pub struct Brick {
    positions: Vec<Point3<f32>>,
    faces: Vec<[usize; 3]>,
}

impl Brick {
    /// An empty brick (zero vertices, zero faces). Cells with no
    /// intersecting triangles still produce one, and it still serializes
    /// to a valid file.
    pub fn empty() -> Brick {
        Brick::default()
    }

    /// Build a brick from the triangles of `mesh` listed in `triangles`
    /// (global triangle indices, visited in the given order).
    ///
    /// Out-of-range triangle indices are a contract violation by the
    /// caller and panic via slice indexing.
    pub fn build(mesh: &TriMesh, triangles: &[usize]) -> Brick {
        let mut remapped: BTreeMap<PositionKey, usize> = BTreeMap::new();
        let mut local_of_global: HashMap<usize, usize> = HashMap::new();
        let mut positions = Vec::new();

        for &t in triangles {
            for v in mesh.triangle(t) {
                let p = mesh.position(v);
                let local = match remapped.entry(position_key(p)) {
                    std::collections::btree_map::Entry::Occupied(e) => *e.get(),
                    std::collections::btree_map::Entry::Vacant(e) => {
                        let id = positions.len();
                        positions.push(*p);
                        *e.insert(id)
                    }
                };
                local_of_global.insert(v, local);
            }
        }

        let faces = triangles
            .iter()
            .map(|&t| mesh.triangle(t).map(|v| local_of_global[&v]))
            .collect();

        Brick { positions, faces }
    }

    /// Build a brick from a raw triangle soup, skipping zero-area
    /// triangles.
    ///
    /// This is the ingestion path for isosurface-extraction output, whose
    /// triangle soups routinely contain degenerate triangles; those are
    /// dropped entirely (neither their faces nor their vertices are
    /// emitted).
    pub fn from_triangle_soup(positions: &[Point3<f32>], triangles: &[[usize; 3]]) -> Brick {
        let mut remapped: BTreeMap<PositionKey, usize> = BTreeMap::new();
        let mut unique = Vec::new();
        let mut faces = Vec::new();

        for tri in triangles {
            let [a, b, c] = tri.map(|v| positions[v]);
            if geom::triangle_area(&a, &b, &c) == 0.0 {
                continue;
            }
            let face = [a, b, c].map(|p| match remapped.entry(position_key(&p)) {
                std::collections::btree_map::Entry::Occupied(e) => *e.get(),
                std::collections::btree_map::Entry::Vacant(e) => {
                    let id = unique.len();
                    unique.push(p);
                    *e.insert(id)
                }
            });
            faces.push(face);
        }

        Brick {
            positions: unique,
            faces,
        }
    }

    /// Number of unique vertex positions.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// True if the brick holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.faces.is_empty()
    }

    /// Unique vertex positions in local-id order.
    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    /// Faces as triples of 0-based local vertex ids, in input order.
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }
}
