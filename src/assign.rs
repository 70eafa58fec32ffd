//! Cell assignment and the whole-grid fan-out.
//!
//! Every grid cell is an independent unit of work: scan the shared
//! read-only mesh for triangles intersecting the cell's box, build a brick
//! from them, and (optionally) write it out. Cells share no mutable state,
//! so the fan-out is a plain data-parallel map over the linear cell range.

use rayon::prelude::*;

use crate::brick::Brick;
use crate::error::Result;
use crate::geom::{triangle_box_intersects, Aabb};
use crate::grid::Grid;
use crate::io::{self, Format};
use crate::mesh::TriMesh;

/// Options for the whole-grid fan-out.
#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Whether to process cells in parallel (default: true).
    pub parallel: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl GridOptions {
    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Collect the indices of all triangles in `mesh` that intersect `cell`.
///
/// Scans triangles in ascending index order; the result preserves that
/// order. A triangle straddling a cell boundary is legitimately returned
/// for every cell it touches.
pub fn assign_cell(mesh: &TriMesh, cell: &Aabb) -> Vec<usize> {
    (0..mesh.num_triangles())
        .filter(|&t| {
            let [a, b, c] = mesh.triangle_positions(t);
            triangle_box_intersects(&a, &b, &c, cell)
        })
        .collect()
}

/// Build one brick per grid cell, indexed by linear cell id.
///
/// The output is invariant to the execution order and degree of
/// parallelism: each cell's brick depends only on the shared mesh and
/// that cell's bounds.
pub fn grid_into_bricks(mesh: &TriMesh, grid: &Grid, options: &GridOptions) -> Vec<Brick> {
    let build = |cell: usize| {
        let triangles = assign_cell(mesh, &grid.cell_bounds(cell));
        Brick::build(mesh, &triangles)
    };

    if options.parallel {
        (0..grid.num_cells()).into_par_iter().map(build).collect()
    } else {
        (0..grid.num_cells()).map(build).collect()
    }
}

/// Run the full pipeline: assign, build and serialize one brick file per
/// grid cell, named `<prefix><cell>.<ext>`.
///
/// Every cell produces a file, including cells with no assigned triangles
/// (those get a valid empty mesh file). Returns the number of cells
/// written. The first failing cell aborts the run; files already written
/// by other cells remain on disk (best-effort, not transactional).
pub fn write_bricks(
    mesh: &TriMesh,
    grid: &Grid,
    prefix: &str,
    format: Format,
    options: &GridOptions,
) -> Result<usize> {
    let write_cell = |cell: usize| -> Result<()> {
        let triangles = assign_cell(mesh, &grid.cell_bounds(cell));
        let brick = Brick::build(mesh, &triangles);
        let path = format!("{}{}.{}", prefix, cell, format.extension());
        io::save_brick(&brick, path)
    };

    if options.parallel {
        (0..grid.num_cells())
            .into_par_iter()
            .try_for_each(write_cell)?;
    } else {
        (0..grid.num_cells()).try_for_each(write_cell)?;
    }
    Ok(grid.num_cells())
}
