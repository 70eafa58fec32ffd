//! Grid planning: mapping a mesh bounding box onto a regular cell grid.

use nalgebra::{Point3, Vector3};

use crate::error::{GridError, Result};
use crate::geom::Aabb;

/// A regular grid of axis-aligned cells covering a mesh's bounding box.
///
/// Cells are addressed by a linear index in row-major order with x varying
/// fastest: cell `i` has 3D coordinate
/// `(i % nx, (i / nx) % ny, i / (nx * ny))`.
///
/// # Example
///
/// ```
/// use brickgrid::geom::Aabb;
/// use brickgrid::grid::Grid;
/// use nalgebra::Point3;
///
/// let bounds = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
/// let grid = Grid::plan(&bounds, 2, 1, 1).unwrap();
/// assert_eq!(grid.num_cells(), 2);
/// assert_eq!(grid.cell_bounds(1).lower, Point3::new(1.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    dims: [usize; 3],
    origin: Point3<f32>,
    cell_size: Vector3<f32>,
}

impl Grid {
    /// Plan a grid of `nx * ny * nz` cells over `bounds`.
    ///
    /// Fails with [`GridError::InvalidGridDimensions`] if any axis count is
    /// zero, and with [`GridError::EmptyMesh`] if `bounds` is empty (cell
    /// size would be undefined).
    pub fn plan(bounds: &Aabb, nx: usize, ny: usize, nz: usize) -> Result<Grid> {
        if nx < 1 || ny < 1 || nz < 1 {
            return Err(GridError::InvalidGridDimensions { nx, ny, nz });
        }
        if bounds.is_empty() {
            return Err(GridError::EmptyMesh);
        }
        let extent = bounds.upper - bounds.lower;
        let cell_size = Vector3::new(
            extent.x / nx as f32,
            extent.y / ny as f32,
            extent.z / nz as f32,
        );
        Ok(Grid {
            dims: [nx, ny, nz],
            origin: bounds.lower,
            cell_size,
        })
    }

    /// Cell counts per axis.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Size of one cell along each axis.
    pub fn cell_size(&self) -> Vector3<f32> {
        self.cell_size
    }

    /// Total number of cells.
    pub fn num_cells(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    /// Decode a linear cell index into its 3D grid coordinate.
    pub fn cell_coord(&self, cell: usize) -> [usize; 3] {
        let [nx, ny, _] = self.dims;
        [cell % nx, (cell / nx) % ny, cell / (nx * ny)]
    }

    /// Bounding box of the cell with the given linear index.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `cell >= num_cells()`.
    pub fn cell_bounds(&self, cell: usize) -> Aabb {
        debug_assert!(cell < self.num_cells(), "cell index {cell} out of range");
        let coord = self.cell_coord(cell);
        let offset = Vector3::new(
            coord[0] as f32 * self.cell_size.x,
            coord[1] as f32 * self.cell_size.y,
            coord[2] as f32 * self.cell_size.z,
        );
        let lower = self.origin + offset;
        Aabb::new(lower, lower + self.cell_size)
    }
}
