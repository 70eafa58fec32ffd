//! Geometry kernel: axis-aligned boxes and triangle/box intersection.
//!
//! Everything in this module is a pure function of its inputs; no I/O and
//! no shared state. The intersection predicate is the separating axis test
//! of Akenine-Möller, which is exact up to floating-point rounding: a
//! triangle that merely touches a box face counts as intersecting.

use nalgebra::{Point3, Vector3};

/// An axis-aligned bounding box, stored as its lower and upper corners.
///
/// A freshly created empty box has `lower = +inf` and `upper = -inf` on
/// every axis, so extending it with any point produces a valid box. Once
/// non-empty, `lower[i] <= upper[i]` holds on all axes.
///
/// # Example
///
/// ```
/// use brickgrid::geom::Aabb;
/// use nalgebra::Point3;
///
/// let mut bounds = Aabb::empty();
/// bounds.extend(&Point3::new(1.0, 2.0, 3.0));
/// bounds.extend(&Point3::new(-1.0, 0.0, 0.0));
/// assert_eq!(bounds.lower, Point3::new(-1.0, 0.0, 0.0));
/// assert_eq!(bounds.upper, Point3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Corner with the smallest coordinate on each axis.
    pub lower: Point3<f32>,
    /// Corner with the largest coordinate on each axis.
    pub upper: Point3<f32>,
}

impl Aabb {
    /// Create a box from its lower and upper corners.
    pub fn new(lower: Point3<f32>, upper: Point3<f32>) -> Aabb {
        Aabb { lower, upper }
    }

    /// The canonical empty box: extending it with any point yields a box
    /// containing exactly that point.
    pub fn empty() -> Aabb {
        Aabb {
            lower: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            upper: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// True if the box contains no points (some axis has `lower > upper`).
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.lower[i] > self.upper[i])
    }

    /// Grow the box to include `p`.
    pub fn extend(&mut self, p: &Point3<f32>) {
        for i in 0..3 {
            self.lower[i] = self.lower[i].min(p[i]);
            self.upper[i] = self.upper[i].max(p[i]);
        }
    }

    /// Center of the box.
    pub fn center(&self) -> Point3<f32> {
        self.lower + (self.upper - self.lower) * 0.5
    }

    /// Half the box extent along each axis.
    pub fn half_extents(&self) -> Vector3<f32> {
        self.upper - self.center()
    }

    /// Corner access by index: `corner(0)` is the lower corner, `corner(1)`
    /// the upper.
    ///
    /// # Panics
    ///
    /// Panics if `i > 1`.
    pub fn corner(&self, i: usize) -> &Point3<f32> {
        match i {
            0 => &self.lower,
            1 => &self.upper,
            _ => panic!("invalid box corner index {i}"),
        }
    }

    /// True if `p` lies inside the box or on its boundary.
    pub fn contains(&self, p: &Point3<f32>) -> bool {
        (0..3).all(|i| self.lower[i] <= p[i] && p[i] <= self.upper[i])
    }
}

impl std::ops::Index<usize> for Aabb {
    type Output = Point3<f32>;

    fn index(&self, i: usize) -> &Point3<f32> {
        self.corner(i)
    }
}

/// Area of the triangle with vertices `a`, `b`, `c`.
///
/// Zero for degenerate (collinear or coincident) vertices.
pub fn triangle_area(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> f32 {
    (b - a).cross(&(c - a)).norm() * 0.5
}

/// Test whether the segment from `a` to `b` intersects `bounds`.
///
/// Standard slab test. This is the cheap predicate that historically stood
/// in for [`triangle_box_intersects`]; it misses triangles whose interior
/// overlaps the box while all three edges stay outside, so the gridder
/// does not use it for cell assignment.
pub fn line_box_intersects(a: &Point3<f32>, b: &Point3<f32>, bounds: &Aabb) -> bool {
    let dir = b - a;
    let inv_dir = Vector3::new(1.0 / dir.x, 1.0 / dir.y, 1.0 / dir.z);
    let neg_dir = [
        usize::from(dir.x < 0.0),
        usize::from(dir.y < 0.0),
        usize::from(dir.z < 0.0),
    ];

    // Check x & y slabs
    let mut tmin = (bounds[neg_dir[0]].x - a.x) * inv_dir.x;
    let mut tmax = (bounds[1 - neg_dir[0]].x - a.x) * inv_dir.x;
    let tymin = (bounds[neg_dir[1]].y - a.y) * inv_dir.y;
    let tymax = (bounds[1 - neg_dir[1]].y - a.y) * inv_dir.y;
    if tmin > tymax || tymin > tmax {
        return false;
    }
    tmin = tmin.max(tymin);
    tmax = tmax.min(tymax);

    // Check the z slab
    let tzmin = (bounds[neg_dir[2]].z - a.z) * inv_dir.z;
    let tzmax = (bounds[1 - neg_dir[2]].z - a.z) * inv_dir.z;
    if tmin > tzmax || tzmin > tmax {
        return false;
    }
    tmin = tmin.max(tzmin);
    tmax = tmax.min(tzmax);

    tmin >= 0.0 && tmax <= 1.0
}

/// Test whether the triangle `(a, b, c)` intersects the box `bounds`,
/// including boundary touches.
///
/// Uses Akenine-Möller's separating axis method
/// (<http://fileadmin.cs.lth.se/cs/Personal/Tomas_Akenine-Moller/code/tribox3.txt>):
/// thirteen candidate separating axes are tested in three groups, short-
/// circuiting as soon as one separates the shapes. If none does, the convex
/// shapes overlap.
///
/// The result is invariant to the order of the triangle vertices.
/// Degenerate triangles (zero area) are handled: their normal is the zero
/// vector, which makes the plane test non-separating, and the remaining
/// axis tests still bound the triangle correctly.
pub fn triangle_box_intersects(
    a: &Point3<f32>,
    b: &Point3<f32>,
    c: &Point3<f32>,
    bounds: &Aabb,
) -> bool {
    // Translate so that the box center is at the origin
    let bcenter = bounds.center();
    let vert = [a - bcenter, b - bcenter, c - bcenter];
    let edge = [vert[1] - vert[0], vert[2] - vert[1], vert[0] - vert[2]];
    let half_lens = bounds.half_extents();

    // Bullet 1: separate the triangle's AABB from the box
    for i in 0..3 {
        let min = vert[0][i].min(vert[1][i]).min(vert[2][i]);
        let max = vert[0][i].max(vert[1][i]).max(vert[2][i]);
        if min > half_lens[i] || max < -half_lens[i] {
            return false;
        }
    }

    // Bullet 2: separate along the triangle's plane normal. Build the box
    // corners most extreme against and along the normal (per-axis sign
    // test, relative to vert[0]); the box straddles the plane only if the
    // two corners project to opposite sides.
    let tri_normal = edge[0].cross(&edge[1]);
    let mut vmin = Vector3::zeros();
    let mut vmax = Vector3::zeros();
    for i in 0..3 {
        if tri_normal[i] > 0.0 {
            vmin[i] = -half_lens[i] - vert[0][i];
            vmax[i] = half_lens[i] - vert[0][i];
        } else {
            vmin[i] = half_lens[i] - vert[0][i];
            vmax[i] = -half_lens[i] - vert[0][i];
        }
    }
    if tri_normal.dot(&vmin) > 0.0 || tri_normal.dot(&vmax) < 0.0 {
        return false;
    }

    // Bullet 3: the nine axes formed by crossing each box principal axis
    // with each triangle edge. Not the most optimized formulation of these
    // tests, but the easiest to read.
    let axes = [Vector3::x(), Vector3::y(), Vector3::z()];
    for axis in &axes {
        for e in &edge {
            let sep = axis.cross(e);
            let p = [sep.dot(&vert[0]), sep.dot(&vert[1]), sep.dot(&vert[2])];
            let minp = p[0].min(p[1]).min(p[2]);
            let maxp = p[0].max(p[1]).max(p[2]);
            let r =
                half_lens.x * sep.x.abs() + half_lens.y * sep.y.abs() + half_lens.z * sep.z.abs();
            if minp > r || maxp < -r {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_empty_box_extend() {
        let mut b = Aabb::empty();
        assert!(b.is_empty());

        b.extend(&Point3::new(0.5, -0.5, 2.0));
        assert!(!b.is_empty());
        assert_eq!(b.lower, Point3::new(0.5, -0.5, 2.0));
        assert_eq!(b.upper, Point3::new(0.5, -0.5, 2.0));

        b.extend(&Point3::new(-1.0, 1.0, 0.0));
        assert_eq!(b.lower, Point3::new(-1.0, -0.5, 0.0));
        assert_eq!(b.upper, Point3::new(0.5, 1.0, 2.0));
    }

    #[test]
    fn test_corner_indexing() {
        let b = unit_box();
        assert_eq!(b[0], b.lower);
        assert_eq!(b[1], b.upper);
        assert_eq!(*b.corner(1), Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_center_and_half_extents() {
        let b = Aabb::new(Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 4.0, 6.0));
        assert_eq!(b.center(), Point3::new(1.0, 2.0, 4.0));
        assert_eq!(b.half_extents(), Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_triangle_area() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        assert_eq!(triangle_area(&a, &b, &c), 0.5);
        // Collinear
        let d = Point3::new(2.0, 0.0, 0.0);
        assert_eq!(triangle_area(&a, &b, &d), 0.0);
    }

    #[test]
    fn test_triangle_inside_box() {
        let b = unit_box();
        assert!(triangle_box_intersects(
            &Point3::new(0.2, 0.2, 0.2),
            &Point3::new(0.8, 0.2, 0.2),
            &Point3::new(0.5, 0.8, 0.5),
            &b,
        ));
    }

    #[test]
    fn test_triangle_disjoint_aabb() {
        // Separated along x by bullet 1
        let b = unit_box();
        assert!(!triangle_box_intersects(
            &Point3::new(2.0, 0.0, 0.0),
            &Point3::new(3.0, 0.0, 0.0),
            &Point3::new(2.5, 1.0, 0.0),
            &b,
        ));
    }

    #[test]
    fn test_triangle_separated_by_plane() {
        // The triangle's AABB overlaps the box but its plane x+y+z = 3.5
        // lies entirely beyond the (1, 1, 1) corner (corner sum is 3).
        let b = unit_box();
        assert!(!triangle_box_intersects(
            &Point3::new(2.5, 0.5, 0.5),
            &Point3::new(0.5, 2.5, 0.5),
            &Point3::new(0.5, 0.5, 2.5),
            &b,
        ));
    }

    #[test]
    fn test_triangle_separated_by_edge_axis() {
        // AABB overlap and plane overlap (the triangle lies in z = 0.5,
        // which crosses the box), but the triangle sits diagonally past the
        // (1, 1) corner: its nearest edge is on the line x + y = 2.2, so
        // the in-plane axis perpendicular to that edge separates.
        let b = unit_box();
        assert!(!triangle_box_intersects(
            &Point3::new(1.4, 0.8, 0.5),
            &Point3::new(0.8, 1.4, 0.5),
            &Point3::new(1.4, 1.4, 0.5),
            &b,
        ));
    }

    #[test]
    fn test_triangle_cutting_through_box() {
        // All vertices outside, interior slices the box
        let b = unit_box();
        assert!(triangle_box_intersects(
            &Point3::new(-1.0, 0.5, 0.5),
            &Point3::new(2.0, 0.5, 0.5),
            &Point3::new(0.5, 2.0, 0.5),
            &b,
        ));
    }

    #[test]
    fn test_boundary_touch_counts() {
        // Triangle lying exactly on the x = 1 face
        let b = unit_box();
        assert!(triangle_box_intersects(
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(1.0, 1.0, 0.0),
            &Point3::new(1.0, 0.5, 1.0),
            &b,
        ));
        // Triangle touching only the corner at (1, 1, 1)
        assert!(triangle_box_intersects(
            &Point3::new(1.0, 1.0, 1.0),
            &Point3::new(2.0, 1.0, 1.0),
            &Point3::new(1.0, 2.0, 1.0),
            &b,
        ));
    }

    #[test]
    fn test_vertex_order_invariance() {
        let b = unit_box();
        let (p, q, r) = (
            Point3::new(-1.0, 0.5, 0.5),
            Point3::new(2.0, 0.5, 0.5),
            Point3::new(0.5, 2.0, 0.5),
        );
        let expected = triangle_box_intersects(&p, &q, &r, &b);
        assert_eq!(triangle_box_intersects(&q, &r, &p, &b), expected);
        assert_eq!(triangle_box_intersects(&r, &p, &q, &b), expected);
        assert_eq!(triangle_box_intersects(&q, &p, &r, &b), expected);
    }

    #[test]
    fn test_degenerate_triangle_no_crash() {
        let b = unit_box();
        // All three vertices coincident, inside the box
        let p = Point3::new(0.5, 0.5, 0.5);
        assert!(triangle_box_intersects(&p, &p, &p, &b));
        // Coincident and outside
        let q = Point3::new(5.0, 5.0, 5.0);
        assert!(!triangle_box_intersects(&q, &q, &q, &b));
        // Collinear vertices crossing the box
        assert!(triangle_box_intersects(
            &Point3::new(-1.0, 0.5, 0.5),
            &Point3::new(0.5, 0.5, 0.5),
            &Point3::new(2.0, 0.5, 0.5),
            &b,
        ));
    }

    #[test]
    fn test_line_box() {
        let b = unit_box();
        assert!(line_box_intersects(
            &Point3::new(-0.5, 0.5, 0.5),
            &Point3::new(1.5, 0.5, 0.5),
            &b,
        ));
        assert!(!line_box_intersects(
            &Point3::new(-0.5, 2.0, 0.5),
            &Point3::new(1.5, 2.0, 0.5),
            &b,
        ));
    }
}
