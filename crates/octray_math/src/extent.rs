use crate::{Interval, Ray, Vec3};

/// Number of slab directions in the plane set.
pub const PLANE_SET_SIZE: usize = 7;

const INV_SQRT_3: f32 = 0.577_350_26;

/// Slab directions used to bound objects.
///
/// The three Cartesian axes come first so that `slabs[0..3]` of an
/// [`Extent`] form an ordinary axis-aligned box; the four body diagonals
/// tighten the volume around round and slanted geometry.
pub const PLANE_SET_NORMALS: [Vec3; PLANE_SET_SIZE] = [
    Vec3::X,
    Vec3::Y,
    Vec3::Z,
    Vec3::new(INV_SQRT_3, INV_SQRT_3, INV_SQRT_3),
    Vec3::new(-INV_SQRT_3, INV_SQRT_3, INV_SQRT_3),
    Vec3::new(-INV_SQRT_3, -INV_SQRT_3, INV_SQRT_3),
    Vec3::new(INV_SQRT_3, -INV_SQRT_3, INV_SQRT_3),
];

/// Below this, a ray is treated as parallel to a slab.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A ray projected onto every plane-set normal.
///
/// Computed once per query and reused for every slab test of that query.
#[derive(Debug, Clone, Copy)]
pub struct RayProjection {
    origin: [f32; PLANE_SET_SIZE],
    direction: [f32; PLANE_SET_SIZE],
}

impl RayProjection {
    pub fn new(ray: &Ray) -> Self {
        Self {
            origin: PLANE_SET_NORMALS.map(|n| n.dot(ray.origin)),
            direction: PLANE_SET_NORMALS.map(|n| n.dot(ray.direction)),
        }
    }
}

/// Plane-set bounding volume: one interval per direction in
/// [`PLANE_SET_NORMALS`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Extent {
    pub slabs: [Interval; PLANE_SET_SIZE],
}

impl Extent {
    /// An extent containing nothing. Identity of [`Extent::surrounding`].
    pub const EMPTY: Extent = Extent {
        slabs: [Interval::EMPTY; PLANE_SET_SIZE],
    };

    /// Build an extent from a support function returning the projected
    /// `[min, max]` of the object along a unit direction.
    pub fn from_support(support: impl Fn(Vec3) -> Interval) -> Self {
        Self {
            slabs: PLANE_SET_NORMALS.map(support),
        }
    }

    /// Smallest extent containing every point.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut extent = Self::EMPTY;
        for p in points {
            extent.include_point(p);
        }
        extent
    }

    /// Grow every slab to contain the projection of `p`.
    pub fn include_point(&mut self, p: Vec3) {
        for (slab, n) in self.slabs.iter_mut().zip(PLANE_SET_NORMALS) {
            slab.include(n.dot(p));
        }
    }

    /// Create an extent that surrounds two other extents.
    pub fn surrounding(a: &Extent, b: &Extent) -> Self {
        Self {
            slabs: std::array::from_fn(|i| Interval::surrounding(&a.slabs[i], &b.slabs[i])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slabs.iter().any(Interval::is_empty)
    }

    /// Center of the axis-aligned part of the extent.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(
            self.slabs[0].center(),
            self.slabs[1].center(),
            self.slabs[2].center(),
        )
    }

    /// Axis-aligned corners `(min, max)` of the extent.
    pub fn aabb(&self) -> (Vec3, Vec3) {
        (
            Vec3::new(self.slabs[0].min, self.slabs[1].min, self.slabs[2].min),
            Vec3::new(self.slabs[0].max, self.slabs[1].max, self.slabs[2].max),
        )
    }

    /// Slab test against a projected ray.
    ///
    /// Returns the parametric `[t_near, t_far]` window in which the ray is
    /// inside every slab, or `None` if the window closes. The window is not
    /// clipped to the ray's valid range; `t_near` is negative when the ray
    /// starts inside the volume.
    pub fn hit(&self, ray: &RayProjection) -> Option<Interval> {
        let mut window = Interval::UNIVERSE;

        for (i, slab) in self.slabs.iter().enumerate() {
            let n_dot_o = ray.origin[i];
            let n_dot_d = ray.direction[i];

            if n_dot_d.abs() < PARALLEL_EPSILON {
                // Parallel to the slab: either always inside it or never
                if !slab.contains(n_dot_o) {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / n_dot_d;
            let mut t_near = (slab.min - n_dot_o) * inv;
            let mut t_far = (slab.max - n_dot_o) * inv;
            if n_dot_d < 0.0 {
                std::mem::swap(&mut t_near, &mut t_far);
            }

            window.min = window.min.max(t_near);
            window.max = window.max.min(t_far);
            if window.min > window.max {
                return None;
            }
        }

        Some(window)
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> Extent {
        Extent::from_points([Vec3::splat(-1.0), Vec3::splat(1.0)])
    }

    #[test]
    fn test_from_points_cartesian_slabs() {
        let extent = Extent::from_points([
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::ZERO,
        ]);
        let (min, max) = extent.aabb();

        assert_eq!(min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(extent.centroid(), Vec3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn test_diagonal_slabs_are_tighter_than_box() {
        // A single point projects to a zero-width slab on every axis
        let extent = Extent::from_points([Vec3::new(1.0, 2.0, 3.0)]);
        for slab in extent.slabs {
            assert!(slab.size().abs() < 1e-6);
        }
    }

    #[test]
    fn test_surrounding_with_empty() {
        let cube = unit_cube();
        assert!(Extent::EMPTY.is_empty());
        assert_eq!(Extent::surrounding(&Extent::EMPTY, &cube), cube);
    }

    #[test]
    fn test_hit_window() {
        let cube = unit_cube();

        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let window = cube.hit(&RayProjection::new(&ray)).expect("ray aims at cube");
        assert!((window.min - 4.0).abs() < 1e-4);
        assert!((window.max - 6.0).abs() < 1e-4);

        // Pointing away: the window is entirely behind the origin
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        let window = cube.hit(&RayProjection::new(&ray)).expect("line crosses cube");
        assert!(window.max < 0.0);

        // Missing to the side
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        assert!(cube.hit(&RayProjection::new(&ray)).is_none());
    }

    #[test]
    fn test_hit_from_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let window = unit_cube().hit(&RayProjection::new(&ray)).unwrap();
        assert!(window.min < 0.0 && window.max > 0.0);
    }

    #[test]
    fn test_parallel_ray_outside_slab_misses() {
        // Direction along X has zero projection on Y and Z
        let ray = Ray::new(Vec3::new(-5.0, 3.0, 0.0), Vec3::X);
        assert!(unit_cube().hit(&RayProjection::new(&ray)).is_none());
    }

    #[test]
    fn test_empty_extent_is_never_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        assert!(Extent::EMPTY.hit(&RayProjection::new(&ray)).is_none());
    }
}
