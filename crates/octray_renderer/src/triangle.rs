//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialId, Ray,
};
use octray_math::{Interval, Vec3};

/// Below this determinant the ray is treated as parallel to the triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A triangle primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length, counter-clockwise winding)
    normal: Vec3,
    /// Per-vertex normals for smooth shading
    vertex_normals: Option<[Vec3; 3]>,
    material: MaterialId,
}

impl Triangle {
    /// Create a new flat-shaded triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: MaterialId) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();

        Self {
            v0,
            v1,
            v2,
            normal,
            vertex_normals: None,
            material,
        }
    }

    /// Create a smooth-shaded triangle. The shading normal is the
    /// barycentric blend of `normals`.
    pub fn with_vertex_normals(
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        normals: [Vec3; 3],
        material: MaterialId,
    ) -> Self {
        Self {
            vertex_normals: Some(normals),
            ..Self::new(v0, v1, v2, material)
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Shading normal at barycentric `(u, v)`.
    fn shading_normal(&self, u: f32, v: f32) -> Vec3 {
        match self.vertex_normals {
            Some([n0, n1, n2]) => ((1.0 - u - v) * n0 + u * n1 + v * n2)
                .try_normalize()
                .unwrap_or(self.normal),
            None => self.normal,
        }
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);

        // Check if intersection is outside triangle (u parameter)
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        // Check if intersection is outside triangle (v parameter)
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(
            ray,
            t,
            self.shading_normal(u, v),
            self.material,
            (u, v),
        ))
    }

    fn project(&self, axis: Vec3) -> Interval {
        let (a, b, c) = (self.v0.dot(axis), self.v1.dot(axis), self.v2.dot(axis));
        Interval::new(a.min(b).min(c), a.max(b).max(c))
    }
}
