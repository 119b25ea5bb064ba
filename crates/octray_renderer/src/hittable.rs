//! Hittable trait and HitRecord for ray-object intersection.

use crate::{MaterialId, Ray};
use octray_math::{Extent, Interval, Vec3};

/// Record of a ray-object intersection.
///
/// Produced fresh by every successful test and kept only while it is the
/// closest hit of the current query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the ray
    pub normal: Vec3,
    /// Material of the surface that was hit
    pub material: MaterialId,
    /// Barycentric coordinates for triangles; zero for spheres
    pub u: f32,
    pub v: f32,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl HitRecord {
    /// Build a record at parameter `t`, orienting `outward_normal` against
    /// the ray.
    pub fn new(
        ray: &Ray,
        t: f32,
        outward_normal: Vec3,
        material: MaterialId,
        (u, v): (f32, f32),
    ) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            u,
            v,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Geometry that can be intersected by rays and bounded by the octree.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with parameter strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;

    /// `[min, max]` of the object's points projected onto `axis`.
    fn project(&self, axis: Vec3) -> Interval;

    /// Plane-set bounding volume of the object.
    fn extent(&self) -> Extent {
        Extent::from_support(|axis| self.project(axis))
    }
}
