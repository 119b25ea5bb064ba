//! The closed set of scene primitives.

use crate::{HitRecord, Hittable, Mesh, Ray, Sphere, Triangle};
use octray_math::{Interval, Vec3};

/// A scene primitive. Dispatch is a single `match` per operation.
#[derive(Debug)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
    Mesh(Mesh),
}

impl Hittable for Primitive {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Primitive::Sphere(s) => s.hit(ray, ray_t),
            Primitive::Triangle(t) => t.hit(ray, ray_t),
            Primitive::Mesh(m) => m.hit(ray, ray_t),
        }
    }

    fn project(&self, axis: Vec3) -> Interval {
        match self {
            Primitive::Sphere(s) => s.project(axis),
            Primitive::Triangle(t) => t.project(axis),
            Primitive::Mesh(m) => m.project(axis),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}

impl From<Mesh> for Primitive {
    fn from(mesh: Mesh) -> Self {
        Primitive::Mesh(mesh)
    }
}
