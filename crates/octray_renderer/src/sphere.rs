//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialId, Ray,
};
use octray_math::{Interval, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(
            ray,
            root,
            outward_normal,
            self.material,
            (0.0, 0.0),
        ))
    }

    fn project(&self, axis: Vec3) -> Interval {
        let c = self.center.dot(axis);
        let r = self.radius * axis.length();
        Interval::new(c - r, c + r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn unit_sphere_ahead() -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialId::new(0))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_ahead();

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_sphere_negative_discriminant() {
        let sphere = unit_sphere_ahead();

        // Parallel to the axis but offset by more than the radius
        let ray = Ray::new(Vec3::new(0.0, 0.6, 0.0), Vec3::NEG_Z);
        assert!(sphere.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_sphere_hit_points_lie_on_surface() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut hits = 0;

        for _ in 0..500 {
            let center = Vec3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );
            let radius: f32 = rng.gen_range(0.1..3.0);
            let sphere = Sphere::new(center, radius, MaterialId::new(0));

            let origin = Vec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            // Aim near the sphere so a good share of the rays hit
            let target = center
                + Vec3::new(
                    rng.gen_range(-1.5..1.5),
                    rng.gen_range(-1.5..1.5),
                    rng.gen_range(-1.5..1.5),
                ) * radius;
            let ray = Ray::new(origin, (target - origin) * rng.gen_range(0.2f32..3.0));

            if let Some(rec) = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)) {
                hits += 1;
                assert!(((rec.p - center).length() - radius).abs() < 1e-3 * radius.max(1.0));
                assert!((rec.normal.length() - 1.0).abs() < 1e-3);
                assert!(rec.normal.dot(ray.direction()) <= 0.0);
            }
        }

        assert!(hits > 100);
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, MaterialId::new(0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_sphere_respects_interval() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        // Both roots (0.5 and 1.5) lie past the maximum
        assert!(sphere.hit(&ray, Interval::new(0.001, 0.4)).is_none());
        // Only the far root is admissible
        let rec = sphere.hit(&ray, Interval::new(0.6, 10.0)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_extent() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 0.5, MaterialId::new(0));

        assert_eq!(sphere.project(Vec3::X), Interval::new(0.5, 1.5));
        let (min, max) = sphere.extent().aabb();
        assert!((min - Vec3::new(0.5, 1.5, 2.5)).length() < 1e-5);
        assert!((max - Vec3::new(1.5, 2.5, 3.5)).length() < 1e-5);
    }
}
