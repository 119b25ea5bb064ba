//! Surface materials: how light scatters off, passes through, or leaves a
//! surface.

use crate::sampling::{gen_f32, random_unit_vector};
use crate::{HitRecord, Ray};
use octray_math::Vec3;
use rand::RngCore;

/// Color type alias (linear RGB, typically 0-1 but unbounded for lights)
pub type Color = Vec3;

/// Handle of a material registered with a [`SceneBuilder`](crate::SceneBuilder).
///
/// Primitives store the handle, the scene owns the material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(u32);

impl MaterialId {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Fraction of the incoming light carried by the scattered ray
    pub attenuation: Color,
    pub scattered: Ray,
}

/// The closed set of materials the integrator understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse surface.
    Diffuse { albedo: Color },
    /// Mirror reflection blurred by `fuzz` in [0, 1].
    Reflective { albedo: Color, fuzz: f32 },
    /// Transparent surface with index of refraction `ior`.
    Dielectric { ior: f32 },
    /// Light source; never scatters.
    Emissive { color: Color },
}

impl Material {
    pub fn diffuse(albedo: Color) -> Self {
        Self::Diffuse { albedo }
    }

    /// Create a reflective material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn reflective(albedo: Color, fuzz: f32) -> Self {
        Self::Reflective {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn dielectric(ior: f32) -> Self {
        Self::Dielectric { ior }
    }

    pub fn emissive(color: Color) -> Self {
        Self::Emissive { color }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and the scattered ray, or `None` if the
    /// surface does not scatter (lights).
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Diffuse { albedo } => {
                let mut scatter_direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if near_zero(scatter_direction) {
                    scatter_direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, scatter_direction),
                })
            }

            Material::Reflective { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + fuzz * random_unit_vector(rng);

                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, direction),
                })
            }

            Material::Dielectric { ior } => {
                let refraction_ratio = if rec.front_face { 1.0 / ior } else { ior };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);

                let direction = if must_reflect(refraction_ratio, cos_theta)
                    || reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, refraction_ratio)
                };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction),
                })
            }

            Material::Emissive { .. } => None,
        }
    }

    /// Light emitted by the surface. Black unless emissive.
    pub fn emitted(&self) -> Color {
        match *self {
            Material::Emissive { color } => color,
            _ => Color::ZERO,
        }
    }
}

// =============================================================================
// Helper functions
// =============================================================================

#[inline]
fn near_zero(v: Vec3) -> bool {
    const S: f32 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

/// Total internal reflection: Snell's law has no solution.
#[inline]
pub(crate) fn must_reflect(refraction_ratio: f32, cos_theta: f32) -> bool {
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    refraction_ratio * sin_theta > 1.0
}

/// Schlick's approximation for reflectance.
#[inline]
fn reflectance(cosine: f32, ior: f32) -> f32 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
