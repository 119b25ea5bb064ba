//! Random sampling helpers.
//!
//! All randomness flows through an explicit `&mut dyn RngCore` so that each
//! scanline can own a seeded stream.

use octray_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform f32 in [min, max).
#[inline]
pub fn gen_f32_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Generate a random unit vector on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling for a uniform distribution on the sphere
    loop {
        let v = Vec3::new(
            gen_f32_range(rng, -1.0, 1.0),
            gen_f32_range(rng, -1.0, 1.0),
            gen_f32_range(rng, -1.0, 1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Sample a random point in the unit disk (z = 0).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32_range(rng, -1.0, 1.0),
            gen_f32_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Sample a random point in the square [-0.5, 0.5) x [-0.5, 0.5).
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_unit_vectors() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_disk_and_square_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
            assert_eq!(p.z, 0.0);

            let s = sample_square(&mut rng);
            assert!((-0.5..0.5).contains(&s.x));
            assert!((-0.5..0.5).contains(&s.y));
        }
    }
}
