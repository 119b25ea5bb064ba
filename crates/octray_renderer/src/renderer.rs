//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by a depth budget
//! - Anti-aliasing and depth of field via multi-sampling
//!
//! Pixels hold the *sum* of their samples; averaging and gamma correction
//! happen when the framebuffer is resolved and encoded.

use crate::{Camera, Color, Ray, Scene};
use octray_math::Interval;
use rand::RngCore;

/// Smallest accepted hit parameter. Keeps scattered rays from re-hitting
/// the surface they leave.
pub const MIN_HIT_DISTANCE: f32 = 0.001;

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and accumulating color.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    background: Color,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(MIN_HIT_DISTANCE, f32::INFINITY)) else {
        return background;
    };

    let material = scene.material(rec.material);
    let emission = material.emitted();

    match material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, scene, depth - 1, background, rng);
            emission + result.attenuation * scattered_color
        }
        None => emission,
    }
}

/// Sum of `samples_per_pixel` samples for pixel (x, y).
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, scene, camera.max_depth(), camera.background(), rng);
    }

    pixel_color
}

/// Render row `y` into `pixels`, left to right.
pub fn render_scanline(
    camera: &Camera,
    scene: &Scene,
    y: u32,
    pixels: &mut [Color],
    rng: &mut dyn RngCore,
) {
    for (x, pixel) in pixels.iter_mut().enumerate() {
        *pixel = render_pixel(camera, scene, x as u32, y, rng);
    }
}
