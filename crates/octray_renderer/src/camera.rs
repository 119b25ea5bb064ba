//! Camera for ray generation.

use crate::sampling::{random_in_unit_disk, sample_square};
use crate::{Color, Ray};
use octray_core::RenderSettings;
use octray_math::Vec3;
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// All derived quantities are computed once in [`Camera::new`]; the camera
/// is immutable afterwards and shared by every worker.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    image_width: u32,
    image_height: u32,
    samples_per_pixel: u32,
    max_depth: u32,
    background: Color,

    // Lens settings
    defocus_angle: f32,

    // Derived values
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    pub fn new(settings: &RenderSettings) -> Self {
        let image_width = settings.image_width;
        let image_height = settings.image_height();
        let focus_dist = settings.focus_dist;
        let center = settings.look_from;

        // Calculate viewport dimensions
        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * focus_dist;
        let viewport_width = viewport_height * (image_width as f32 / image_height as f32);

        // Calculate camera basis vectors
        let w = (settings.look_from - settings.look_at).normalize();
        let u = settings.vup.cross(w).normalize();
        let v = w.cross(u);

        // Viewport edges; v runs down the image
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left = center - focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = focus_dist * (settings.defocus_angle / 2.0).to_radians().tan();

        Self {
            image_width,
            image_height,
            samples_per_pixel: settings.samples_per_pixel,
            max_depth: settings.max_depth,
            background: settings.background,
            defocus_angle: settings.defocus_angle,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        }
    }

    /// Generate a ray for pixel (i, j), jittered within the pixel and across
    /// the defocus disk.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn background(&self) -> Color {
        self.background
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&RenderSettings::default())
    }
}
