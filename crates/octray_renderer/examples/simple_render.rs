//! Simple path tracer example.
//!
//! Renders a field of random spheres and saves it in PPM format.

use octray_core::{save_image, RenderSettings};
use octray_renderer::{render, Color, Material, SceneBuilder, Scene, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = std::time::Instant::now();
    let scene = build_scene();
    log::info!("Scene built in {:?}", start.elapsed());

    let settings = RenderSettings {
        image_width: 800,
        samples_per_pixel: 50,
        max_depth: 10,
        vfov: 20.0,
        look_from: Vec3::new(13.0, 2.0, 3.0),
        look_at: Vec3::ZERO,
        defocus_angle: 0.6,
        focus_dist: 10.0,
        background: Color::new(0.5, 0.7, 1.0),
        ..RenderSettings::default()
    };

    let (framebuffer, _) = render(&scene, &settings)?;

    let filename = "output.ppm";
    save_image(
        filename,
        framebuffer.width(),
        framebuffer.height(),
        &framebuffer.resolve(),
    )?;
    Ok(())
}

fn build_scene() -> Scene {
    let mut builder = SceneBuilder::new();

    let ground = builder.add_material(Material::diffuse(Color::new(0.5, 0.5, 0.5)));
    builder.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground);

    // Three main spheres
    let glass = builder.add_material(Material::dielectric(1.5));
    let brown = builder.add_material(Material::diffuse(Color::new(0.4, 0.2, 0.1)));
    let mirror = builder.add_material(Material::reflective(Color::new(0.7, 0.6, 0.5), 0.0));
    builder
        .add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, glass)
        .add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, brown)
        .add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, mirror);

    // Small random spheres
    let mut rng = StdRng::seed_from_u64(2024);

    for a in -5..5 {
        for b in -5..5 {
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f32 = rng.gen();
            let material = if choose_mat < 0.8 {
                let albedo = Color::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                Material::diffuse(albedo)
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                );
                Material::reflective(albedo, 0.5 * rng.gen::<f32>())
            } else {
                Material::dielectric(1.5)
            };

            let id = builder.add_material(material);
            builder.add_sphere(center, 0.2, id);
        }
    }

    log::info!("Created {} objects", builder.primitive_count());
    builder.build()
}
