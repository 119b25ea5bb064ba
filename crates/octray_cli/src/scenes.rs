//! Built-in demo scenes and their camera presets.

use octray_core::{MeshData, RenderSettings};
use octray_renderer::{Color, Material, SceneBuilder, Shading, Vec3};

use crate::cli::SceneKind;

/// Populate `builder` with the chosen scene and return its camera preset.
pub fn build(kind: SceneKind, builder: &mut SceneBuilder) -> RenderSettings {
    match kind {
        SceneKind::Spheres => spheres(builder),
        SceneKind::Glass => glass(builder),
        SceneKind::Mesh => mesh(builder),
    }
}

/// Material for meshes loaded from OBJ files.
pub fn mesh_material() -> Material {
    Material::diffuse(Color::new(0.777, 0.266, 0.340))
}

fn spheres(builder: &mut SceneBuilder) -> RenderSettings {
    let floor = builder.add_material(Material::reflective(
        Color::new(180.0, 189.0, 199.0) / 256.0,
        0.0,
    ));
    let peach = builder.add_material(Material::reflective(Color::new(0.96, 0.60, 0.5), 0.0));
    let pink = builder.add_material(Material::reflective(Color::new(1.0, 0.75, 0.80), 0.0));
    let crimson = builder.add_material(Material::reflective(
        Color::new(0.859, 0.078, 0.234),
        0.05,
    ));
    let coral = builder.add_material(Material::reflective(Color::new(0.9375, 0.5, 0.5), 0.1));
    let sand = builder.add_material(Material::reflective(Color::new(0.996, 0.852, 0.73), 0.0));
    let brushed = builder.add_material(Material::reflective(Color::new(0.996, 0.852, 0.73), 0.25));

    builder
        .add_sphere(Vec3::new(0.0, -102.0, -1.0), 100.0, floor)
        .add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, peach)
        .add_sphere(Vec3::new(1.5, 0.5, -0.75), 1.0, pink)
        .add_sphere(Vec3::new(0.65, -0.25, -0.25), 0.25, crimson)
        .add_sphere(Vec3::new(-0.25, -0.25, 0.2), 0.1, coral)
        .add_sphere(Vec3::new(-0.6, -0.45, 0.75), 0.5, crimson)
        .add_sphere(Vec3::new(-1.0, 0.0, -2.0), 0.5, brushed)
        .add_sphere(Vec3::new(-2.0, 1.0, -2.0), 0.65, sand);

    RenderSettings {
        vfov: 50.0,
        look_from: Vec3::new(0.0, 0.0, 5.0),
        ..RenderSettings::default()
    }
}

fn glass(builder: &mut SceneBuilder) -> RenderSettings {
    let ground = builder.add_material(Material::diffuse(Color::new(0.8, 0.8, 0.0)));
    let center = builder.add_material(Material::diffuse(Color::new(0.1, 0.2, 0.5)));
    let glass = builder.add_material(Material::dielectric(1.5));
    let bubble = builder.add_material(Material::dielectric(1.0 / 1.5));
    let gold = builder.add_material(Material::reflective(Color::new(0.8, 0.6, 0.2), 0.0));

    builder
        .add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)
        .add_sphere(Vec3::new(0.0, 0.0, -1.2), 0.5, center)
        .add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass)
        .add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.4, bubble)
        .add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, gold);

    RenderSettings {
        vfov: 20.0,
        look_from: Vec3::new(-2.0, 2.0, 1.0),
        look_at: Vec3::new(0.0, 0.0, -1.0),
        defocus_angle: 3.0,
        focus_dist: 3.4,
        ..RenderSettings::default()
    }
}

/// Cube with one quad per side.
pub fn cube() -> MeshData {
    MeshData::new(
        vec![
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
        ],
        vec![4; 6],
        vec![
            0, 1, 2, 3, 0, 4, 5, 1, 1, 5, 6, 2, 0, 3, 7, 4, 5, 4, 7, 6, 2, 6, 7, 3,
        ],
    )
}

fn mesh(builder: &mut SceneBuilder) -> RenderSettings {
    let floor = builder.add_material(Material::reflective(Color::splat(0.7), 0.05));
    let body = builder.add_material(mesh_material());
    let light = builder.add_material(Material::emissive(Color::splat(4.0)));

    builder
        .add_sphere(Vec3::new(0.0, -101.0, 0.0), 100.0, floor)
        .add_mesh(&cube(), body, Shading::Flat)
        .add_sphere(Vec3::new(-3.0, 4.0, 2.0), 1.0, light);

    RenderSettings {
        vfov: 40.0,
        look_from: Vec3::new(3.0, 2.5, 6.0),
        look_at: Vec3::ZERO,
        ..RenderSettings::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenes_build_with_valid_settings() {
        for kind in [SceneKind::Spheres, SceneKind::Glass, SceneKind::Mesh] {
            let mut builder = SceneBuilder::new();
            let settings = build(kind, &mut builder);

            assert!(settings.validate().is_ok(), "{kind:?}");
            assert!(builder.primitive_count() > 0, "{kind:?}");
        }
    }

    #[test]
    fn test_cube_faces() {
        let cube = cube();
        assert_eq!(cube.face_count(), 6);
        assert_eq!(cube.triangle_count(), 12);
    }
}
