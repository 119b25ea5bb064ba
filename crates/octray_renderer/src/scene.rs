//! Scene assembly: a material registry plus the top-level octree.

use crate::{
    HitRecord, Hittable, Material, MaterialId, Mesh, Octree, OctreeBuilder, Primitive, Ray,
    Shading, Sphere, Triangle,
};
use octray_core::MeshData;
use octray_math::{Interval, Vec3};

/// Collects materials and primitives before the scene is frozen.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    materials: Vec<Material>,
    primitives: OctreeBuilder<Primitive>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material. Any number of primitives may share it.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId::new(self.materials.len() as u32);
        self.materials.push(material);
        id
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: MaterialId) -> &mut Self {
        self.add(Sphere::new(center, radius, material))
    }

    pub fn add_triangle(&mut self, v0: Vec3, v1: Vec3, v2: Vec3, material: MaterialId) -> &mut Self {
        self.add(Triangle::new(v0, v1, v2, material))
    }

    pub fn add_mesh(&mut self, data: &MeshData, material: MaterialId, shading: Shading) -> &mut Self {
        self.add(Mesh::new(data, material, shading))
    }

    pub fn add(&mut self, primitive: impl Into<Primitive>) -> &mut Self {
        self.primitives.add(primitive.into());
        self
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Freeze the scene and build its octree.
    pub fn build(self) -> Scene {
        log::info!(
            "Building scene: {} primitives, {} materials",
            self.primitives.len(),
            self.materials.len()
        );

        Scene {
            materials: self.materials,
            octree: self.primitives.build(),
        }
    }
}

/// Immutable scene shared read-only by render workers.
#[derive(Debug)]
pub struct Scene {
    materials: Vec<Material>,
    octree: Octree<Primitive>,
}

impl Scene {
    /// Nearest hit with parameter strictly inside `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.octree.hit(ray, ray_t)
    }

    /// Look up a registered material.
    ///
    /// Handles only come from the builder that created this scene, so the
    /// index is always in range.
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.index()]
    }

    pub fn len(&self) -> usize {
        self.octree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.octree.is_empty()
    }
}
