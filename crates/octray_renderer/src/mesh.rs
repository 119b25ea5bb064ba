//! Triangle mesh primitive.
//!
//! A mesh owns the triangles fanned out of a [`MeshData`]. Large meshes keep
//! them in their own octree (the lower level of the scene index); small
//! meshes are scanned linearly.

use crate::{HitRecord, Hittable, MaterialId, Octree, OctreeBuilder, Ray, Triangle};
use octray_core::MeshData;
use octray_math::{Interval, Vec3};

/// Meshes with more triangles than this get their own octree.
pub const MESH_OCTREE_THRESHOLD: usize = 16;

/// Normal interpolation mode for mesh triangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shading {
    /// One face normal per triangle
    #[default]
    Flat,
    /// Barycentric blend of averaged vertex normals
    Smooth,
}

#[derive(Debug)]
enum Triangles {
    Linear(Vec<Triangle>),
    Indexed(Octree<Triangle>),
}

/// A triangle mesh sharing one material.
#[derive(Debug)]
pub struct Mesh {
    triangles: Triangles,
    triangle_count: usize,
}

impl Mesh {
    /// Build the mesh from polygon input.
    ///
    /// `data` must be well formed (see [`MeshData`]); it is not re-validated.
    pub fn new(data: &MeshData, material: MaterialId, shading: Shading) -> Self {
        let normals = match shading {
            Shading::Smooth => Some(data.vertex_normals()),
            Shading::Flat => None,
        };

        let faces = data.triangulate();
        let position = |i: u32| data.positions[i as usize];
        let triangles = faces.iter().map(|&[a, b, c]| match &normals {
            Some(n) => Triangle::with_vertex_normals(
                position(a),
                position(b),
                position(c),
                [n[a as usize], n[b as usize], n[c as usize]],
                material,
            ),
            None => Triangle::new(position(a), position(b), position(c), material),
        });

        let triangle_count = faces.len();
        let triangles = if triangle_count > MESH_OCTREE_THRESHOLD {
            Triangles::Indexed(triangles.collect::<OctreeBuilder<_>>().build())
        } else {
            let mut linear = Vec::with_capacity(triangle_count);
            linear.extend(triangles);
            Triangles::Linear(linear)
        };

        log::debug!(
            "Mesh: {} vertices, {} faces, {} triangles ({:?} shading)",
            data.vertex_count(),
            data.face_count(),
            triangle_count,
            shading
        );

        Self {
            triangles,
            triangle_count,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Whether the triangles are held in a mesh-level octree.
    pub fn is_indexed(&self) -> bool {
        matches!(self.triangles, Triangles::Indexed(_))
    }
}

impl Hittable for Mesh {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match &self.triangles {
            Triangles::Indexed(octree) => octree.hit(ray, ray_t),
            Triangles::Linear(triangles) => {
                let mut closest = None;
                let mut closest_t = ray_t.max;

                for triangle in triangles {
                    if let Some(rec) = triangle.hit(ray, Interval::new(ray_t.min, closest_t)) {
                        closest_t = rec.t;
                        closest = Some(rec);
                    }
                }
                closest
            }
        }
    }

    fn project(&self, axis: Vec3) -> Interval {
        match &self.triangles {
            Triangles::Indexed(octree) => octree.project(axis),
            Triangles::Linear(triangles) => triangles.iter().fold(Interval::EMPTY, |acc, t| {
                Interval::surrounding(&acc, &t.project(axis))
            }),
        }
    }
}
