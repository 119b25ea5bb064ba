//! octray renderer - CPU path tracing core.
//!
//! A Monte Carlo path tracer built around three pieces:
//!
//! - **Acceleration**: an [`Octree`] over seven-slab plane-set volumes,
//!   queried best-first with a priority queue
//! - **Integrator**: [`ray_color`] over a closed set of [`Material`]s
//! - **Scheduler**: a [`RenderSession`] feeding scanlines to a fixed worker
//!   pool that writes into a partitioned [`Framebuffer`]
//!
//! # Example
//!
//! ```ignore
//! use octray_core::RenderSettings;
//! use octray_renderer::{render, Color, Material, SceneBuilder, Vec3};
//!
//! let mut builder = SceneBuilder::new();
//! let grey = builder.add_material(Material::diffuse(Color::splat(0.5)));
//! builder.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, grey);
//! let scene = builder.build();
//!
//! let (framebuffer, report) = render(&scene, &RenderSettings::default())?;
//! ```

mod camera;
mod error;
mod framebuffer;
mod hittable;
mod material;
mod mesh;
mod octree;
mod primitive;
mod renderer;
mod sampling;
mod scene;
mod scheduler;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use error::RenderError;
pub use framebuffer::Framebuffer;
pub use hittable::{HitRecord, Hittable};
pub use material::{Color, Material, MaterialId, ScatterResult};
pub use mesh::{Mesh, Shading, MESH_OCTREE_THRESHOLD};
pub use octree::{Octree, OctreeBuilder, OctreeStats, MAX_DEPTH};
pub use primitive::Primitive;
pub use renderer::{ray_color, render_pixel, render_scanline, MIN_HIT_DISTANCE};
pub use scene::{Scene, SceneBuilder};
pub use scheduler::{render, scanline_rng, RenderReport, RenderSession};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from octray_math
pub use octray_math::{Extent, Interval, Ray, Vec3};
