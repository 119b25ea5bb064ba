//! Math primitives shared by the octray crates.
//!
//! Re-exports glam and adds the ray, interval and plane-set extent types
//! used by the acceleration structure and the geometry kernel.

// Re-export glam for convenience
pub use glam::*;

mod extent;
mod interval;
mod ray;

pub use extent::{Extent, RayProjection, PLANE_SET_NORMALS, PLANE_SET_SIZE};
pub use interval::Interval;
pub use ray::Ray;
