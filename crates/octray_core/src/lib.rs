//! octray core - the renderer's input and output edges.
//!
//! This crate provides:
//!
//! - **Mesh input**: [`MeshData`], polygon faces as flat arrays
//! - **OBJ loading**: [`load_obj`] via tobj
//! - **Settings**: [`RenderSettings`], camera and sampling parameters (JSON)
//! - **Output**: gamma correction and PPM/PNG encoding
//!
//! # Example
//!
//! ```ignore
//! use octray_core::{load_obj, RenderSettings};
//!
//! let mesh = load_obj("bunny.obj")?;
//! let settings = RenderSettings::from_json_file("render.json")?;
//! println!("{} triangles at {}px wide", mesh.triangle_count(), settings.image_width);
//! ```

pub mod mesh;
pub mod obj;
pub mod output;
pub mod settings;

// Re-export commonly used types
pub use mesh::MeshData;
pub use obj::{load_obj, load_obj_from_str, LoadError};
pub use output::{save_image, save_png, write_ppm, OutputError};
pub use settings::{RenderSettings, SettingsError};
