//! Wavefront OBJ ingestion.
//!
//! Faces are loaded untriangulated so polygon faces reach the renderer with
//! their original vertex counts; only positions are read. All models in a
//! file are merged into one [`MeshData`].

use std::io::{BufRead, Cursor};
use std::path::Path;

use octray_math::Vec3;
use thiserror::Error;

use crate::mesh::MeshData;

/// Errors that can occur during OBJ loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("No faces found in {0}")]
    NoGeometry(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load an OBJ file into a single mesh.
pub fn load_obj<P: AsRef<Path>>(path: P) -> LoadResult<MeshData> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;

    let mesh = merge_models(&models);
    if mesh.is_empty() {
        return Err(LoadError::NoGeometry(path.display().to_string()));
    }

    log::info!(
        "Loaded {}: {} vertices, {} faces ({} triangles) from {} models",
        path.display(),
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.triangle_count(),
        models.len()
    );
    Ok(mesh)
}

/// Load OBJ source text. Material libraries are ignored.
pub fn load_obj_from_str(source: &str) -> LoadResult<MeshData> {
    load_obj_from_reader(&mut Cursor::new(source))
}

fn load_obj_from_reader<R: BufRead>(reader: &mut R) -> LoadResult<MeshData> {
    let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;

    let mesh = merge_models(&models);
    if mesh.is_empty() {
        return Err(LoadError::NoGeometry("<memory>".to_string()));
    }
    Ok(mesh)
}

fn merge_models(models: &[tobj::Model]) -> MeshData {
    let mut merged = MeshData::default();
    for model in models {
        merged.append(&model_to_mesh(&model.mesh));
    }
    merged
}

fn model_to_mesh(mesh: &tobj::Mesh) -> MeshData {
    let positions = mesh
        .positions
        .chunks_exact(3)
        .map(|p| Vec3::new(p[0], p[1], p[2]))
        .collect();

    // tobj leaves face_arities empty when every face is a triangle
    let face_lengths = if mesh.face_arities.is_empty() {
        vec![3; mesh.indices.len() / 3]
    } else {
        mesh.face_arities.clone()
    };

    MeshData::new(positions, face_lengths, mesh.indices.clone())
}
