//! Polygon mesh input for the renderer.
//!
//! This is the hand-off format between ingestion (OBJ files, procedural
//! scenes) and the renderer: flat vertex positions, one length per face, and
//! the flattened vertex indices of all faces. Faces may have any number of
//! vertices >= 3 and are fan-triangulated from their first vertex.

use octray_math::Vec3;

/// Polygon soup with per-face vertex counts.
///
/// The arrays are trusted: every face length is >= 3, the lengths sum to
/// `indices.len()`, and every index is below `positions.len()`. Builders of
/// `MeshData` (the OBJ loader, [`MeshData::from_triangles`]) uphold this;
/// nothing downstream re-validates it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Number of vertices of each face
    pub face_lengths: Vec<u32>,

    /// Vertex indices of all faces, concatenated
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, face_lengths: Vec<u32>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(
            face_lengths.iter().map(|&n| n as usize).sum::<usize>(),
            indices.len(),
            "face lengths do not cover the index array"
        );
        Self {
            positions,
            face_lengths,
            indices,
        }
    }

    /// Create a mesh where every face is a triangle.
    pub fn from_triangles(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let face_lengths = vec![3; indices.len() / 3];
        Self::new(positions, face_lengths, indices)
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.face_lengths.len()
    }

    /// Number of triangles the faces fan out into: sum of `len - 2`.
    pub fn triangle_count(&self) -> usize {
        self.face_lengths
            .iter()
            .map(|&n| (n as usize).saturating_sub(2))
            .sum()
    }

    /// Fan-triangulate every face from its first vertex.
    ///
    /// The triangle count is measured first so the output is allocated once.
    pub fn triangulate(&self) -> Vec<[u32; 3]> {
        let mut triangles = Vec::with_capacity(self.triangle_count());

        let mut start = 0;
        for &len in &self.face_lengths {
            let face = &self.indices[start..start + len as usize];
            for pair in face[1..].windows(2) {
                triangles.push([face[0], pair[0], pair[1]]);
            }
            start += len as usize;
        }

        triangles
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Each vertex normal is the normalized sum of the unit normals of the
    /// triangles sharing that vertex (counter-clockwise winding). Vertices
    /// with no usable adjacent face get +Y.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for [i0, i1, i2] in self.triangulate() {
            let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
            let p0 = self.positions[i0];
            let edge1 = self.positions[i1] - p0;
            let edge2 = self.positions[i2] - p0;

            // Degenerate faces contribute nothing
            let face_normal = edge1.cross(edge2).normalize_or_zero();

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            let len = normal.length();
            if len > 0.0 {
                *normal /= len;
            } else {
                *normal = Vec3::Y; // Default up normal for degenerate cases
            }
        }

        normals
    }

    /// Append another mesh, offsetting its indices past this mesh's vertices.
    pub fn append(&mut self, other: &MeshData) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.face_lengths.extend_from_slice(&other.face_lengths);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }

    pub fn is_empty(&self) -> bool {
        self.face_lengths.is_empty()
    }
}
