// Copyright @yucwang 2026

use crate::io::tmesh::Face;

/// Vertex to incident-face lookup in compressed sparse row form.
///
/// Faces for vertex `v` live in `faces[offsets[v]..offsets[v + 1]]`, in
/// ascending face order. A face that names the same vertex through several
/// corners is listed once for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexFaceAdjacency {
    offsets: Vec<usize>,
    faces: Vec<usize>,
}

impl VertexFaceAdjacency {
    /// Every corner vertex must be below `vertex_count`.
    pub fn build(vertex_count: usize, faces: &[Face]) -> Self {
        let mut counts = vec![0usize; vertex_count];
        for face in faces {
            for (k, corner) in face.iter().enumerate() {
                if first_occurrence(face, k) {
                    counts[corner.vertex] += 1;
                }
            }
        }

        let mut offsets = Vec::with_capacity(vertex_count + 1);
        let mut total = 0;
        offsets.push(0);
        for count in &counts {
            total += count;
            offsets.push(total);
        }

        let mut cursor: Vec<usize> = offsets[..vertex_count].to_vec();
        let mut flat = vec![0usize; total];
        for (face_idx, face) in faces.iter().enumerate() {
            for (k, corner) in face.iter().enumerate() {
                if first_occurrence(face, k) {
                    let slot = &mut cursor[corner.vertex];
                    flat[*slot] = face_idx;
                    *slot += 1;
                }
            }
        }

        Self { offsets, faces: flat }
    }

    pub fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn faces_of(&self, vertex: usize) -> &[usize] {
        &self.faces[self.offsets[vertex]..self.offsets[vertex + 1]]
    }

    pub fn is_referenced(&self, vertex: usize) -> bool {
        self.offsets[vertex + 1] > self.offsets[vertex]
    }
}

fn first_occurrence(face: &Face, k: usize) -> bool {
    face[..k].iter().all(|c| c.vertex != face[k].vertex)
}
