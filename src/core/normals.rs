// Copyright @yucwang 2026

use crate::core::adjacency::VertexFaceAdjacency;
use crate::io::tmesh::Face;
use crate::math::constants::{ Float, Vector3f };

/// Faces and vertices whose normal could not be formed in the last pass.
/// Their normals were written as zero.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DegenerateReport {
    pub faces: Vec<usize>,
    pub vertices: Vec<usize>,
}

impl DegenerateReport {
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.vertices.is_empty()
    }
}

/// Unit normal and area of triangle (p0, p1, p2), or `None` when degenerate.
///
/// The normal is (p0 - p1) x (p0 - p2); the area comes from Heron's formula.
pub fn face_normal_and_area(p0: &Vector3f,
                            p1: &Vector3f,
                            p2: &Vector3f,
                            epsilon: Float) -> Option<(Vector3f, Float)> {
    let edge_a = p0 - p1;
    let edge_b = p0 - p2;
    let area = heron_area(edge_a.cast::<f64>().norm(),
                          edge_b.cast::<f64>().norm(),
                          (p1 - p2).cast::<f64>().norm()) as Float;

    let cross = edge_a.cross(&edge_b);
    let length = cross.norm();
    if !(length > epsilon) || !(area > epsilon) {
        return None;
    }

    Some((cross / length, area))
}

/// Heron's formula in the cancellation-safe ordering (a >= b >= c).
fn heron_area(a: f64, b: f64, c: f64) -> f64 {
    let mut sides = [a, b, c];
    sides.sort_by(|x, y| y.partial_cmp(x).unwrap_or(std::cmp::Ordering::Equal));
    let [a, b, c] = sides;

    // Rounding can push the radicand slightly negative for slivers.
    let radicand = (a + (b + c)) * (c - (a - b)) * (c + (a - b)) * (a + (b - c));
    0.25 * radicand.max(0.0).sqrt()
}

pub fn compute_face_normals(positions: &[Vector3f],
                            faces: &[Face],
                            epsilon: Float,
                            face_normals: &mut [Vector3f],
                            face_areas: &mut [Float],
                            report: &mut DegenerateReport) {
    for (idx, face) in faces.iter().enumerate() {
        let p0 = &positions[face[0].vertex];
        let p1 = &positions[face[1].vertex];
        let p2 = &positions[face[2].vertex];
        match face_normal_and_area(p0, p1, p2, epsilon) {
            Some((n, area)) => {
                face_normals[idx] = n;
                face_areas[idx] = area;
            }
            None => {
                face_normals[idx] = Vector3f::zeros();
                face_areas[idx] = 0.0;
                report.faces.push(idx);
            }
        }
    }
}

/// Area-weighted average of the adjacent face normals, renormalized.
pub fn compute_vertex_normals(adjacency: &VertexFaceAdjacency,
                              face_normals: &[Vector3f],
                              face_areas: &[Float],
                              epsilon: Float,
                              vertex_normals: &mut [Vector3f],
                              report: &mut DegenerateReport) {
    for (v, normal) in vertex_normals.iter_mut().enumerate() {
        *normal = Vector3f::zeros();
        if !adjacency.is_referenced(v) {
            continue;
        }

        let mut weighted = Vector3f::zeros();
        let mut total_area: Float = 0.0;
        for &f in adjacency.faces_of(v) {
            weighted += face_areas[f] * face_normals[f];
            total_area += face_areas[f];
        }

        if !(total_area > epsilon) {
            report.vertices.push(v);
            continue;
        }

        let average = weighted / total_area;
        let length = average.norm();
        if !(length > epsilon) {
            report.vertices.push(v);
            continue;
        }
        *normal = average / length;
    }
}
