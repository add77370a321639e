// Copyright @yucwang 2026

use crate::core::adjacency::VertexFaceAdjacency;
use crate::core::buffers::{ BufferAttribute, BufferListener, CornerBuffers, NullListener };
use crate::core::error::{ IndexedElement, OutOfRangeIndexError };
use crate::core::normals::{ self, DegenerateReport };
use crate::core::options::MeshOptions;
use crate::io::tmesh::{ Face, ParsedMesh, Tetrahedron };
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector2f, Vector3f };

/// Surface of a tetrahedral mesh plus its derived render data.
///
/// Topology is fixed once built. Positions may be rewritten from outside
/// (e.g. by a simulation step), after which [`TetMesh::update`] brings the
/// normals and per-corner buffers back in line.
pub struct TetMesh {
    positions: Vec<Vector3f>,
    texcoords: Vec<Vector2f>,
    faces: Vec<Face>,
    tetrahedra: Vec<Tetrahedron>,
    adjacency: VertexFaceAdjacency,
    face_normals: Vec<Vector3f>,
    face_areas: Vec<Float>,
    vertex_normals: Vec<Vector3f>,
    corners: CornerBuffers,
    options: MeshOptions,
    listener: Box<dyn BufferListener>,
}

impl TetMesh {
    /// Validates indices and allocates every derived buffer. Normals and
    /// per-corner positions start zeroed; texcoords are filled here.
    pub fn build(parsed: ParsedMesh, options: &MeshOptions) -> Result<Self, OutOfRangeIndexError> {
        let vertex_count = parsed.vertex_count();
        let texcoord_count = parsed.texcoord_count();
        validate_indices(&parsed.faces, &parsed.tetrahedra, vertex_count, texcoord_count)?;

        let positions: Vec<Vector3f> = parsed.vertices
            .chunks_exact(3)
            .map(|p| Vector3f::new(p[0], p[1], p[2]))
            .collect();
        let texcoords: Vec<Vector2f> = parsed.texcoords
            .chunks_exact(2)
            .map(|t| Vector2f::new(t[0], t[1]))
            .collect();

        let face_count = parsed.faces.len();
        let adjacency = VertexFaceAdjacency::build(vertex_count, &parsed.faces);
        let mut corners = CornerBuffers::zeroed(face_count);
        corners.write_texcoords(&parsed.faces, &texcoords);

        Ok(Self {
            positions,
            texcoords,
            faces: parsed.faces,
            tetrahedra: parsed.tetrahedra,
            adjacency,
            face_normals: vec![Vector3f::zeros(); face_count],
            face_areas: vec![0.0; face_count],
            vertex_normals: vec![Vector3f::zeros(); vertex_count],
            corners,
            options: *options,
            listener: Box::new(NullListener),
        })
    }

    pub fn set_listener(&mut self, listener: Box<dyn BufferListener>) {
        self.listener = listener;
    }

    pub fn clear_listener(&mut self) {
        self.listener = Box::new(NullListener);
    }

    /// Recomputes face normals, face areas, vertex normals and the per-corner
    /// normal buffer from the current positions.
    pub fn recompute_normals(&mut self) -> DegenerateReport {
        let mut report = DegenerateReport::default();
        let epsilon = self.options.degenerate_epsilon;

        normals::compute_face_normals(&self.positions, &self.faces, epsilon,
                                      &mut self.face_normals, &mut self.face_areas, &mut report);
        normals::compute_vertex_normals(&self.adjacency, &self.face_normals, &self.face_areas, epsilon,
                                        &mut self.vertex_normals, &mut report);
        self.corners.write_normals(&self.faces, &self.vertex_normals);

        if !report.is_empty() {
            log::warn!("Degenerate geometry: {} faces, {} vertices written with zero normals.",
                       report.faces.len(), report.vertices.len());
        }
        self.listener.buffers_changed(BufferAttribute::Normal);
        report
    }

    /// Copies current positions into the per-corner position buffer.
    pub fn sync_positions(&mut self) {
        self.corners.write_positions(&self.faces, &self.positions);
        self.listener.buffers_changed(BufferAttribute::Position);
    }

    /// Normals then positions, the usual call after a deformation step.
    pub fn update(&mut self) -> DegenerateReport {
        let report = self.recompute_normals();
        self.sync_positions();
        report
    }

    pub fn apply_transform(&mut self, scale: &Vector3f, translate: &Vector3f) -> DegenerateReport {
        for v in &mut self.positions {
            *v = v.component_mul(scale) + translate;
        }
        self.update()
    }

    pub fn bounding_box(&self) -> AABB {
        AABB::from_points(&self.positions)
    }

    /// Sum of face areas as of the last normal pass.
    pub fn total_area(&self) -> Float {
        self.face_areas.iter().sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn positions(&self) -> &[Vector3f] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Vector3f] {
        &mut self.positions
    }

    pub fn texcoords(&self) -> &[Vector2f] {
        &self.texcoords
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn tetrahedra(&self) -> &[Tetrahedron] {
        &self.tetrahedra
    }

    pub fn adjacency(&self) -> &VertexFaceAdjacency {
        &self.adjacency
    }

    pub fn face_normals(&self) -> &[Vector3f] {
        &self.face_normals
    }

    pub fn face_areas(&self) -> &[Float] {
        &self.face_areas
    }

    pub fn vertex_normals(&self) -> &[Vector3f] {
        &self.vertex_normals
    }

    pub fn corner_positions(&self) -> &[Float] {
        &self.corners.positions
    }

    pub fn corner_texcoords(&self) -> &[Float] {
        &self.corners.texcoords
    }

    pub fn corner_normals(&self) -> &[Float] {
        &self.corners.normals
    }

    pub fn options(&self) -> &MeshOptions {
        &self.options
    }
}

fn validate_indices(faces: &[Face],
                    tetrahedra: &[Tetrahedron],
                    vertex_count: usize,
                    texcoord_count: usize) -> Result<(), OutOfRangeIndexError> {
    let check = |element: IndexedElement, element_index: usize, index: usize, bound: usize| {
        if index < bound {
            Ok(())
        } else {
            Err(OutOfRangeIndexError { element, element_index, index, bound })
        }
    };

    for (idx, face) in faces.iter().enumerate() {
        for corner in face.iter() {
            check(IndexedElement::FaceVertex, idx, corner.vertex, vertex_count)?;
            if let Some(t) = corner.texcoord {
                check(IndexedElement::FaceTexCoord, idx, t, texcoord_count)?;
            }
        }
    }
    for (idx, tet) in tetrahedra.iter().enumerate() {
        for &v in tet.iter() {
            check(IndexedElement::TetrahedronVertex, idx, v, vertex_count)?;
        }
    }
    Ok(())
}
