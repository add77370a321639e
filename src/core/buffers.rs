// Copyright @yucwang 2026

use crate::io::tmesh::Face;
use crate::math::constants::{ Float, Vector2f, Vector3f };

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferAttribute {
    Position,
    TexCoord,
    Normal,
}

impl BufferAttribute {
    pub fn components(&self) -> usize {
        match self {
            BufferAttribute::Position | BufferAttribute::Normal => 3,
            BufferAttribute::TexCoord => 2,
        }
    }

    fn bit(&self) -> u8 {
        match self {
            BufferAttribute::Position => 1,
            BufferAttribute::TexCoord => 2,
            BufferAttribute::Normal => 4,
        }
    }
}

/// Told whenever a per-corner buffer has been rewritten and needs re-upload.
pub trait BufferListener {
    fn buffers_changed(&mut self, attribute: BufferAttribute);
}

/// Listener in place until a renderer registers one.
pub struct NullListener;

impl BufferListener for NullListener {
    fn buffers_changed(&mut self, _attribute: BufferAttribute) {}
}

/// Stale-attribute flags shared between the mesh and a renderer.
///
/// Clone one copy into the mesh as its listener and keep the other; the
/// renderer calls [`DirtyFlags::take`] to mark an attribute consumed.
#[derive(Clone, Default)]
pub struct DirtyFlags {
    bits: Arc<AtomicU8>,
}

impl DirtyFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self, attribute: BufferAttribute) -> bool {
        self.bits.load(Ordering::Acquire) & attribute.bit() != 0
    }

    /// Clears the flag, returning whether it was set.
    pub fn take(&self, attribute: BufferAttribute) -> bool {
        let previous = self.bits.fetch_and(!attribute.bit(), Ordering::AcqRel);
        previous & attribute.bit() != 0
    }
}

impl BufferListener for DirtyFlags {
    fn buffers_changed(&mut self, attribute: BufferAttribute) {
        self.bits.fetch_or(attribute.bit(), Ordering::AcqRel);
    }
}

/// Flat, non-indexed render buffers with one entry per face corner.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerBuffers {
    pub positions: Vec<Float>,
    pub texcoords: Vec<Float>,
    pub normals: Vec<Float>,
}

impl CornerBuffers {
    pub fn zeroed(face_count: usize) -> Self {
        let corners = 3 * face_count;
        Self {
            positions: vec![0.0; corners * BufferAttribute::Position.components()],
            texcoords: vec![0.0; corners * BufferAttribute::TexCoord.components()],
            normals: vec![0.0; corners * BufferAttribute::Normal.components()],
        }
    }

    pub fn corner_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn write_positions(&mut self, faces: &[Face], positions: &[Vector3f]) {
        write_per_corner3(&mut self.positions, faces, positions);
    }

    pub fn write_normals(&mut self, faces: &[Face], vertex_normals: &[Vector3f]) {
        write_per_corner3(&mut self.normals, faces, vertex_normals);
    }

    /// Corners without a texcoord index get (0, 0).
    pub fn write_texcoords(&mut self, faces: &[Face], texcoords: &[Vector2f]) {
        let corners = faces.iter().flat_map(|face| face.iter());
        for (slot, corner) in self.texcoords.chunks_exact_mut(2).zip(corners) {
            let uv = corner.texcoord
                .and_then(|i| texcoords.get(i))
                .cloned()
                .unwrap_or_else(Vector2f::zeros);
            slot.copy_from_slice(uv.as_slice());
        }
    }
}

fn write_per_corner3(buffer: &mut [Float], faces: &[Face], per_vertex: &[Vector3f]) {
    let corners = faces.iter().flat_map(|face| face.iter());
    for (slot, corner) in buffer.chunks_exact_mut(3).zip(corners) {
        slot.copy_from_slice(per_vertex[corner.vertex].as_slice());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::tmesh::Corner;

    #[test]
    fn test_dirty_flags() {
        let flags = DirtyFlags::new();
        let mut listener = flags.clone();
        assert!(!flags.is_dirty(BufferAttribute::Position));

        listener.buffers_changed(BufferAttribute::Position);
        listener.buffers_changed(BufferAttribute::Normal);
        assert!(flags.is_dirty(BufferAttribute::Position));
        assert!(!flags.is_dirty(BufferAttribute::TexCoord));

        assert!(flags.take(BufferAttribute::Position));
        assert!(!flags.take(BufferAttribute::Position));
        assert!(flags.is_dirty(BufferAttribute::Normal));
    }

    #[test]
    fn test_corner_buffers_layout() {
        let faces = vec![[Corner::new(2, Some(1)), Corner::new(0, None), Corner::new(1, Some(0))]];
        let positions = vec![Vector3f::new(0.0, 0.0, 0.0),
                             Vector3f::new(1.0, 0.0, 0.0),
                             Vector3f::new(0.0, 1.0, 0.0)];
        let uvs = vec![Vector2f::new(0.25, 0.5), Vector2f::new(0.75, 1.0)];

        let mut buffers = CornerBuffers::zeroed(faces.len());
        assert_eq!(buffers.corner_count(), 3);
        assert_eq!(buffers.texcoords.len(), 6);

        buffers.write_positions(&faces, &positions);
        buffers.write_texcoords(&faces, &uvs);
        assert_eq!(buffers.positions, vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(buffers.texcoords, vec![0.75, 1.0, 0.0, 0.0, 0.25, 0.5]);
    }
}
