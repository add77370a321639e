// Copyright @yucwang 2026

use crate::core::error::LoadError;
use crate::core::mesh::TetMesh;
use crate::core::options::MeshOptions;
use crate::io::text_source::TextSource;
use crate::io::tmesh::parse_tmesh;

/// Parses and builds a mesh from text, then runs the first normal and
/// position pass.
pub fn load_mesh_from_str(text: &str, options: &MeshOptions) -> Result<TetMesh, LoadError> {
    let parsed = parse_tmesh(text, options)?;
    if parsed.skipped_directives > 0 {
        log::debug!("Skipped {} unknown directives.", parsed.skipped_directives);
    }

    let mut mesh = TetMesh::build(parsed, options)?;
    let report = mesh.update();
    log::info!("Mesh loaded: {} vertices, {} faces, {} tetrahedra, {} degenerate faces.",
               mesh.vertex_count(), mesh.face_count(), mesh.tetrahedra().len(), report.faces.len());
    Ok(mesh)
}

/// Fetches `id` from `source` and loads it. Nothing is returned unless every
/// stage succeeds.
pub async fn load_mesh<S: TextSource>(source: &S,
                                      id: &str,
                                      options: &MeshOptions) -> Result<TetMesh, LoadError> {
    log::info!("Loading mesh: {}.", id);
    let text = source.fetch(id).await?;
    load_mesh_from_str(&text, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::text_source::{ FetchError, MemorySource };
    use crate::io::tmesh::ParseErrorKind;
    use crate::math::constants::Vector3f;

    const QUAD: &str = "\
# two triangles forming a unit square
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
";

    #[test]
    fn test_load_from_memory_source() {
        let source = MemorySource::new().with_document("quad.tmesh", QUAD);
        let mesh = pollster::block_on(load_mesh(&source, "quad.tmesh", &MeshOptions::default()))
            .expect("failed to load");

        assert_eq!(mesh.face_count(), 2);
        assert!((mesh.total_area() - 1.0).abs() < 1e-5);
        for n in mesh.vertex_normals() {
            assert!((n - Vector3f::new(0.0, 0.0, 1.0)).norm() < 1e-5);
        }
        assert_eq!(&mesh.corner_positions()[9..12], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_document_is_fetch_error() {
        let source = MemorySource::new();
        let result = pollster::block_on(load_mesh(&source, "nope.tmesh", &MeshOptions::default()));
        assert!(matches!(result, Err(LoadError::Fetch(FetchError::NotFound { .. }))));
    }

    #[test]
    fn test_parse_error_aborts_load() {
        let result = load_mesh_from_str("v 0 0 0\nv 1 0 oops\n", &MeshOptions::default());
        match result {
            Err(LoadError::Parse(err)) => {
                assert_eq!(err.line, 2);
                assert_eq!(err.kind, ParseErrorKind::InvalidFloat("oops".to_string()));
            }
            _ => panic!("expected a parse error"),
        }
    }

    #[test]
    fn test_non_finite_coordinates_abort_load() {
        let result = load_mesh_from_str("v nan 0 0\nv 1 0 0\nv 0 inf 0\nf 1 2 3\n", &MeshOptions::default());
        match result {
            Err(LoadError::Parse(err)) => {
                assert_eq!(err.line, 1);
                assert_eq!(err.kind, ParseErrorKind::NonFiniteFloat("nan".to_string()));
            }
            _ => panic!("expected a parse error"),
        }
    }

    #[test]
    fn test_out_of_range_aborts_load() {
        let result = load_mesh_from_str("v 0 0 0\nf 1 2 3\n", &MeshOptions::default());
        assert!(matches!(result, Err(LoadError::OutOfRange(_))));
    }
}
