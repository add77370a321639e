// Copyright @yucwang 2026

use crate::math::constants::{ Float, DEGENERATE_EPSILON };

/// Knobs shared by parsing, building and the normal pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshOptions {
    /// Faces with area or cross-product length at or below this are flagged degenerate.
    pub degenerate_epsilon: Float,
    /// Fan-triangulate faces with more than three corners instead of rejecting them.
    pub triangulate_polygons: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            degenerate_epsilon: DEGENERATE_EPSILON,
            triangulate_polygons: true,
        }
    }
}
