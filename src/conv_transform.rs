//! Affine transform converter for vertex sources.
//!
//! Port of `agg_conv_transform.h` — wraps a `VertexSource` and applies
//! a `TransAffine` transformation to each vertex coordinate.

use crate::basics::{is_vertex, VertexSource};
use crate::trans_affine::TransAffine;

// ============================================================================
// ConvTransform
// ============================================================================

/// Applies an affine transform to each vertex from a source.
///
/// Port of C++ `conv_transform<VertexSource, Transformer>`.
/// Owns the source; use `ConvTransform<&mut PathStorage>` to borrow.
pub struct ConvTransform<VS: VertexSource> {
    source: VS,
    trans: TransAffine,
}

impl<VS: VertexSource> ConvTransform<VS> {
    pub fn new(source: VS, trans: TransAffine) -> Self {
        Self { source, trans }
    }

    pub fn set_transform(&mut self, trans: TransAffine) {
        self.trans = trans;
    }

    pub fn transform(&self) -> &TransAffine {
        &self.trans
    }

    pub fn source(&self) -> &VS {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut VS {
        &mut self.source
    }
}

impl<VS: VertexSource> VertexSource for ConvTransform<VS> {
    fn rewind(&mut self, path_id: u32) {
        self.source.rewind(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        let cmd = self.source.vertex(x, y);
        if is_vertex(cmd) {
            self.trans.transform(x, y);
        }
        cmd
    }
}

// ============================================================================
// Tests
// ============================================================================
