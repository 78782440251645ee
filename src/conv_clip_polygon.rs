//! Convenience polygon clipper.
//!
//! Port of `agg_conv_clip_polygon.h`.
//! Wraps `ConvAdaptorVpgen` with `VpgenClipPolygon` for clipping closed
//! polygons against an axis-aligned box.

use crate::basics::VertexSource;
use crate::conv_adaptor_vpgen::ConvAdaptorVpgen;
use crate::vpgen_clip_polygon::VpgenClipPolygon;

/// Clips closed polygons in a vertex source against a clip box.
///
/// Port of C++ `conv_clip_polygon<VertexSource>`.
pub struct ConvClipPolygon<VS> {
    inner: ConvAdaptorVpgen<VS, VpgenClipPolygon>,
}

impl<VS: VertexSource> ConvClipPolygon<VS> {
    pub fn new(source: VS) -> Self {
        Self {
            inner: ConvAdaptorVpgen::new(source, VpgenClipPolygon::new()),
        }
    }

    pub fn clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.inner.vpgen_mut().set_clip_box(x1, y1, x2, y2);
    }

    pub fn x1(&self) -> f64 {
        self.inner.vpgen().x1()
    }
    pub fn y1(&self) -> f64 {
        self.inner.vpgen().y1()
    }
    pub fn x2(&self) -> f64 {
        self.inner.vpgen().x2()
    }
    pub fn y2(&self) -> f64 {
        self.inner.vpgen().y2()
    }

    pub fn source(&self) -> &VS {
        self.inner.source()
    }

    pub fn source_mut(&mut self) -> &mut VS {
        self.inner.source_mut()
    }
}

impl<VS: VertexSource> VertexSource for ConvClipPolygon<VS> {
    fn rewind(&mut self, path_id: u32) {
        self.inner.rewind(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        self.inner.vertex(x, y)
    }
}
