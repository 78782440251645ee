//! Convenience polyline clipper.
//!
//! Port of `agg_conv_clip_polyline.h`.
//! Wraps `ConvAdaptorVpgen` with `VpgenClipPolyline` for clipping open
//! polylines against an axis-aligned box.

use crate::basics::VertexSource;
use crate::conv_adaptor_vpgen::ConvAdaptorVpgen;
use crate::vpgen_clip_polyline::VpgenClipPolyline;

/// Clips open polylines in a vertex source against a clip box.
///
/// Port of C++ `conv_clip_polyline<VertexSource>`.
pub struct ConvClipPolyline<VS> {
    inner: ConvAdaptorVpgen<VS, VpgenClipPolyline>,
}

impl<VS: VertexSource> ConvClipPolyline<VS> {
    pub fn new(source: VS) -> Self {
        Self {
            inner: ConvAdaptorVpgen::new(source, VpgenClipPolyline::new()),
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

impl<VS: VertexSource> VertexSource for ConvClipPolyline<VS> {
    fn rewind(&mut self, path_id: u32) {
        self.inner.rewind(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        self.inner.vertex(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{is_stop, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO};
    use crate::path_storage::PathStorage;

    fn collect<VS: VertexSource>(vs: &mut VS) -> Vec<(f64, f64, u32)> {
        vs.rewind(0);
        let mut out = Vec::new();
        loop {
            let (mut x, mut y) = (0.0, 0.0);
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            out.push((x, y, cmd));
        }
        out
    }

    #[test]
    fn test_clip_polyline_fully_inside_passes_through() {
        let mut path = PathStorage::new();
        path.move_to(10.0, 10.0);
        path.line_to(50.0, 50.0);

        let mut clip = ConvClipPolyline::new(path);
        clip.clip_box(0.0, 0.0, 100.0, 100.0);
        let v = collect(&mut clip);
        assert_eq!(v, vec![(10.0, 10.0, PATH_CMD_MOVE_TO), (50.0, 50.0, PATH_CMD_LINE_TO)]);
    }

    #[test]
    fn test_clip_polyline_fully_outside_yields_nothing() {
        let mut path = PathStorage::new();
        path.move_to(200.0, 200.0);
        path.line_to(250.0, 200.0);

        let mut clip = ConvClipPolyline::new(path);
        clip.clip_box(0.0, 0.0, 100.0, 100.0);
        let v = collect(&mut clip);
        assert!(v.is_empty(), "fully-outside polyline should vanish, got {v:?}");
    }

    #[test]
    fn test_clip_polyline_crossing_box_clips_to_edge() {
        let mut path = PathStorage::new();
        path.move_to(-50.0, 50.0);
        path.line_to(150.0, 50.0);

        let mut clip = ConvClipPolyline::new(path);
        clip.clip_box(0.0, 0.0, 100.0, 100.0);
        let v = collect(&mut clip);
        assert_eq!(v[0], (0.0, 50.0, PATH_CMD_MOVE_TO));
        assert_eq!(v[1], (100.0, 50.0, PATH_CMD_LINE_TO));
    }

    #[test]
    fn test_clip_box_accessors() {
        let path = PathStorage::new();
        let mut clip = ConvClipPolyline::new(path);
        clip.clip_box(1.0, 2.0, 3.0, 4.0);
        assert_eq!((clip.x1(), clip.y1(), clip.x2(), clip.y2()), (1.0, 2.0, 3.0, 4.0));
    }
}
