//! Vertex processor generator: polyline clipping against a rectangle.
//!
//! Port of `agg_vpgen_clip_polyline.h` — clips an open polyline edge by
//! edge against an axis-aligned box, built on the Cohen-Sutherland point
//! mover already exercised by [`crate::clip_liang_barsky`].

use crate::basics::{Rect, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP};
use crate::clip_liang_barsky::clip_line_segment_f64;
use crate::conv_adaptor_vpgen::VpgenProcessor;

/// Clips an open polyline against a clip box, one segment at a time.
///
/// Each input segment produces zero, one, or two output vertices: a
/// segment that re-enters the box after a gap starts a fresh `MoveTo`,
/// a segment that continues from the previous visible point emits only
/// a `LineTo`.
pub struct VpgenClipPolyline {
    clip_box: Rect<f64>,
    x1: f64,
    y1: f64,
    x: [f64; 2],
    y: [f64; 2],
    cmd: [u32; 2],
    num_vertices: usize,
    vertex: usize,
}

impl VpgenClipPolyline {
    pub fn new() -> Self {
        Self {
            clip_box: Rect::new(0.0, 0.0, 1.0, 1.0),
            x1: 0.0,
            y1: 0.0,
            x: [0.0; 2],
            y: [0.0; 2],
            cmd: [PATH_CMD_STOP; 2],
            num_vertices: 0,
            vertex: 0,
        }
    }

    pub fn set_clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.clip_box = Rect::new(x1, y1, x2, y2);
        self.clip_box.normalize();
    }

    pub fn x1(&self) -> f64 {
        self.clip_box.x1
    }
    pub fn y1(&self) -> f64 {
        self.clip_box.y1
    }
    pub fn x2(&self) -> f64 {
        self.clip_box.x2
    }
    pub fn y2(&self) -> f64 {
        self.clip_box.y2
    }

    pub fn auto_close() -> bool {
        false
    }
    pub fn auto_unclose() -> bool {
        true
    }

    pub fn reset(&mut self) {
        self.vertex = 0;
        self.num_vertices = 0;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.vertex = 0;
        self.num_vertices = 0;
        self.x1 = x;
        self.y1 = y;
        if crate::clip_liang_barsky::clipping_flags(x, y, &self.clip_box) == 0 {
            self.x[0] = x;
            self.y[0] = y;
            self.cmd[0] = PATH_CMD_MOVE_TO;
            self.num_vertices = 1;
        }
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.vertex = 0;
        self.num_vertices = 0;

        let (mut cx1, mut cy1, mut cx2, mut cy2) = (self.x1, self.y1, x, y);
        let ret = clip_line_segment_f64(&mut cx1, &mut cy1, &mut cx2, &mut cy2, &self.clip_box);

        if ret < 4 {
            if ret & 1 != 0 {
                self.x[self.num_vertices] = cx1;
                self.y[self.num_vertices] = cy1;
                self.cmd[self.num_vertices] = PATH_CMD_MOVE_TO;
                self.num_vertices += 1;
            }
            self.x[self.num_vertices] = cx2;
            self.y[self.num_vertices] = cy2;
            self.cmd[self.num_vertices] = PATH_CMD_LINE_TO;
            self.num_vertices += 1;
        }

        self.x1 = x;
        self.y1 = y;
    }

    pub fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.vertex < self.num_vertices {
            *x = self.x[self.vertex];
            *y = self.y[self.vertex];
            let cmd = self.cmd[self.vertex];
            self.vertex += 1;
            return cmd;
        }
        PATH_CMD_STOP
    }
}

impl Default for VpgenClipPolyline {
    fn default() -> Self {
        Self::new()
    }
}

impl VpgenProcessor for VpgenClipPolyline {
    fn reset(&mut self) {
        self.reset();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.line_to(x, y);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        self.vertex(x, y)
    }

    fn auto_close() -> bool {
        VpgenClipPolyline::auto_close()
    }

    fn auto_unclose() -> bool {
        VpgenClipPolyline::auto_unclose()
    }
}
