//! Vertex processor generator: polygon clipping against a rectangle.
//!
//! Port of `agg_vpgen_clip_polygon.h` — clips a closed polygon against
//! an axis-aligned box using the Sutherland-Hodgman algorithm.
//!
//! `ConvAdaptorVpgen` drives `auto_close() == true` generators by
//! synthesizing a final `line_to(start_x, start_y)` back to the
//! subpath's own starting point before moving on; this generator uses
//! that synthetic closing edge as the signal that the whole subpath has
//! been collected, buffers vertices until then, and emits the clipped
//! ring only once the closing edge arrives.

use crate::basics::{Rect, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP};
use crate::conv_adaptor_vpgen::VpgenProcessor;

fn clip_edge(
    input: &[(f64, f64)],
    inside: impl Fn(f64, f64) -> bool,
    intersect: impl Fn((f64, f64), (f64, f64)) -> (f64, f64),
) -> Vec<(f64, f64)> {
    if input.is_empty() {
        return Vec::new();
    }
    let mut output = Vec::with_capacity(input.len() + 2);
    let mut prev = input[input.len() - 1];
    let mut prev_inside = inside(prev.0, prev.1);
    for &curr in input {
        let curr_inside = inside(curr.0, curr.1);
        if curr_inside {
            if !prev_inside {
                output.push(intersect(prev, curr));
            }
            output.push(curr);
        } else if prev_inside {
            output.push(intersect(prev, curr));
        }
        prev = curr;
        prev_inside = curr_inside;
    }
    output
}

/// Clip a closed polygon (given as a vertex ring, without a repeated
/// closing point) against an axis-aligned box, four half-planes in turn.
pub fn clip_polygon_sutherland_hodgman(
    subject: &[(f64, f64)],
    clip_box: &Rect<f64>,
) -> Vec<(f64, f64)> {
    let mut poly = subject.to_vec();

    poly = clip_edge(
        &poly,
        |x, _y| x >= clip_box.x1,
        |(x1, y1), (x2, y2)| {
            let t = (clip_box.x1 - x1) / (x2 - x1);
            (clip_box.x1, y1 + t * (y2 - y1))
        },
    );
    poly = clip_edge(
        &poly,
        |x, _y| x <= clip_box.x2,
        |(x1, y1), (x2, y2)| {
            let t = (clip_box.x2 - x1) / (x2 - x1);
            (clip_box.x2, y1 + t * (y2 - y1))
        },
    );
    poly = clip_edge(
        &poly,
        |_x, y| y >= clip_box.y1,
        |(x1, y1), (x2, y2)| {
            let t = (clip_box.y1 - y1) / (y2 - y1);
            (x1 + t * (x2 - x1), clip_box.y1)
        },
    );
    poly = clip_edge(
        &poly,
        |_x, y| y <= clip_box.y2,
        |(x1, y1), (x2, y2)| {
            let t = (clip_box.y2 - y1) / (y2 - y1);
            (x1 + t * (x2 - x1), clip_box.y2)
        },
    );

    poly
}

/// Clips a closed polygon against a clip box.
///
/// Buffers the current subpath's vertices and defers clipping until the
/// synthetic closing edge arrives (see module docs).
pub struct VpgenClipPolygon {
    clip_box: Rect<f64>,
    start_x: f64,
    start_y: f64,
    has_start: bool,
    points: Vec<(f64, f64)>,
    out: Vec<(f64, f64, u32)>,
    cursor: usize,
}

impl VpgenClipPolygon {
    pub fn new() -> Self {
        Self {
            clip_box: Rect::new(0.0, 0.0, 1.0, 1.0),
            start_x: 0.0,
            start_y: 0.0,
            has_start: false,
            points: Vec::new(),
            out: Vec::new(),
            cursor: 0,
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
        true
    }
    pub fn auto_unclose() -> bool {
        false
    }

    pub fn reset(&mut self) {
        self.points.clear();
        self.out.clear();
        self.cursor = 0;
        self.has_start = false;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.points.clear();
        self.out.clear();
        self.cursor = 0;
        self.start_x = x;
        self.start_y = y;
        self.has_start = true;
        self.points.push((x, y));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        if self.has_start && x == self.start_x && y == self.start_y && self.points.len() > 2 {
            self.run_clip();
            return;
        }
        self.points.push((x, y));
    }

    fn run_clip(&mut self) {
        let clipped = clip_polygon_sutherland_hodgman(&self.points, &self.clip_box);
        self.out.clear();
        self.cursor = 0;
        for (i, (x, y)) in clipped.into_iter().enumerate() {
            let cmd = if i == 0 { PATH_CMD_MOVE_TO } else { PATH_CMD_LINE_TO };
            self.out.push((x, y, cmd));
        }
        self.points.clear();
    }

    pub fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.cursor < self.out.len() {
            let (vx, vy, cmd) = self.out[self.cursor];
            *x = vx;
            *y = vy;
            self.cursor += 1;
            return cmd;
        }
        PATH_CMD_STOP
    }
}

impl Default for VpgenClipPolygon {
    fn default() -> Self {
        Self::new()
    }
}

impl VpgenProcessor for VpgenClipPolygon {
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
        VpgenClipPolygon::auto_close()
    }

    fn auto_unclose() -> bool {
        VpgenClipPolygon::auto_unclose()
    }
}
