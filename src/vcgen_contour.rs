//! Contour vertex generator.
//!
//! Port of `agg_vcgen_contour.h` / `agg_vcgen_contour.cpp` — generates
//! an offset contour from a closed polygon path using `MathStroke`.

use crate::array::{VertexDist, VertexSequence};
use crate::basics::{
    get_close_flag, get_orientation, is_ccw, is_end_poly, is_move_to, is_oriented, is_vertex,
    PointD, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP, PATH_FLAGS_CCW,
    PATH_FLAGS_CLOSE, PATH_FLAGS_NONE,
};
use crate::math::calc_polygon_area_vd;
use crate::math_stroke::{InnerJoin, LineCap, LineJoin, MathStroke};

// ============================================================================
// VcgenContour
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Initial,
    Ready,
    Outline,
    OutVertices,
    EndPoly,
    Stop,
}

/// Contour vertex generator.
///
/// Generates an offset contour (inset or outset) from a closed polygon.
/// Uses `MathStroke` for join calculations.
///
/// Port of C++ `vcgen_contour`.
pub struct VcgenContour {
    stroker: MathStroke,
    width: f64,
    src_vertices: VertexSequence,
    out_vertices: Vec<PointD>,
    status: Status,
    src_vertex: usize,
    out_vertex: usize,
    closed: u32,
    orientation: u32,
    auto_detect: bool,
}

impl VcgenContour {
    pub fn new() -> Self {
        Self {
            stroker: MathStroke::new(),
            width: 1.0,
            src_vertices: VertexSequence::new(),
            out_vertices: Vec::new(),
            status: Status::Initial,
            src_vertex: 0,
            out_vertex: 0,
            closed: 0,
            orientation: 0,
            auto_detect: false,
        }
    }

    // Parameter forwarding to MathStroke
    pub fn set_line_cap(&mut self, lc: LineCap) {
        self.stroker.set_line_cap(lc);
    }
    pub fn line_cap(&self) -> LineCap {
        self.stroker.line_cap()
    }

    pub fn set_line_join(&mut self, lj: LineJoin) {
        self.stroker.set_line_join(lj);
    }
    pub fn line_join(&self) -> LineJoin {
        self.stroker.line_join()
    }

    pub fn set_inner_join(&mut self, ij: InnerJoin) {
        self.stroker.set_inner_join(ij);
    }
    pub fn inner_join(&self) -> InnerJoin {
        self.stroker.inner_join()
    }

    pub fn set_width(&mut self, w: f64) {
        self.width = w;
        self.stroker.set_width(w);
    }
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_miter_limit(&mut self, ml: f64) {
        self.stroker.set_miter_limit(ml);
    }
    pub fn miter_limit(&self) -> f64 {
        self.stroker.miter_limit()
    }

    pub fn set_miter_limit_theta(&mut self, t: f64) {
        self.stroker.set_miter_limit_theta(t);
    }

    pub fn set_inner_miter_limit(&mut self, ml: f64) {
        self.stroker.set_inner_miter_limit(ml);
    }
    pub fn inner_miter_limit(&self) -> f64 {
        self.stroker.inner_miter_limit()
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.stroker.set_approximation_scale(s);
    }
    pub fn approximation_scale(&self) -> f64 {
        self.stroker.approximation_scale()
    }

    pub fn set_auto_detect_orientation(&mut self, v: bool) {
        self.auto_detect = v;
    }
    pub fn auto_detect_orientation(&self) -> bool {
        self.auto_detect
    }

    // Generator interface
    pub fn remove_all(&mut self) {
        self.src_vertices.remove_all();
        self.closed = 0;
        self.orientation = 0;
        self.status = Status::Initial;
    }

    pub fn add_vertex(&mut self, x: f64, y: f64, cmd: u32) {
        self.status = Status::Initial;
        if is_move_to(cmd) {
            self.src_vertices.modify_last(VertexDist::new(x, y));
        } else if is_vertex(cmd) {
            self.src_vertices.add(VertexDist::new(x, y));
        } else if is_end_poly(cmd) {
            self.closed = get_close_flag(cmd);
            if self.orientation == PATH_FLAGS_NONE {
                self.orientation = get_orientation(cmd);
            }
        }
    }

    // Vertex Source Interface
    pub fn rewind(&mut self, _path_id: u32) {
        if self.status == Status::Initial {
            self.src_vertices.close(true);
            if self.auto_detect && !is_oriented(self.orientation) {
                let verts: Vec<VertexDist> = (0..self.src_vertices.size())
                    .map(|i| self.src_vertices[i])
                    .collect();
                self.orientation = if calc_polygon_area_vd(&verts) > 0.0 {
                    PATH_FLAGS_CCW
                } else {
                    crate::basics::PATH_FLAGS_CW
                };
            }
            if is_oriented(self.orientation) {
                self.stroker.set_width(if is_ccw(self.orientation) {
                    self.width
                } else {
                    -self.width
                });
            }
        }
        self.status = Status::Ready;
        self.src_vertex = 0;
    }

    pub fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        // C++ uses while(!is_stop(cmd)) with switch/case fallthrough.
        // Rust: loop{match} where arms fall through or return.
        let mut cmd = PATH_CMD_LINE_TO;
        loop {
            match self.status {
                Status::Initial => {
                    self.rewind(0);
                    // fall through to Ready
                }
                Status::Ready => {
                    if self.src_vertices.size() < 2 + (self.closed != 0) as usize {
                        return PATH_CMD_STOP;
                    }
                    self.status = Status::Outline;
                    cmd = PATH_CMD_MOVE_TO;
                    self.src_vertex = 0;
                    self.out_vertex = 0;
                    // fall through to Outline
                }
                Status::Outline => {
                    if self.src_vertex >= self.src_vertices.size() {
                        self.status = Status::EndPoly;
                        continue;
                    }
                    // Copy to locals to avoid borrow conflicts
                    let v_prev = *self.src_vertices.prev(self.src_vertex);
                    let v_curr = *self.src_vertices.curr(self.src_vertex);
                    let v_next = *self.src_vertices.next(self.src_vertex);
                    self.stroker.calc_join(
                        &mut self.out_vertices,
                        &v_prev,
                        &v_curr,
                        &v_next,
                        v_prev.dist,
                        v_curr.dist,
                    );
                    self.src_vertex += 1;
                    self.status = Status::OutVertices;
                    self.out_vertex = 0;
                    // fall through to OutVertices
                }
                Status::OutVertices => {
                    if self.out_vertex >= self.out_vertices.len() {
                        self.status = Status::Outline;
                        // continue loop back to Outline
                    } else {
                        let c = self.out_vertices[self.out_vertex];
                        self.out_vertex += 1;
                        *x = c.x;
                        *y = c.y;
                        return cmd;
                    }
                }
                Status::EndPoly => {
                    if self.closed == 0 {
                        return PATH_CMD_STOP;
                    }
                    self.status = Status::Stop;
                    return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE | PATH_FLAGS_CCW;
                }
                Status::Stop => {
                    return PATH_CMD_STOP;
                }
            }
        }
    }
}

impl Default for VcgenContour {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::conv_adaptor_vcgen::VcgenGenerator for VcgenContour {
    fn remove_all(&mut self) {
        self.remove_all();
    }
    fn add_vertex(&mut self, x: f64, y: f64, cmd: u32) {
        self.add_vertex(x, y, cmd);
    }
    fn rewind(&mut self, path_id: u32) {
        self.rewind(path_id);
    }
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        self.vertex(x, y)
    }
}

// ============================================================================
// Tests
// ============================================================================
