//! Base renderer with clipping.
//!
//! Port of `agg_renderer_base.h` — wraps a pixel format with a clip rectangle,
//! ensuring all rendering operations are bounded within the visible area.

use crate::basics::{CoverType, RectI};
use crate::pixfmt_rgba::PixelFormat;

// ============================================================================
// RendererBase — clip-and-delegate renderer
// ============================================================================

/// Base renderer that clips all operations to a rectangle before delegating
/// to the underlying pixel format.
///
/// Port of C++ `renderer_base<PixelFormat>`.
pub struct RendererBase<PF: PixelFormat> {
    ren: PF,
    clip_box: RectI,
}

impl<PF: PixelFormat> RendererBase<PF> {
    /// Create a new renderer wrapping the given pixel format.
    /// The clip box is initialized to the full buffer extent.
    pub fn new(ren: PF) -> Self {
        let w = ren.width() as i32;
        let h = ren.height() as i32;
        Self {
            ren,
            clip_box: RectI::new(0, 0, w - 1, h - 1),
        }
    }

    pub fn width(&self) -> u32 {
        self.ren.width()
    }
    pub fn height(&self) -> u32 {
        self.ren.height()
    }

    /// Set the clip rectangle (will be intersected with the buffer bounds).
    pub fn clip_box_i(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let mut cb = RectI::new(x1, y1, x2, y2);
        cb.normalize();
        if cb.clip(&RectI::new(
            0,
            0,
            self.ren.width() as i32 - 1,
            self.ren.height() as i32 - 1,
        )) {
            self.clip_box = cb;
            true
        } else {
            self.clip_box.x1 = 1;
            self.clip_box.y1 = 1;
            self.clip_box.x2 = 0;
            self.clip_box.y2 = 0;
            false
        }
    }

    /// Reset clipping to the full buffer or to nothing.
    pub fn reset_clipping(&mut self, visibility: bool) {
        if visibility {
            self.clip_box.x1 = 0;
            self.clip_box.y1 = 0;
            self.clip_box.x2 = self.ren.width() as i32 - 1;
            self.clip_box.y2 = self.ren.height() as i32 - 1;
        } else {
            self.clip_box.x1 = 1;
            self.clip_box.y1 = 1;
            self.clip_box.x2 = 0;
            self.clip_box.y2 = 0;
        }
    }

    pub fn clip_box(&self) -> &RectI {
        &self.clip_box
    }
    pub fn xmin(&self) -> i32 {
        self.clip_box.x1
    }
    pub fn ymin(&self) -> i32 {
        self.clip_box.y1
    }
    pub fn xmax(&self) -> i32 {
        self.clip_box.x2
    }
    pub fn ymax(&self) -> i32 {
        self.clip_box.y2
    }

    #[inline]
    pub fn inbox(&self, x: i32, y: i32) -> bool {
        x >= self.clip_box.x1
            && y >= self.clip_box.y1
            && x <= self.clip_box.x2
            && y <= self.clip_box.y2
    }

    /// Get a reference to the underlying pixel format.
    pub fn ren(&self) -> &PF {
        &self.ren
    }

    /// Get a mutable reference to the underlying pixel format.
    pub fn ren_mut(&mut self) -> &mut PF {
        &mut self.ren
    }

    // ========================================================================
    // Rendering operations (clip then delegate)
    // ========================================================================

    /// Clear the entire buffer to a solid color.
    pub fn clear(&mut self, c: &PF::ColorType) {
        let w = self.ren.width();
        if w > 0 {
            let h = self.ren.height();
            for y in 0..h as i32 {
                self.ren.copy_hline(0, y, w, c);
            }
        }
    }

    /// Copy a single pixel (clipped).
    pub fn copy_pixel(&mut self, x: i32, y: i32, c: &PF::ColorType) {
        if self.inbox(x, y) {
            self.ren.copy_pixel(x, y, c);
        }
    }

    /// Blend a single pixel (clipped).
    pub fn blend_pixel(&mut self, x: i32, y: i32, c: &PF::ColorType, cover: CoverType) {
        if self.inbox(x, y) {
            self.ren.blend_pixel(x, y, c, cover);
        }
    }

    /// Get the pixel at (x, y), or default if outside clip.
    pub fn pixel(&self, x: i32, y: i32) -> PF::ColorType
    where
        PF::ColorType: Default,
    {
        if self.inbox(x, y) {
            self.ren.pixel(x, y)
        } else {
            PF::ColorType::default()
        }
    }

    /// Copy a horizontal line (clipped). x1, x2 are inclusive endpoints.
    pub fn copy_hline(&mut self, mut x1: i32, y: i32, mut x2: i32, c: &PF::ColorType) {
        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
        }
        if y > self.ymax() || y < self.ymin() || x1 > self.xmax() || x2 < self.xmin() {
            return;
        }
        x1 = x1.max(self.xmin());
        x2 = x2.min(self.xmax());
        self.ren.copy_hline(x1, y, (x2 - x1 + 1) as u32, c);
    }

    /// Blend a horizontal line (clipped). x1, x2 are inclusive endpoints.
    pub fn blend_hline(
        &mut self,
        mut x1: i32,
        y: i32,
        mut x2: i32,
        c: &PF::ColorType,
        cover: CoverType,
    ) {
        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
        }
        if y > self.ymax() || y < self.ymin() || x1 > self.xmax() || x2 < self.xmin() {
            return;
        }
        x1 = x1.max(self.xmin());
        x2 = x2.min(self.xmax());
        self.ren.blend_hline(x1, y, (x2 - x1 + 1) as u32, c, cover);
    }

    /// Blend a solid horizontal span with per-pixel coverage (clipped).
    pub fn blend_solid_hspan(
        &mut self,
        mut x: i32,
        y: i32,
        mut len: i32,
        c: &PF::ColorType,
        covers: &[CoverType],
    ) {
        if y > self.ymax() || y < self.ymin() {
            return;
        }

        let mut covers_offset = 0usize;
        if x < self.xmin() {
            let d = self.xmin() - x;
            len -= d;
            if len <= 0 {
                return;
            }
            covers_offset += d as usize;
            x = self.xmin();
        }
        if x + len > self.xmax() + 1 {
            len = self.xmax() - x + 1;
            if len <= 0 {
                return;
            }
        }
        self.ren
            .blend_solid_hspan(x, y, len as u32, c, &covers[covers_offset..]);
    }

    /// Blend a horizontal span with per-pixel colors (clipped).
    ///
    /// If `covers` is non-empty, each pixel uses its corresponding coverage.
    /// If `covers` is empty, all pixels use the uniform `cover` value.
    pub fn blend_color_hspan(
        &mut self,
        mut x: i32,
        y: i32,
        mut len: i32,
        colors: &[PF::ColorType],
        covers: &[CoverType],
        cover: CoverType,
    ) {
        if y > self.ymax() || y < self.ymin() {
            return;
        }

        let mut colors_offset = 0usize;
        let mut covers_offset = 0usize;
        if x < self.xmin() {
            let d = (self.xmin() - x) as usize;
            len -= d as i32;
            if len <= 0 {
                return;
            }
            if !covers.is_empty() {
                covers_offset += d;
            }
            colors_offset += d;
            x = self.xmin();
        }
        if x + len > self.xmax() + 1 {
            len = self.xmax() - x + 1;
            if len <= 0 {
                return;
            }
        }
        self.ren.blend_color_hspan(
            x,
            y,
            len as u32,
            &colors[colors_offset..],
            if covers.is_empty() {
                &[]
            } else {
                &covers[covers_offset..]
            },
            cover,
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
