//! Scanline rendering functions.
//!
//! Port of `agg_renderer_scanline.h` — top-level functions that drive the
//! rasterizer → scanline → renderer pipeline. Each function pairs one
//! rasterizer/scanline-container combination with a fill strategy (solid
//! color, span-generated color, or multi-style compound).

use crate::basics::{CoverType, COVER_FULL};
use crate::color::ColorAdd;
use crate::pixfmt_rgba::PixelFormat;
use crate::rasterizer_compound_aa::RasterizerCompoundAa;
use crate::rasterizer_scanline_aa::{RasterizerScanlineAa, Scanline};
use crate::renderer_base::RendererBase;
use crate::scanline_bin::ScanlineBin;
use crate::scanline_p::ScanlineP8;
use crate::scanline_u::ScanlineU8;
use crate::span_allocator::SpanAllocator;

// ============================================================================
// SpanGenerator / StyleHandler — the traits span-based renderers drive
// ============================================================================

/// Produces per-pixel colors for a span instead of using a single solid
/// color. Port of C++ `span_generator` (the concept implemented by
/// `span_solid`, `span_gradient`, image span generators, etc).
pub trait SpanGenerator {
    type Color;

    /// Called once before the first `generate` call of a render pass.
    fn prepare(&mut self);

    /// Fill `span[..len]` with colors for the pixel run starting at (x, y).
    fn generate(&mut self, span: &mut [Self::Color], x: i32, y: i32, len: u32);
}

/// Associates a compound-rasterizer style index with a color or span
/// generator. Port of C++ `style_handler`.
pub trait StyleHandler {
    type Color;

    /// Whether `style` should be filled with a single solid color (`color`)
    /// rather than calling `generate_span`.
    fn is_solid(&self, style: u32) -> bool;

    /// The solid color for `style`. Only called when `is_solid` is true.
    fn color(&self, style: u32) -> Self::Color;

    /// Fill `span[..len]` for `style` at the pixel run starting at (x, y).
    /// Only called when `is_solid` is false.
    fn generate_span(&mut self, span: &mut [Self::Color], x: i32, y: i32, len: u32, style: u32);
}

// ============================================================================
// render_scanlines_aa_solid — unpacked coverage (ScanlineU8), solid color
// ============================================================================

/// Render all scanlines from the rasterizer as a solid color.
///
/// This is the primary rendering function that ties together the full AGG
/// pipeline: rasterizer → scanline → renderer.
///
/// Port of C++ `render_scanlines_aa_solid()`.
pub fn render_scanlines_aa_solid<PF: PixelFormat>(
    ras: &mut RasterizerScanlineAa,
    sl: &mut ScanlineU8,
    ren: &mut RendererBase<PF>,
    color: &PF::ColorType,
) {
    if !ras.rewind_scanlines() {
        return;
    }

    sl.reset(ras.min_x(), ras.max_x());
    while ras.sweep_scanline(sl) {
        render_scanline_aa_solid_u8(sl, ren, color);
    }
}

/// Render a single scanline from `ScanlineU8` to the renderer.
///
/// Port of C++ `render_scanline_aa_solid()` specialized for ScanlineU8
/// where all spans have positive len (per-pixel covers).
fn render_scanline_aa_solid_u8<PF: PixelFormat>(
    sl: &ScanlineU8,
    ren: &mut RendererBase<PF>,
    color: &PF::ColorType,
) {
    let y = sl.y();
    let covers = sl.covers();

    for span in sl.begin() {
        let x = span.x;
        let len = span.len;
        if len > 0 {
            ren.blend_solid_hspan(
                x,
                y,
                len,
                color,
                &covers[span.cover_offset..span.cover_offset + len as usize],
            );
        }
    }
}

// ============================================================================
// render_scanlines_aa_solid_packed — packed/RLE coverage (ScanlineP8)
// ============================================================================

/// Render all scanlines from a packed scanline container as a solid color.
///
/// Spans with negative `len` are solid runs and are blended in one call via
/// `blend_hline`; spans with positive `len` carry per-pixel coverage and go
/// through `blend_solid_hspan`, mirroring C++ `render_scanline_aa_solid()`
/// for `scanline_p8`.
pub fn render_scanlines_aa_solid_packed<PF: PixelFormat>(
    ras: &mut RasterizerScanlineAa,
    sl: &mut ScanlineP8,
    ren: &mut RendererBase<PF>,
    color: &PF::ColorType,
) {
    if !ras.rewind_scanlines() {
        return;
    }

    sl.reset(ras.min_x(), ras.max_x());
    while ras.sweep_scanline(sl) {
        let y = sl.y();
        let covers = sl.covers();
        for span in sl.begin() {
            let x = span.x;
            if span.len > 0 {
                let len = span.len;
                ren.blend_solid_hspan(
                    x,
                    y,
                    len,
                    color,
                    &covers[span.cover_offset..span.cover_offset + len as usize],
                );
            } else {
                let len = -span.len;
                ren.blend_hline(x, y, x + len - 1, color, covers[span.cover_offset]);
            }
        }
    }
}

// ============================================================================
// render_scanlines_bin_solid — binary coverage (ScanlineBin)
// ============================================================================

/// Render all scanlines from a binary (non-anti-aliased) scanline container
/// as a solid color. Every covered pixel gets full coverage.
///
/// Port of C++ `render_scanlines_bin_solid()`.
pub fn render_scanlines_bin_solid<PF: PixelFormat>(
    ras: &mut RasterizerScanlineAa,
    sl: &mut ScanlineBin,
    ren: &mut RendererBase<PF>,
    color: &PF::ColorType,
) {
    if !ras.rewind_scanlines() {
        return;
    }

    sl.reset(ras.min_x(), ras.max_x());
    while ras.sweep_scanline(sl) {
        let y = sl.y();
        for span in sl.begin() {
            ren.blend_hline(span.x, y, span.x + span.len - 1, color, COVER_FULL);
        }
    }
}

// ============================================================================
// render_scanlines_aa — span-generated color (ScanlineU8)
// ============================================================================

/// Render all scanlines from the rasterizer, filling each span with colors
/// produced by a `SpanGenerator` rather than a single solid color.
///
/// Port of C++ `render_scanlines_aa()`.
pub fn render_scanlines_aa<PF, SG>(
    ras: &mut RasterizerScanlineAa,
    sl: &mut ScanlineU8,
    ren: &mut RendererBase<PF>,
    alloc: &mut SpanAllocator<PF::ColorType>,
    sg: &mut SG,
) where
    PF: PixelFormat,
    PF::ColorType: Default + Clone,
    SG: SpanGenerator<Color = PF::ColorType>,
{
    if !ras.rewind_scanlines() {
        return;
    }

    sl.reset(ras.min_x(), ras.max_x());
    sg.prepare();
    while ras.sweep_scanline(sl) {
        let y = sl.y();
        let covers = sl.covers();
        for span in sl.begin() {
            let len = span.len as usize;
            let colors = alloc.allocate(len);
            sg.generate(colors, span.x, y, len as u32);
            ren.blend_color_hspan(
                span.x,
                y,
                span.len,
                colors,
                &covers[span.cover_offset..span.cover_offset + len],
                COVER_FULL,
            );
        }
    }
}

// ============================================================================
// render_scanlines_compound — multi-style rendering (RasterizerCompoundAa)
// ============================================================================

/// Render all scanlines from a compound rasterizer, compositing every
/// active style into a shared row buffer before blending it once per row.
///
/// For each scanline, every style active on that row is swept in turn: a
/// solid style adds its flat color at each pixel's coverage, a generated
/// style calls `StyleHandler::generate_span` first. Contributions land in
/// `mix_buffer` via `ColorAdd::add_with_cover`, and the per-pixel coverage
/// accumulates in lockstep, saturating at full coverage rather than
/// wrapping — a pixel touched by two half-covering styles ends up fully
/// covered, not overflowed. The row is blended into the destination once
/// all styles have contributed.
///
/// Port of C++ `render_scanlines_compound()`.
pub fn render_scanlines_compound<PF, STH>(
    ras: &mut RasterizerCompoundAa,
    sl: &mut ScanlineU8,
    sl_hit: &mut ScanlineBin,
    ren: &mut RendererBase<PF>,
    alloc: &mut SpanAllocator<PF::ColorType>,
    sh: &mut STH,
) where
    PF: PixelFormat,
    PF::ColorType: ColorAdd,
    STH: StyleHandler<Color = PF::ColorType>,
{
    if !ras.rewind_scanlines() {
        return;
    }

    let min_x = ras.min_x();
    let max_x = ras.max_x();
    sl.reset(min_x, max_x);
    sl_hit.reset(min_x, max_x);

    loop {
        let num_styles = ras.sweep_styles();
        if num_styles == 0 {
            break;
        }

        let scanline_x = ras.scanline_start();
        let scanline_len = ras.scanline_length() as usize;
        if scanline_len == 0 {
            continue;
        }

        if !ras.sweep_scanline(sl_hit, -1) {
            continue;
        }
        let y = sl_hit.y();

        let mut mix_buffer: Vec<PF::ColorType> = vec![PF::ColorType::default(); scanline_len];
        let mut cover_buffer: Vec<CoverType> = vec![0; scanline_len];

        for style_idx in 0..num_styles {
            let style = ras.style(style_idx);
            if !ras.sweep_scanline(sl, style_idx as i32) {
                continue;
            }

            let covers = sl.covers();
            if sh.is_solid(style) {
                let color = sh.color(style);
                for span in sl.begin() {
                    let span_covers =
                        &covers[span.cover_offset..span.cover_offset + span.len as usize];
                    for (i, &cover) in span_covers.iter().enumerate() {
                        let x = (span.x - scanline_x) as usize + i;
                        mix_buffer[x].add_with_cover(&color, cover as u32);
                        cover_buffer[x] = cover_buffer[x].saturating_add(cover);
                    }
                }
            } else {
                for span in sl.begin() {
                    let len = span.len as usize;
                    let colors = alloc.allocate(len);
                    sh.generate_span(colors, span.x, y, len as u32, style);
                    let span_covers = &covers[span.cover_offset..span.cover_offset + len];
                    for (i, &cover) in span_covers.iter().enumerate() {
                        let x = (span.x - scanline_x) as usize + i;
                        mix_buffer[x].add_with_cover(&colors[i], cover as u32);
                        cover_buffer[x] = cover_buffer[x].saturating_add(cover);
                    }
                }
            }
        }

        ren.blend_color_hspan(
            scanline_x,
            y,
            scanline_len as i32,
            &mix_buffer,
            &cover_buffer,
            COVER_FULL,
        );
    }
}

// ============================================================================
// RendererScanlineAaSolid — stored-color renderer wrapper
// ============================================================================

/// A renderer that stores a color and renders solid AA scanlines.
///
/// Port of C++ `renderer_scanline_aa_solid`. Wraps a `RendererBase` and
/// a stored color for convenience.
pub struct RendererScanlineAaSolid<'a, PF: PixelFormat> {
    ren: &'a mut RendererBase<PF>,
    color: PF::ColorType,
}

impl<'a, PF> RendererScanlineAaSolid<'a, PF>
where
    PF: PixelFormat,
    PF::ColorType: Default,
{
    pub fn new(ren: &'a mut RendererBase<PF>) -> Self {
        Self {
            ren,
            color: PF::ColorType::default(),
        }
    }

    pub fn color(&mut self, c: PF::ColorType) {
        self.color = c;
    }

    /// Render all scanlines from the rasterizer.
    pub fn render(&mut self, ras: &mut RasterizerScanlineAa, sl: &mut ScanlineU8) {
        render_scanlines_aa_solid(ras, sl, self.ren, &self.color);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::POLY_SUBPIXEL_SCALE;
    use crate::color::Rgba8;
    use crate::ellipse::Ellipse;
    use crate::path_storage::PathStorage;
    use crate::pixfmt_rgba::PixfmtRgba32;
    use crate::rendering_buffer::RowAccessor;
    use crate::span_solid::SpanSolid;

    const BPP: usize = 4;

    fn make_rgba_buffer(w: u32, h: u32) -> (Vec<u8>, RowAccessor) {
        let stride = (w * BPP as u32) as i32;
        let buf = vec![255u8; (h * w * BPP as u32) as usize]; // white background (all 0xFF)
        let mut ra = RowAccessor::new();
        unsafe {
            ra.attach(buf.as_ptr() as *mut u8, w, h, stride);
        }
        (buf, ra)
    }

    // ========================================================================
    // Capstone test: render a solid red triangle on white background
    // ========================================================================

    #[test]
    fn test_render_triangle_solid_red() {
        let (_buf, mut ra) = make_rgba_buffer(100, 100);
        let mut pf = PixfmtRgba32::new(&mut ra);
        pf.clear(&Rgba8::new(255, 255, 255, 255));
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanlineAa::new();
        let mut sl = ScanlineU8::new();

        // Triangle (20,20) → (80,20) → (50,80)
        let s = POLY_SUBPIXEL_SCALE as i32;
        ras.move_to(20 * s, 20 * s);
        ras.line_to(80 * s, 20 * s);
        ras.line_to(50 * s, 80 * s);

        let red = Rgba8::new(255, 0, 0, 255);
        render_scanlines_aa_solid(&mut ras, &mut sl, &mut ren, &red);

        // Center of triangle should be red
        let center = ren.ren().pixel(50, 40);
        assert_eq!(center.r, 255, "Center R should be 255");
        assert_eq!(center.g, 0, "Center G should be 0");
        assert_eq!(center.b, 0, "Center B should be 0");
        assert_eq!(center.a, 255, "Center A should be 255");

        // Corner (0,0) should remain white
        let corner = ren.ren().pixel(0, 0);
        assert_eq!(corner.r, 255);
        assert_eq!(corner.g, 255);
        assert_eq!(corner.b, 255);

        // Edge pixel should have AA blending (not fully red, not fully white)
        let edge = ren.ren().pixel(20, 20);
        assert!(edge.r > 0, "Edge pixel should have some red: r={}", edge.r);
    }

    // ========================================================================
    // Rectangle test
    // ========================================================================

    #[test]
    fn test_render_rectangle() {
        let (_buf, mut ra) = make_rgba_buffer(100, 100);
        let mut pf = PixfmtRgba32::new(&mut ra);
        pf.clear(&Rgba8::new(255, 255, 255, 255));
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanlineAa::new();
        let mut sl = ScanlineU8::new();

        // Rectangle: (10,10) → (90,10) → (90,90) → (10,90)
        ras.move_to_d(10.0, 10.0);
        ras.line_to_d(90.0, 10.0);
        ras.line_to_d(90.0, 90.0);
        ras.line_to_d(10.0, 90.0);

        let blue = Rgba8::new(0, 0, 255, 255);
        render_scanlines_aa_solid(&mut ras, &mut sl, &mut ren, &blue);

        // Center should be blue
        let center = ren.ren().pixel(50, 50);
        assert_eq!(center.b, 255);
        assert_eq!(center.r, 0);

        // Outside should be white
        let outside = ren.ren().pixel(5, 5);
        assert_eq!(outside.r, 255);
        assert_eq!(outside.g, 255);
    }

    // ========================================================================
    // Ellipse test via add_path
    // ========================================================================

    #[test]
    fn test_render_ellipse() {
        let (_buf, mut ra) = make_rgba_buffer(100, 100);
        let mut pf = PixfmtRgba32::new(&mut ra);
        pf.clear(&Rgba8::new(0, 0, 0, 255)); // black background
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanlineAa::new();
        let mut sl = ScanlineU8::new();

        let mut ellipse = Ellipse::new(50.0, 50.0, 30.0, 30.0, 64, false);
        ras.add_path(&mut ellipse, 0);

        let green = Rgba8::new(0, 255, 0, 255);
        render_scanlines_aa_solid(&mut ras, &mut sl, &mut ren, &green);

        // Center should be green
        let center = ren.ren().pixel(50, 50);
        assert_eq!(center.g, 255);

        // Far corner should remain black
        let corner = ren.ren().pixel(0, 0);
        assert_eq!(corner.g, 0);
    }

    // ========================================================================
    // PathStorage test
    // ========================================================================

    #[test]
    fn test_render_path_storage_triangle() {
        let (_buf, mut ra) = make_rgba_buffer(100, 100);
        let mut pf = PixfmtRgba32::new(&mut ra);
        pf.clear(&Rgba8::new(255, 255, 255, 255));
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanlineAa::new();
        let mut sl = ScanlineU8::new();

        let mut path = PathStorage::new();
        path.move_to(10.0, 10.0);
        path.line_to(90.0, 50.0);
        path.line_to(50.0, 90.0);
        // auto_close will close the polygon

        ras.add_path(&mut path, 0);

        let magenta = Rgba8::new(255, 0, 255, 255);
        render_scanlines_aa_solid(&mut ras, &mut sl, &mut ren, &magenta);

        // Hit test: center of triangle
        let p = ren.ren().pixel(40, 50);
        assert!(p.r > 0 || p.b > 0, "Center should have color");
    }

    // ========================================================================
    // Clip box test
    // ========================================================================

    #[test]
    fn test_render_with_clip_box() {
        let (_buf, mut ra) = make_rgba_buffer(100, 100);
        let mut pf = PixfmtRgba32::new(&mut ra);
        pf.clear(&Rgba8::new(255, 255, 255, 255));
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanlineAa::new();
        let mut sl = ScanlineU8::new();

        // Set rasterizer clip box
        ras.clip_box(0.0, 0.0, 50.0, 50.0);

        // Draw a large rectangle that extends beyond clip
        ras.move_to_d(10.0, 10.0);
        ras.line_to_d(90.0, 10.0);
        ras.line_to_d(90.0, 90.0);
        ras.line_to_d(10.0, 90.0);

        let red = Rgba8::new(255, 0, 0, 255);
        render_scanlines_aa_solid(&mut ras, &mut sl, &mut ren, &red);

        // Inside clip box and shape should be red
        let inside = ren.ren().pixel(30, 30);
        assert_eq!(inside.r, 255);

        // Outside clip box should remain white
        let outside = ren.ren().pixel(70, 70);
        assert_eq!(outside.r, 255);
        assert_eq!(outside.g, 255);
    }

    // ========================================================================
    // RendererScanlineAaSolid wrapper test
    // ========================================================================

    #[test]
    fn test_renderer_scanline_aa_solid_wrapper() {
        let (_buf, mut ra) = make_rgba_buffer(100, 100);
        let mut pf = PixfmtRgba32::new(&mut ra);
        pf.clear(&Rgba8::new(0, 0, 0, 255));
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanlineAa::new();
        let mut sl = ScanlineU8::new();

        ras.move_to_d(20.0, 20.0);
        ras.line_to_d(80.0, 20.0);
        ras.line_to_d(50.0, 80.0);

        let mut renderer = RendererScanlineAaSolid::new(&mut ren);
        renderer.color(Rgba8::new(0, 255, 0, 255));
        renderer.render(&mut ras, &mut sl);

        // Center should be green
        let center = renderer.ren.ren().pixel(50, 40);
        assert_eq!(center.g, 255);
    }

    // ========================================================================
    // Empty rasterizer test
    // ========================================================================

    #[test]
    fn test_render_empty() {
        let (_buf, mut ra) = make_rgba_buffer(10, 10);
        let mut pf = PixfmtRgba32::new(&mut ra);
        pf.clear(&Rgba8::new(255, 255, 255, 255));
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanlineAa::new();
        let mut sl = ScanlineU8::new();

        // Render with no polygons — should not crash
        let red = Rgba8::new(255, 0, 0, 255);
        render_scanlines_aa_solid(&mut ras, &mut sl, &mut ren, &red);

        // Everything should remain white
        let p = ren.ren().pixel(5, 5);
        assert_eq!(p.r, 255);
        assert_eq!(p.g, 255);
    }

    // ========================================================================
    // Packed scanline (ScanlineP8) solid rendering
    // ========================================================================

    #[test]
    fn test_render_packed_solid_rectangle() {
        let (_buf, mut ra) = make_rgba_buffer(100, 100);
        let mut pf = PixfmtRgba32::new(&mut ra);
        pf.clear(&Rgba8::new(255, 255, 255, 255));
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanlineAa::new();
        let mut sl = ScanlineP8::new();

        ras.move_to_d(10.0, 10.0);
        ras.line_to_d(90.0, 10.0);
        ras.line_to_d(90.0, 90.0);
        ras.line_to_d(10.0, 90.0);

        let blue = Rgba8::new(0, 0, 255, 255);
        render_scanlines_aa_solid_packed(&mut ras, &mut sl, &mut ren, &blue);

        let center = ren.ren().pixel(50, 50);
        assert_eq!(center.b, 255);
        assert_eq!(center.r, 0);

        let outside = ren.ren().pixel(5, 5);
        assert_eq!(outside.r, 255);
    }

    // ========================================================================
    // Binary scanline (ScanlineBin) solid rendering
    // ========================================================================

    #[test]
    fn test_render_bin_solid_rectangle_has_no_antialiasing() {
        let (_buf, mut ra) = make_rgba_buffer(100, 100);
        let mut pf = PixfmtRgba32::new(&mut ra);
        pf.clear(&Rgba8::new(255, 255, 255, 255));
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanlineAa::new();
        let mut sl = ScanlineBin::new();

        ras.move_to_d(10.0, 10.0);
        ras.line_to_d(90.0, 10.0);
        ras.line_to_d(90.0, 90.0);
        ras.line_to_d(10.0, 90.0);

        let green = Rgba8::new(0, 255, 0, 255);
        render_scanlines_bin_solid(&mut ras, &mut sl, &mut ren, &green);

        let center = ren.ren().pixel(50, 50);
        assert_eq!(center.g, 255);
        assert_eq!(center.r, 0);

        // A pixel right at the hard (non-anti-aliased) edge is either fully
        // in or fully out — never a blended intermediate value.
        let edge = ren.ren().pixel(10, 50);
        assert!(edge.g == 255 || edge.g == 0);
    }

    // ========================================================================
    // Span-generated (ScanlineU8 + SpanGenerator) rendering
    // ========================================================================

    #[test]
    fn test_render_scanlines_aa_with_span_generator() {
        let (_buf, mut ra) = make_rgba_buffer(100, 100);
        let mut pf = PixfmtRgba32::new(&mut ra);
        pf.clear(&Rgba8::new(255, 255, 255, 255));
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanlineAa::new();
        let mut sl = ScanlineU8::new();
        let mut alloc = SpanAllocator::<Rgba8>::new();

        ras.move_to_d(10.0, 10.0);
        ras.line_to_d(90.0, 10.0);
        ras.line_to_d(90.0, 90.0);
        ras.line_to_d(10.0, 90.0);

        let mut gen = SpanSolid::<Rgba8>::new();
        gen.set_color(Rgba8::new(10, 20, 30, 255));

        render_scanlines_aa(&mut ras, &mut sl, &mut ren, &mut alloc, &mut gen);

        let center = ren.ren().pixel(50, 50);
        assert_eq!(center.r, 10);
        assert_eq!(center.g, 20);
        assert_eq!(center.b, 30);
    }

    // ========================================================================
    // Compound rendering: two overlapping, non-overlapping-color styles
    // ========================================================================

    struct TwoSolidStyles {
        colors: [Rgba8; 2],
    }

    impl StyleHandler for TwoSolidStyles {
        type Color = Rgba8;

        fn is_solid(&self, _style: u32) -> bool {
            true
        }

        fn color(&self, style: u32) -> Rgba8 {
            self.colors[style as usize]
        }

        fn generate_span(&mut self, _span: &mut [Rgba8], _x: i32, _y: i32, _len: u32, _style: u32) {
            unreachable!("all styles in this handler are solid")
        }
    }

    #[test]
    fn test_render_scanlines_compound_two_styles_side_by_side() {
        let (_buf, mut ra) = make_rgba_buffer(100, 100);
        let mut pf = PixfmtRgba32::new(&mut ra);
        pf.clear(&Rgba8::new(0, 0, 0, 255));
        let mut ren = RendererBase::new(pf);

        let mut ras = RasterizerCompoundAa::new();
        ras.styles(0, -1);
        ras.move_to_d(10.0, 10.0);
        ras.line_to_d(50.0, 10.0);
        ras.line_to_d(50.0, 90.0);
        ras.line_to_d(10.0, 90.0);

        ras.styles(1, -1);
        ras.move_to_d(50.0, 10.0);
        ras.line_to_d(90.0, 10.0);
        ras.line_to_d(90.0, 90.0);
        ras.line_to_d(50.0, 90.0);

        let mut sl = ScanlineU8::new();
        let mut sl_hit = ScanlineBin::new();
        let mut alloc = SpanAllocator::<Rgba8>::new();
        let mut handler = TwoSolidStyles {
            colors: [Rgba8::new(255, 0, 0, 255), Rgba8::new(0, 0, 255, 255)],
        };

        render_scanlines_compound(&mut ras, &mut sl, &mut sl_hit, &mut ren, &mut alloc, &mut handler);

        let left = ren.ren().pixel(30, 50);
        assert_eq!(left.r, 255);
        assert_eq!(left.b, 0);

        let right = ren.ren().pixel(70, 50);
        assert_eq!(right.b, 255);
        assert_eq!(right.r, 0);
    }

    #[test]
    fn test_render_scanlines_compound_empty_is_noop() {
        let (_buf, mut ra) = make_rgba_buffer(20, 20);
        let mut pf = PixfmtRgba32::new(&mut ra);
        pf.clear(&Rgba8::new(255, 255, 255, 255));
        let mut ren = RendererBase::new(pf);

        let mut ras = RasterizerCompoundAa::new();
        let mut sl = ScanlineU8::new();
        let mut sl_hit = ScanlineBin::new();
        let mut alloc = SpanAllocator::<Rgba8>::new();
        let mut handler = TwoSolidStyles {
            colors: [Rgba8::new(255, 0, 0, 255), Rgba8::new(0, 0, 255, 255)],
        };

        render_scanlines_compound(&mut ras, &mut sl, &mut sl_hit, &mut ren, &mut alloc, &mut handler);

        let p = ren.ren().pixel(10, 10);
        assert_eq!(p.r, 255);
        assert_eq!(p.g, 255);
    }
}
