//! Scan-conversion primitives.
//!
//! Every operation clips conservatively against the logical panel bounds
//! before touching the bus; a fully off-screen primitive produces zero bus
//! traffic. What remains is decomposed into as few address-window/pixel-burst
//! pairs as the shape allows: solid rectangles are one window and one burst,
//! lines re-window only when the perpendicular coordinate steps, curved
//! shapes fall back to spans or single pixels.

use embedded_hal::digital::OutputPin;

use crate::interface::Interface;
use crate::Display;

/// Clips a 1-pixel-wide span along one axis.
///
/// `a`/`len` run along the span, `b` is the fixed perpendicular coordinate.
/// Returns the clamped `(a, b, len)` or `None` when nothing remains.
fn clip_span(a: i16, len: i16, a_limit: u16, b: i16, b_limit: u16) -> Option<(u16, u16, u16)> {
    if len <= 0 || b < 0 || b >= b_limit as i16 {
        return None;
    }
    let mut start = i32::from(a);
    let mut end = start + i32::from(len);
    if start < 0 {
        start = 0;
    }
    if end > i32::from(a_limit) {
        end = i32::from(a_limit);
    }
    if start >= end {
        return None;
    }
    Some((start as u16, b as u16, (end - start) as u16))
}

/// Clamps a rectangle to the panel; returns `None` when nothing remains.
fn clip_rect(
    x: i16,
    y: i16,
    w: i16,
    h: i16,
    max_w: u16,
    max_h: u16,
) -> Option<(u16, u16, u16, u16)> {
    if w <= 0 || h <= 0 {
        return None;
    }
    let mut x0 = i32::from(x);
    let mut y0 = i32::from(y);
    let mut x1 = x0 + i32::from(w);
    let mut y1 = y0 + i32::from(h);
    if x0 < 0 {
        x0 = 0;
    }
    if y0 < 0 {
        y0 = 0;
    }
    if x1 > i32::from(max_w) {
        x1 = i32::from(max_w);
    }
    if y1 > i32::from(max_h) {
        y1 = i32::from(max_h);
    }
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
}

impl<DI, F, RST> Display<DI, F, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    /// Draws a single pixel. Out-of-bounds coordinates are a no-op.
    pub fn draw_pixel(&mut self, x: i16, y: i16, color: u16) -> Result<(), DI::Error> {
        if x < 0 || y < 0 || x >= self.state.width as i16 || y >= self.state.height as i16 {
            return Ok(());
        }
        self.with_bus(|d| d.put_pixel(x, y, color))
    }

    /// Streams one pixel word into the currently primed address window.
    ///
    /// Useful between a manual [`set_address_window`](Display::set_address_window)
    /// and the matching burst end.
    pub fn push_color(&mut self, color: u16) -> Result<(), DI::Error> {
        let color = self.state.apply_color_order(color);
        self.with_bus(|d| d.di.send_pixel(color))
    }

    /// Draws a horizontal line of `w` pixels starting at `(x, y)`.
    ///
    /// The length is clipped to the remaining panel extent; on panels with
    /// the reversed color filter the word is corrected before streaming.
    pub fn draw_hline(&mut self, x: i16, y: i16, w: i16, color: u16) -> Result<(), DI::Error> {
        let color = self.state.apply_color_order(color);
        if clip_span(x, w, self.state.width, y, self.state.height).is_none() {
            return Ok(());
        }
        self.with_bus(|d| d.hspan(x, y, w, color))
    }

    /// Draws a vertical line of `h` pixels starting at `(x, y)`.
    pub fn draw_vline(&mut self, x: i16, y: i16, h: i16, color: u16) -> Result<(), DI::Error> {
        let color = self.state.apply_color_order(color);
        if clip_span(y, h, self.state.height, x, self.state.width).is_none() {
            return Ok(());
        }
        self.with_bus(|d| d.vspan(x, y, h, color))
    }

    /// Fills a rectangle: one window, one `w * h` word burst in the
    /// controller's row-major auto-increment order.
    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: u16) -> Result<(), DI::Error> {
        match clip_rect(x, y, w, h, self.state.width, self.state.height) {
            Some((x, y, w, h)) => self.with_bus(|d| d.fill_rect_raw(x, y, w, h, color)),
            None => Ok(()),
        }
    }

    /// Fills the whole panel.
    pub fn fill_screen(&mut self, color: u16) -> Result<(), DI::Error> {
        let (w, h) = (self.state.width, self.state.height);
        self.with_bus(|d| d.fill_rect_raw(0, 0, w, h, color))
    }

    /// Draws a rectangle outline.
    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: u16) -> Result<(), DI::Error> {
        self.draw_hline(x, y, w, color)?;
        self.draw_hline(x, y + h - 1, w, color)?;
        self.draw_vline(x, y, h, color)?;
        self.draw_vline(x + w - 1, y, h, color)
    }

    /// Draws a line between two points.
    ///
    /// Exactly horizontal or vertical requests collapse into a single
    /// window and burst. Everything else is Bresenham with the independent
    /// axis swapped for steep lines; consecutive pixels on the same row
    /// (or column, when steep) are batched into one window and one burst,
    /// so the window is re-issued only when the perpendicular coordinate
    /// steps.
    pub fn draw_line(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        color: u16,
    ) -> Result<(), DI::Error> {
        if y0 == y1 {
            return self.draw_hline(x0.min(x1), y0, (x1 - x0).abs() + 1, color);
        }
        if x0 == x1 {
            return self.draw_vline(x0, y0.min(y1), (y1 - y0).abs() + 1, color);
        }

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (y0, x0, y1, x1)
        } else {
            (x0, y0, x1, y1)
        };
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let (bx0, by0, bx1, by1) = if steep {
            (y0.min(y1), x0, y0.max(y1), x1)
        } else {
            (x0, y0.min(y1), x1, y0.max(y1))
        };
        if self.offscreen(bx0.into(), by0.into(), bx1.into(), by1.into()) {
            return Ok(());
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let ystep: i16 = if y0 > y1 { -1 } else { 1 };

        self.with_bus(|d| {
            let mut err = dx / 2;
            let mut y = y0;
            let mut run_start = x0;
            for x in x0..=x1 {
                err -= dy;
                if err < 0 {
                    d.line_run(steep, run_start, x, y, color)?;
                    y += ystep;
                    err += dx;
                    run_start = x + 1;
                }
            }
            if run_start <= x1 {
                d.line_run(steep, run_start, x1, y, color)?;
            }
            Ok(())
        })
    }

    /// Draws a circle outline using the midpoint algorithm.
    pub fn draw_circle(&mut self, x0: i16, y0: i16, r: i16, color: u16) -> Result<(), DI::Error> {
        if self.circle_offscreen(x0, y0, r, 0) {
            return Ok(());
        }
        self.with_bus(|d| {
            d.put_pixel(x0, y0 + r, color)?;
            d.put_pixel(x0, y0 - r, color)?;
            d.put_pixel(x0 + r, y0, color)?;
            d.put_pixel(x0 - r, y0, color)?;
            d.circle_arcs(x0, y0, r, 0x0F, color)
        })
    }

    /// Draws up to four octant-pair arcs of a circle.
    ///
    /// `corners` is a 4-bit mask (1, 2, 4, 8) selecting the quadrant
    /// reflections to emit; the cardinal points are not part of any arc.
    /// Used for the corners of rounded rectangles.
    pub fn draw_circle_helper(
        &mut self,
        x0: i16,
        y0: i16,
        r: i16,
        corners: u8,
        color: u16,
    ) -> Result<(), DI::Error> {
        if self.circle_offscreen(x0, y0, r, 0) {
            return Ok(());
        }
        self.with_bus(|d| d.circle_arcs(x0, y0, r, corners, color))
    }

    /// Fills a circle.
    pub fn fill_circle(&mut self, x0: i16, y0: i16, r: i16, color: u16) -> Result<(), DI::Error> {
        if self.circle_offscreen(x0, y0, r, 0) {
            return Ok(());
        }
        let color = self.state.apply_color_order(color);
        self.with_bus(|d| {
            d.vspan(x0, y0 - r, 2 * r + 1, color)?;
            d.disk_spans(x0, y0, r, 0x3, 0, color)
        })
    }

    /// Fills the left and/or right half of a circle, with each vertical
    /// span stretched by `delta` pixels.
    ///
    /// `sides` bit 1 selects the right half, bit 2 the left half. Together
    /// with a center rectangle this fills rounded rectangles.
    pub fn fill_circle_helper(
        &mut self,
        x0: i16,
        y0: i16,
        r: i16,
        sides: u8,
        delta: i16,
        color: u16,
    ) -> Result<(), DI::Error> {
        if self.circle_offscreen(x0, y0, r, delta) {
            return Ok(());
        }
        let color = self.state.apply_color_order(color);
        self.with_bus(|d| d.disk_spans(x0, y0, r, sides, delta, color))
    }

    /// Draws a rounded rectangle outline.
    pub fn draw_round_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        color: u16,
    ) -> Result<(), DI::Error> {
        self.draw_hline(x + r, y, w - 2 * r, color)?;
        self.draw_hline(x + r, y + h - 1, w - 2 * r, color)?;
        self.draw_vline(x, y + r, h - 2 * r, color)?;
        self.draw_vline(x + w - 1, y + r, h - 2 * r, color)?;
        // one quadrant mask per corner
        self.draw_circle_helper(x + r, y + r, r, 1, color)?;
        self.draw_circle_helper(x + w - r - 1, y + r, r, 2, color)?;
        self.draw_circle_helper(x + w - r - 1, y + h - r - 1, r, 4, color)?;
        self.draw_circle_helper(x + r, y + h - r - 1, r, 8, color)
    }

    /// Fills a rounded rectangle.
    pub fn fill_round_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        color: u16,
    ) -> Result<(), DI::Error> {
        self.fill_rect(x + r, y, w - 2 * r, h, color)?;
        self.fill_circle_helper(x + w - r - 1, y + r, r, 1, h - 2 * r - 1, color)?;
        self.fill_circle_helper(x + r, y + r, r, 2, h - 2 * r - 1, color)
    }

    /// Draws a triangle outline.
    pub fn draw_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: u16,
    ) -> Result<(), DI::Error> {
        self.draw_line(x0, y0, x1, y1, color)?;
        self.draw_line(x1, y1, x2, y2, color)?;
        self.draw_line(x2, y2, x0, y0, color)
    }

    /// Fills a triangle, one horizontal span per scanline.
    pub fn fill_triangle(
        &mut self,
        mut x0: i16,
        mut y0: i16,
        mut x1: i16,
        mut y1: i16,
        mut x2: i16,
        mut y2: i16,
        color: u16,
    ) -> Result<(), DI::Error> {
        // sort vertices by ascending y
        if y0 > y1 {
            core::mem::swap(&mut y0, &mut y1);
            core::mem::swap(&mut x0, &mut x1);
        }
        if y1 > y2 {
            core::mem::swap(&mut y2, &mut y1);
            core::mem::swap(&mut x2, &mut x1);
        }
        if y0 > y1 {
            core::mem::swap(&mut y0, &mut y1);
            core::mem::swap(&mut x0, &mut x1);
        }

        if y0 == y2 {
            // degenerate: everything on one scanline
            let mut a = x0;
            let mut b = x0;
            if x1 < a {
                a = x1;
            } else if x1 > b {
                b = x1;
            }
            if x2 < a {
                a = x2;
            } else if x2 > b {
                b = x2;
            }
            return self.draw_hline(a, y0, b - a + 1, color);
        }

        if self.offscreen(
            x0.min(x1).min(x2).into(),
            y0.into(),
            x0.max(x1).max(x2).into(),
            y2.into(),
        ) {
            return Ok(());
        }

        let color = self.state.apply_color_order(color);
        let (dx01, dy01) = (i32::from(x1 - x0), i32::from(y1 - y0));
        let (dx02, dy02) = (i32::from(x2 - x0), i32::from(y2 - y0));
        let (dx12, dy12) = (i32::from(x2 - x1), i32::from(y2 - y1));

        self.with_bus(|d| {
            let mut sa: i32 = 0;
            let mut sb: i32 = 0;

            // Upper part: scanline crossings of edges 0-1 and 0-2. A
            // flat-bottom triangle (y1 == y2) includes scanline y1 here and
            // skips the lower loop; a flat-top one (y0 == y1) skips this
            // loop instead, so neither divisor can be zero where it is used.
            let last = if y1 == y2 { y1 } else { y1 - 1 };

            let mut y = y0;
            while y <= last {
                let a = i32::from(x0) + sa / dy01;
                let b = i32::from(x0) + sb / dy02;
                sa += dx01;
                sb += dx02;
                d.tri_span(a, b, y, color)?;
                y += 1;
            }

            // Lower part: edges 1-2 and 0-2.
            sa = dx12 * i32::from(y - y1);
            sb = dx02 * i32::from(y - y0);
            while y <= y2 {
                let a = i32::from(x1) + sa / dy12;
                let b = i32::from(x0) + sb / dy02;
                sa += dx12;
                sb += dx02;
                d.tri_span(a, b, y, color)?;
                y += 1;
            }
            Ok(())
        })
    }

    /// Transparent 1-bit blit: draws `color` for every set bit, leaves
    /// clear bits untouched.
    ///
    /// The source is MSB-first with a row stride of `ceil(w / 8)` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bitmap` is shorter than `stride * h` bytes.
    pub fn draw_bitmap(
        &mut self,
        x: i16,
        y: i16,
        bitmap: &[u8],
        w: i16,
        h: i16,
        color: u16,
    ) -> Result<(), DI::Error> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        if self.offscreen(
            x.into(),
            y.into(),
            i32::from(x) + i32::from(w) - 1,
            i32::from(y) + i32::from(h) - 1,
        ) {
            return Ok(());
        }
        let stride = (w as usize + 7) / 8;
        self.with_bus(|d| {
            for j in 0..h {
                for i in 0..w {
                    if bitmap[j as usize * stride + i as usize / 8] & (0x80 >> (i & 7)) != 0 {
                        d.put_pixel(x + i, y + j, color)?;
                    }
                }
            }
            Ok(())
        })
    }

    /// Clipped full-color blit: streams RGB565 rows through one window.
    ///
    /// `pixels` is row-major with a stride of `w` words.
    ///
    /// # Panics
    ///
    /// Panics if `pixels` is shorter than `w * h` words.
    pub fn draw_rgb_bitmap(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        pixels: &[u16],
    ) -> Result<(), DI::Error> {
        let (cx, cy, cw, ch) = match clip_rect(x, y, w, h, self.state.width, self.state.height) {
            Some(clipped) => clipped,
            None => return Ok(()),
        };
        let skip_x = (i32::from(cx) - i32::from(x)) as usize;
        let skip_y = (i32::from(cy) - i32::from(y)) as usize;
        let stride = w as usize;
        self.with_bus(|d| {
            d.set_address_window(cx, cy, cx + cw - 1, cy + ch - 1)?;
            for row in 0..ch as usize {
                let start = (skip_y + row) * stride + skip_x;
                d.di.send_pixels(&pixels[start..start + cw as usize])?;
            }
            Ok(())
        })
    }

    // ---- span helpers; the bus must already be held ----

    // Single pixel, clipped. One window, one word.
    pub(crate) fn put_pixel(&mut self, x: i16, y: i16, color: u16) -> Result<(), DI::Error> {
        if x < 0 || y < 0 || x >= self.state.width as i16 || y >= self.state.height as i16 {
            return Ok(());
        }
        self.set_address_window(x as u16, y as u16, x as u16, y as u16)?;
        self.di.send_pixel(color)
    }

    // Horizontal span, clipped. Color must already be order-corrected.
    fn hspan(&mut self, x: i16, y: i16, w: i16, color: u16) -> Result<(), DI::Error> {
        if let Some((x, y, w)) = clip_span(x, w, self.state.width, y, self.state.height) {
            self.set_address_window(x, y, x + w - 1, y)?;
            self.di.send_repeated(color, u32::from(w))?;
        }
        Ok(())
    }

    // Vertical span, clipped.
    fn vspan(&mut self, x: i16, y: i16, h: i16, color: u16) -> Result<(), DI::Error> {
        if let Some((y, x, h)) = clip_span(y, h, self.state.height, x, self.state.width) {
            self.set_address_window(x, y, x, y + h - 1)?;
            self.di.send_repeated(color, u32::from(h))?;
        }
        Ok(())
    }

    pub(crate) fn fill_rect_raw(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: u16,
    ) -> Result<(), DI::Error> {
        self.set_address_window(x, y, x + w - 1, y + h - 1)?;
        self.di.send_repeated(color, u32::from(w) * u32::from(h))
    }

    // One same-perpendicular run of a Bresenham line. `a0..=a1` runs along
    // the iteration axis, `b` is the perpendicular coordinate.
    fn line_run(&mut self, steep: bool, a0: i16, a1: i16, b: i16, color: u16) -> Result<(), DI::Error> {
        let len = a1 - a0 + 1;
        if steep {
            self.vspan(b, a0, len, color)
        } else {
            self.hspan(a0, b, len, color)
        }
    }

    // Midpoint circle, arcs only. `corners` selects the octant pairs.
    fn circle_arcs(
        &mut self,
        x0: i16,
        y0: i16,
        r: i16,
        corners: u8,
        color: u16,
    ) -> Result<(), DI::Error> {
        let mut f = 1 - r;
        let mut ddf_x: i16 = 1;
        let mut ddf_y = -2 * r;
        let mut x: i16 = 0;
        let mut y = r;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            if corners & 0x4 != 0 {
                self.put_pixel(x0 + x, y0 + y, color)?;
                self.put_pixel(x0 + y, y0 + x, color)?;
            }
            if corners & 0x2 != 0 {
                self.put_pixel(x0 + x, y0 - y, color)?;
                self.put_pixel(x0 + y, y0 - x, color)?;
            }
            if corners & 0x8 != 0 {
                self.put_pixel(x0 - y, y0 + x, color)?;
                self.put_pixel(x0 - x, y0 + y, color)?;
            }
            if corners & 0x1 != 0 {
                self.put_pixel(x0 - y, y0 - x, color)?;
                self.put_pixel(x0 - x, y0 - y, color)?;
            }
        }
        Ok(())
    }

    // Midpoint circle emitting vertical spans `2y+1+delta` / `2x+1+delta`
    // tall; the center column is drawn separately by the callers.
    fn disk_spans(
        &mut self,
        x0: i16,
        y0: i16,
        r: i16,
        sides: u8,
        delta: i16,
        color: u16,
    ) -> Result<(), DI::Error> {
        let mut f = 1 - r;
        let mut ddf_x: i16 = 1;
        let mut ddf_y = -2 * r;
        let mut x: i16 = 0;
        let mut y = r;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            if sides & 0x1 != 0 {
                self.vspan(x0 + x, y0 - y, 2 * y + 1 + delta, color)?;
                self.vspan(x0 + y, y0 - x, 2 * x + 1 + delta, color)?;
            }
            if sides & 0x2 != 0 {
                self.vspan(x0 - x, y0 - y, 2 * y + 1 + delta, color)?;
                self.vspan(x0 - y, y0 - x, 2 * x + 1 + delta, color)?;
            }
        }
        Ok(())
    }

    fn tri_span(&mut self, a: i32, b: i32, y: i16, color: u16) -> Result<(), DI::Error> {
        let (a, b) = if a > b { (b, a) } else { (a, b) };
        let a = a.clamp(i32::from(i16::MIN), i32::from(i16::MAX));
        let len = (b - a + 1).clamp(0, i32::from(i16::MAX));
        self.hspan(a as i16, y, len as i16, color)
    }

    pub(crate) fn offscreen(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        x1 < 0 || y1 < 0 || x0 >= i32::from(self.state.width) || y0 >= i32::from(self.state.height)
    }

    fn circle_offscreen(&self, x0: i16, y0: i16, r: i16, delta: i16) -> bool {
        let r = i32::from(r);
        self.offscreen(
            i32::from(x0) - r,
            i32::from(y0) - r,
            i32::from(x0) + r,
            i32::from(y0) + r + i32::from(delta),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::_mock::record::{display, paint, pixel_words, windows, Op};
    use crate::options::PanelVariant;
    use std::collections::BTreeSet;
    use std::vec::Vec;

    #[test]
    fn fill_rect_emits_one_window_and_exact_word_count() {
        let mut d = display(PanelVariant::RRedTab);
        d.fill_rect(3, 4, 5, 6, 0x1234).unwrap();
        assert_eq!(windows(&d), [(3, 4, 7, 9)]);
        assert_eq!(pixel_words(&d), 30);
    }

    #[test]
    fn fill_rect_clips_to_panel() {
        let mut d = display(PanelVariant::RRedTab);
        d.fill_rect(-2, -2, 4, 4, 0xFFFF).unwrap();
        assert_eq!(windows(&d), [(0, 0, 1, 1)]);
        assert_eq!(pixel_words(&d), 4);

        d.di.ops.clear();
        d.fill_rect(126, 158, 10, 10, 0xFFFF).unwrap();
        assert_eq!(windows(&d), [(126, 158, 127, 159)]);
        assert_eq!(pixel_words(&d), 4);
    }

    #[test]
    fn offscreen_rect_produces_no_traffic() {
        let mut d = display(PanelVariant::RRedTab);
        d.fill_rect(128, 0, 4, 4, 0xFFFF).unwrap();
        d.fill_rect(0, -10, 4, 4, 0xFFFF).unwrap();
        d.fill_rect(0, 0, 0, 4, 0xFFFF).unwrap();
        assert!(d.di.ops.is_empty());
    }

    #[test]
    fn offscreen_pixel_produces_no_traffic() {
        let mut d = display(PanelVariant::RRedTab);
        d.draw_pixel(128, 5, 0xFFFF).unwrap();
        d.draw_pixel(-1, 5, 0xFFFF).unwrap();
        d.draw_pixel(5, 160, 0xFFFF).unwrap();
        assert!(d.di.ops.is_empty());
    }

    #[test]
    fn degenerate_horizontal_line_batches_into_one_window() {
        let mut d = display(PanelVariant::RRedTab);
        d.draw_line(0, 0, 4, 0, 0xABCD).unwrap();
        assert_eq!(windows(&d), [(0, 0, 4, 0)]);
        assert_eq!(pixel_words(&d), 5);
    }

    #[test]
    fn degenerate_vertical_line_batches_into_one_window() {
        let mut d = display(PanelVariant::RRedTab);
        d.draw_line(7, 9, 7, 3, 0xABCD).unwrap();
        assert_eq!(windows(&d), [(7, 3, 7, 9)]);
        assert_eq!(pixel_words(&d), 7);
    }

    #[test]
    fn shallow_line_batches_runs_per_row() {
        let mut d = display(PanelVariant::RRedTab);
        d.draw_line(0, 0, 6, 2, 0xABCD).unwrap();
        let w = windows(&d);
        // three runs: y only steps twice across seven columns
        assert_eq!(w.len(), 3);
        assert!(w.iter().all(|&(_, y0, _, y1)| y0 == y1));
        assert_eq!(pixel_words(&d), 7);
    }

    #[test]
    fn steep_line_batches_runs_per_column() {
        let mut d = display(PanelVariant::RRedTab);
        d.draw_line(0, 0, 2, 6, 0xABCD).unwrap();
        let w = windows(&d);
        assert_eq!(w.len(), 3);
        assert!(w.iter().all(|&(x0, _, x1, _)| x0 == x1));
        assert_eq!(pixel_words(&d), 7);
    }

    #[test]
    fn line_endpoints_are_painted_regardless_of_direction() {
        for (x0, y0, x1, y1) in [(10, 10, 3, 5), (3, 5, 10, 10), (10, 3, 3, 10)] {
            let mut d = display(PanelVariant::RRedTab);
            d.draw_line(x0, y0, x1, y1, 0x00FF).unwrap();
            let map = paint(&d);
            assert!(map.contains_key(&(x0 as u16, y0 as u16)));
            assert!(map.contains_key(&(x1 as u16, y1 as u16)));
        }
    }

    #[test]
    fn circle_is_helper_arcs_plus_cardinal_points() {
        let mut d = display(PanelVariant::RRedTab);
        d.draw_circle(30, 40, 10, 0x0F0F).unwrap();
        let circle: BTreeSet<_> = paint(&d).into_keys().collect();

        let mut d = display(PanelVariant::RRedTab);
        d.draw_circle_helper(30, 40, 10, 0x0F, 0x0F0F).unwrap();
        d.draw_pixel(30, 50, 0x0F0F).unwrap();
        d.draw_pixel(30, 30, 0x0F0F).unwrap();
        d.draw_pixel(40, 40, 0x0F0F).unwrap();
        d.draw_pixel(20, 40, 0x0F0F).unwrap();
        let composed: BTreeSet<_> = paint(&d).into_keys().collect();

        assert_eq!(circle, composed);
    }

    #[test]
    fn fill_circle_covers_outline() {
        let mut d = display(PanelVariant::RRedTab);
        d.draw_circle(30, 40, 8, 1).unwrap();
        let outline: BTreeSet<_> = paint(&d).into_keys().collect();

        let mut d = display(PanelVariant::RRedTab);
        d.fill_circle(30, 40, 8, 1).unwrap();
        let filled: BTreeSet<_> = paint(&d).into_keys().collect();

        assert!(outline.is_subset(&filled));
        assert!(filled.contains(&(30, 40)));
    }

    #[test]
    fn flat_top_triangle_fills_six_symmetric_scanlines() {
        let mut d = display(PanelVariant::RRedTab);
        d.fill_triangle(0, 0, 10, 0, 5, 5, 0x5555).unwrap();
        let map = paint(&d);

        let mut widths = Vec::new();
        for y in 0..=5u16 {
            let xs: Vec<u16> = map
                .keys()
                .filter(|&&(_, py)| py == y)
                .map(|&(px, _)| px)
                .collect();
            assert!(!xs.is_empty(), "scanline {y} empty");
            let (min, max) = (*xs.first().unwrap(), *xs.last().unwrap());
            // contiguous run, symmetric around x = 5
            assert_eq!(xs.len() as u16, max - min + 1);
            assert_eq!(min + max, 10);
            widths.push(xs.len());
        }
        assert_eq!(map.keys().filter(|&&(_, py)| py > 5).count(), 0);
        // apex at the bottom: monotonically narrowing spans
        assert!(widths.windows(2).all(|p| p[0] >= p[1]));
        assert_eq!(widths[0], 11);
        assert_eq!(widths[5], 1);
    }

    #[test]
    fn degenerate_triangle_is_one_span() {
        let mut d = display(PanelVariant::RRedTab);
        d.fill_triangle(4, 7, 9, 7, 6, 7, 0x5555).unwrap();
        assert_eq!(windows(&d), [(4, 7, 9, 7)]);
        assert_eq!(pixel_words(&d), 6);
    }

    #[test]
    fn black_tab_swaps_line_colors_but_not_rect_fills() {
        let mut d = display(PanelVariant::RBlackTab);
        d.draw_hline(0, 0, 3, crate::color::RED).unwrap();
        let swapped = pixel_stream(&d);
        assert!(swapped.iter().all(|&w| w == crate::color::BLUE));

        d.di.ops.clear();
        d.fill_rect(0, 1, 3, 1, crate::color::RED).unwrap();
        let raw = pixel_stream(&d);
        assert!(raw.iter().all(|&w| w == crate::color::RED));

        fn pixel_stream(
            d: &crate::Display<
                crate::_mock::record::RecordingInterface,
                crate::_mock::record::TestFont,
                crate::NoResetPin,
            >,
        ) -> Vec<u16> {
            let mut words = Vec::new();
            for op in &d.di.ops {
                match op {
                    Op::Pixel(w) => words.push(*w),
                    Op::Repeat(w, n) => words.extend(std::iter::repeat(*w).take(*n as usize)),
                    Op::Pixels(v) => words.extend_from_slice(v),
                    _ => {}
                }
            }
            words
        }
    }

    #[test]
    fn push_color_streams_one_word_without_window() {
        let mut d = display(PanelVariant::RRedTab);
        d.push_color(0x8001).unwrap();
        assert!(windows(&d).is_empty());
        assert_eq!(pixel_words(&d), 1);
    }

    #[test]
    fn bitmap_blit_is_transparent_and_msb_first() {
        let mut d = display(PanelVariant::RRedTab);
        // one 10-pixel row across two bytes: leftmost and rightmost-but-one set
        let bitmap = [0b1000_0000, 0b0100_0000];
        d.draw_bitmap(0, 0, &bitmap, 10, 1, 0x7BEF).unwrap();
        let set: BTreeSet<_> = paint(&d).into_keys().collect();
        let expected: BTreeSet<(u16, u16)> = [(0, 0), (9, 0)].into_iter().collect();
        assert_eq!(set, expected);

        // clear bits emit nothing: two set bits, two put-pixel windows
        assert_eq!(windows(&d).len(), 2);
    }

    #[test]
    fn rgb_bitmap_streams_clipped_rows() {
        let mut d = display(PanelVariant::RRedTab);
        let pixels: Vec<u16> = (0..12).collect();
        // 4x3 image placed so the left column and top row are clipped off
        d.draw_rgb_bitmap(-1, -1, 4, 3, &pixels).unwrap();
        assert_eq!(windows(&d), [(0, 0, 2, 1)]);
        let map = paint(&d);
        assert_eq!(map.get(&(0, 0)), Some(&5));
        assert_eq!(map.get(&(2, 1)), Some(&11));
    }

    #[test]
    fn round_rect_fill_covers_interior() {
        let mut d = display(PanelVariant::RRedTab);
        d.fill_round_rect(10, 10, 20, 16, 4, 0x2222).unwrap();
        let map = paint(&d);
        // center rectangle and both rounded flanks are present
        assert!(map.contains_key(&(20, 10)));
        assert!(map.contains_key(&(10, 18)));
        assert!(map.contains_key(&(29, 18)));
        // the square corner pixel stays untouched
        assert!(!map.contains_key(&(10, 10)));
    }
}
