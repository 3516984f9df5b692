//! Glyph rendering and the text stream.
//!
//! A character cell is 6x8 pixels: five glyph columns from the [`Font`]
//! plus a blank spacer column. Two mutually exclusive render paths exist:
//!
//! - the **fast path** (unscaled, opaque) temporarily toggles the
//!   controller's row/column-exchange bit and streams the whole transposed
//!   cell as a single 48-word burst, halving the window traffic;
//! - the **general path** (scaled or transparent) draws per glyph bit,
//!   a pixel or a `scale`-square block at a time.
//!
//! Both paths produce the same pixels wherever both apply.

use embedded_hal::digital::OutputPin;

use crate::dcs;
use crate::font::Font;
use crate::interface::Interface;
use crate::Display;

impl<DI, F, RST> Display<DI, F, RST>
where
    DI: Interface,
    F: Font,
    RST: OutputPin,
{
    /// Draws one character cell at `(x, y)`.
    ///
    /// With `bg == color` the background is left untouched (transparent
    /// text); otherwise clear bits are painted in `bg`. A `scale` of n
    /// draws every glyph bit as an n by n block.
    pub fn draw_char(
        &mut self,
        x: i16,
        y: i16,
        c: u8,
        color: u16,
        bg: u16,
        scale: u8,
    ) -> Result<(), DI::Error> {
        let opaque_unscaled = scale == 1 && bg != color;
        // the single-burst path streams a fixed 48-word cell, so it only
        // applies when the whole cell is on screen; clipped cells take the
        // per-pixel path instead
        let cell_fits = x >= 0
            && y >= 0
            && (x as i32 + 6) <= i32::from(self.state.width)
            && (y as i32 + 8) <= i32::from(self.state.height);

        if opaque_unscaled && cell_fits {
            self.di.select()?;
            match self.stream_glyph_cell(x as u16, y as u16, c, color, bg) {
                Ok(()) => {
                    let drained = self.di.flush();
                    let released = self.di.deselect();
                    drained?;
                    released
                }
                Err(e) => {
                    let _ = self.di.deselect();
                    Err(e)
                }
            }
        } else {
            self.draw_char_general(x, y, c, color, bg, scale)
        }
    }

    // Fast opaque path: rotate the auto-increment direction, stream the
    // transposed 6x8 cell as one burst, restore the direction. The cached
    // MADCTL is restored on every exit, including transport errors.
    fn stream_glyph_cell(
        &mut self,
        x: u16,
        y: u16,
        c: u8,
        color: u16,
        bg: u16,
    ) -> Result<(), DI::Error> {
        let restore = self.state.madctl;
        self.di
            .send_command(dcs::MADCTL, &[restore ^ dcs::MADCTL_MV])?;

        let streamed: Result<(), DI::Error> = (|| {
            // with MV toggled the window axes carry (row, column)
            self.set_address_window(y, x, y + 7, x + 5)?;

            let columns = self.font.glyph_columns(c);
            let lut = [bg, color];
            let mut cell = [0u16; 48];
            let mut n = 0;
            for column in columns {
                let mut bits = column;
                for _ in 0..8 {
                    cell[n] = lut[usize::from(bits & 1)];
                    bits >>= 1;
                    n += 1;
                }
            }
            // blank spacer column
            for slot in cell[n..].iter_mut() {
                *slot = bg;
            }
            self.di.send_pixels(&cell)
        })();

        let restored = self.di.send_command(dcs::MADCTL, &[restore]);
        streamed.and(restored)
    }

    // General path: per-bit pixels or scale-square blocks, clipped by the
    // rasterizer helpers. The sixth column is synthesized blank.
    fn draw_char_general(
        &mut self,
        x: i16,
        y: i16,
        c: u8,
        color: u16,
        bg: u16,
        scale: u8,
    ) -> Result<(), DI::Error> {
        let scale = i16::from(scale.max(1));
        if x >= self.state.width as i16
            || y >= self.state.height as i16
            || x + 5 * scale - 1 < 0
            || y + 8 * scale - 1 < 0
        {
            return Ok(());
        }

        let columns = self.font.glyph_columns(c);
        self.with_bus(|d| {
            for i in 0..6i16 {
                let mut bits = if i == 5 { 0 } else { columns[i as usize] };
                for j in 0..8i16 {
                    if bits & 1 != 0 {
                        if scale == 1 {
                            d.put_pixel(x + i, y + j, color)?;
                        } else {
                            d.put_block(x + i * scale, y + j * scale, scale, color)?;
                        }
                    } else if bg != color {
                        if scale == 1 {
                            d.put_pixel(x + i, y + j, bg)?;
                        } else {
                            d.put_block(x + i * scale, y + j * scale, scale, bg)?;
                        }
                    }
                    bits >>= 1;
                }
            }
            Ok(())
        })
    }

    // One scale x scale block, clipped. The bus must already be held.
    fn put_block(&mut self, x: i16, y: i16, scale: i16, color: u16) -> Result<(), DI::Error> {
        let mut x0 = i32::from(x);
        let mut y0 = i32::from(y);
        let x1 = (x0 + i32::from(scale)).min(i32::from(self.state.width));
        let y1 = (y0 + i32::from(scale)).min(i32::from(self.state.height));
        x0 = x0.max(0);
        y0 = y0.max(0);
        if x0 >= x1 || y0 >= y1 {
            return Ok(());
        }
        self.fill_rect_raw(
            x0 as u16,
            y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
            color,
        )
    }

    /// Writes one byte to the text stream at the cursor.
    ///
    /// A printable byte draws a glyph cell and advances the cursor by
    /// `6 * scale` columns. `\n` moves down `8 * scale` rows and returns
    /// the cursor to column 0; `\r` is ignored. With wrapping enabled a
    /// glyph that would cross the right margin wraps to the next row
    /// before it is drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// # let mut display = st7735_raster::_mock::new_mock_display();
    /// display.put_char(b'A').unwrap();
    /// ```
    pub fn put_char(&mut self, c: u8) -> Result<(), DI::Error> {
        match c {
            b'\n' => {
                self.state.cursor_y += 8 * i16::from(self.state.text_scale);
                self.state.cursor_x = 0;
            }
            b'\r' => {}
            _ => {
                let scale = i16::from(self.state.text_scale);
                if self.state.wrap && self.state.cursor_x + 6 * scale > self.state.width as i16 {
                    self.state.cursor_y += 8 * scale;
                    self.state.cursor_x = 0;
                }
                let (x, y) = (self.state.cursor_x, self.state.cursor_y);
                let (color, bg, size) = (
                    self.state.text_color,
                    self.state.text_bg,
                    self.state.text_scale,
                );
                self.draw_char(x, y, c, color, bg, size)?;
                self.state.cursor_x += 6 * scale;
            }
        }
        Ok(())
    }

    /// Writes a string to the text stream, byte by byte.
    pub fn put_str(&mut self, s: &str) -> Result<(), DI::Error> {
        for &byte in s.as_bytes() {
            self.put_char(byte)?;
        }
        Ok(())
    }

    /// Moves the text cursor.
    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.state.cursor_x = x;
        self.state.cursor_y = y;
    }

    /// Returns the text cursor position.
    pub fn cursor(&self) -> (i16, i16) {
        (self.state.cursor_x, self.state.cursor_y)
    }

    /// Sets the text color with a transparent background.
    ///
    /// Transparency is encoded by storing the background equal to the
    /// foreground. On reversed-color-filter panels the correction is
    /// applied here, once, at store time.
    pub fn set_text_color(&mut self, color: u16) {
        let color = self.state.apply_color_order(color);
        self.state.text_color = color;
        self.state.text_bg = color;
    }

    /// Sets the text foreground and background colors.
    pub fn set_text_colors(&mut self, color: u16, bg: u16) {
        self.state.text_color = self.state.apply_color_order(color);
        self.state.text_bg = self.state.apply_color_order(bg);
    }

    /// Sets the glyph scale factor; zero is treated as one.
    pub fn set_text_scale(&mut self, scale: u8) {
        self.state.text_scale = scale.max(1);
    }

    /// Enables or disables wrapping at the right margin.
    pub fn set_text_wrap(&mut self, wrap: bool) {
        self.state.wrap = wrap;
    }
}

impl<DI, F, RST> core::fmt::Write for Display<DI, F, RST>
where
    DI: Interface,
    F: Font,
    RST: OutputPin,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.put_str(s).map_err(|_| core::fmt::Error)
    }
}
