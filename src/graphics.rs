//! `embedded-graphics` integration.
//!
//! The driver is a [`DrawTarget`] for RGB565, so ecosystem primitives and
//! text render through the same address-window protocol as the native
//! rasterizer. Solid and contiguous fills are forwarded to the windowed
//! burst paths; arbitrary pixel iterators fall back to per-pixel windows.

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{Dimensions, OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_graphics_core::primitives::Rectangle;
use embedded_graphics_core::Pixel;
use embedded_hal::digital::OutputPin;

use crate::interface::Interface;
use crate::Display;

impl<DI, F, RST> OriginDimensions for Display<DI, F, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    fn size(&self) -> Size {
        Size::new(u32::from(self.state.width), u32::from(self.state.height))
    }
}

impl<DI, F, RST> DrawTarget for Display<DI, F, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    type Color = Rgb565;
    type Error = DI::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && point.y >= 0
                && point.x < i32::from(self.state.width)
                && point.y < i32::from(self.state.height)
            {
                self.draw_pixel(
                    point.x as i16,
                    point.y as i16,
                    RawU16::from(color).into_inner(),
                )?;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }
        self.fill_rect(
            area.top_left.x as i16,
            area.top_left.y as i16,
            area.size.width as i16,
            area.size.height as i16,
            RawU16::from(color).into_inner(),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(RawU16::from(color).into_inner())
    }

    #[cfg(feature = "batch")]
    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let (w, h) = (area.size.width, area.size.height);
        if w == 0 || h == 0 {
            return Ok(());
        }
        let (x, y) = (area.top_left.x, area.top_left.y);

        let fully_visible = x >= 0
            && y >= 0
            && i64::from(x) + i64::from(w) <= i64::from(self.state.width)
            && i64::from(y) + i64::from(h) <= i64::from(self.state.height);
        if !fully_visible {
            // clipped case: pair coordinates with colors pixel by pixel
            let mut colors = colors.into_iter();
            for py in y..y + h as i32 {
                for px in x..x + w as i32 {
                    let color = match colors.next() {
                        Some(color) => color,
                        None => return Ok(()),
                    };
                    if px >= 0
                        && py >= 0
                        && px < i32::from(self.state.width)
                        && py < i32::from(self.state.height)
                    {
                        self.draw_pixel(px as i16, py as i16, RawU16::from(color).into_inner())?;
                    }
                }
            }
            return Ok(());
        }

        // fully visible: one window, the color stream batched into bursts
        let count = (w * h) as usize;
        let (x0, y0) = (x as u16, y as u16);
        let (x1, y1) = (x0 + w as u16 - 1, y0 + h as u16 - 1);
        self.with_bus(move |d| {
            d.set_address_window(x0, y0, x1, y1)?;
            let mut chunk: heapless::Vec<u16, 64> = heapless::Vec::new();
            for color in colors.into_iter().take(count) {
                let word = RawU16::from(color).into_inner();
                if chunk.push(word).is_err() {
                    d.di.send_pixels(&chunk)?;
                    chunk.clear();
                    let _ = chunk.push(word);
                }
            }
            if !chunk.is_empty() {
                d.di.send_pixels(&chunk)?;
            }
            Ok(())
        })
    }
}
