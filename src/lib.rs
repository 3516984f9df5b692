#![no_std]
// associated re-typing not supported in rust yet
#![allow(clippy::type_complexity)]

//! Blocking driver for ST7735 TFT display controllers with a built-in
//! scan-conversion rasterizer.
//!
//! Everything the driver draws is expressed as address-window/pixel-burst
//! traffic: a rectangular target region is programmed into the controller,
//! a memory write is started and pixel words stream out, auto-incrementing
//! across the window in row-major order. Geometry (lines, circles,
//! triangles, rounded rectangles, glyphs) is scan-converted on the host and
//! decomposed into as few window/burst pairs as possible.
//!
//! The physical bus is abstracted behind [`interface::Interface`]; a
//! blocking SPI implementation is provided. Construction goes through
//! [`Builder`]:
//!
//! ```rust,ignore
//! use st7735_raster::{Builder, options::PanelVariant};
//!
//! let mut buffer = [0u8; 512];
//! let iface = st7735_raster::interface::SpiInterface::new(spi, cs, dc, &mut buffer);
//! let mut display = Builder::new(PanelVariant::RBlackTab, iface)
//!     .font(font)
//!     .reset_pin(rst)
//!     .init(&mut delay)?;
//!
//! display.fill_screen(st7735_raster::color::BLACK)?;
//! display.draw_line(0, 0, 127, 159, st7735_raster::color::WHITE)?;
//! ```

#[cfg(test)]
extern crate std;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

pub mod interface;
use interface::Interface;

pub mod color;
pub mod dcs;
pub mod font;
pub mod init;
pub mod options;

use init::InitStep;
use options::{DisplayState, PanelVariant, Rotation};

mod builder;
pub use builder::*;

mod graphics;
mod raster;
mod text;

#[doc(hidden)]
pub mod _mock;

#[cfg(doc)]
pub mod _troubleshooting;

/// Native panel width in pixels, before rotation.
pub const TFT_WIDTH: u16 = 128;
/// Native panel height in pixels, before rotation.
pub const TFT_HEIGHT: u16 = 160;

///
/// Display driver for ST7735 panels.
///
/// Generic over the bus transport `DI`, the glyph source `F` and the reset
/// pin `RST`. The driver assumes single-writer, single-thread use: every
/// public operation is its own select → window → burst → drain → deselect
/// critical section, and concurrent callers must be serialized externally.
///
pub struct Display<DI, F, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    // transport
    di: DI,
    // reset pin
    rst: Option<RST>,
    // glyph source
    font: F,
    // rotation, offsets, cached MADCTL, cursor and text attributes
    state: DisplayState,
    // set while the controller is in sleep mode
    sleeping: bool,
}

impl<DI, F, RST> Display<DI, F, RST>
where
    DI: Interface,
    RST: OutputPin,
{
    ///
    /// Returns the panel variant the driver was built for.
    ///
    pub fn variant(&self) -> PanelVariant {
        self.state.variant
    }

    ///
    /// Returns the current [Rotation].
    ///
    pub fn rotation(&self) -> Rotation {
        self.state.rotation
    }

    /// Logical width in pixels; swaps with height under odd rotations.
    pub fn width(&self) -> u16 {
        self.state.width
    }

    /// Logical height in pixels; swaps with width under odd rotations.
    pub fn height(&self) -> u16 {
        self.state.height
    }

    ///
    /// Sets the display [Rotation] and re-issues the memory-access-control
    /// command immediately.
    ///
    /// All subsequent window placements use the new orientation; content
    /// already on the panel is not redrawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use st7735_raster::options::Rotation;
    ///
    /// # let mut display = st7735_raster::_mock::new_mock_display();
    /// display.set_rotation(Rotation::Deg180).unwrap();
    /// ```
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DI::Error> {
        let mut madctl = dcs::MADCTL_RGB;
        let (width, height) = match rotation {
            Rotation::Deg0 => {
                madctl |= dcs::MADCTL_MX | dcs::MADCTL_MY;
                (TFT_WIDTH, TFT_HEIGHT)
            }
            Rotation::Deg90 => {
                madctl |= dcs::MADCTL_MY | dcs::MADCTL_MV;
                (TFT_HEIGHT, TFT_WIDTH)
            }
            Rotation::Deg180 => (TFT_WIDTH, TFT_HEIGHT),
            Rotation::Deg270 => {
                madctl |= dcs::MADCTL_MX | dcs::MADCTL_MV;
                (TFT_HEIGHT, TFT_WIDTH)
            }
        };
        // refresh order follows the mirror bits
        if madctl & dcs::MADCTL_MX != 0 {
            madctl |= dcs::MADCTL_MH;
        }
        if madctl & dcs::MADCTL_MY != 0 {
            madctl |= dcs::MADCTL_ML;
        }

        self.with_bus(|d| d.di.send_command(dcs::MADCTL, &[madctl]))?;

        self.state.rotation = rotation;
        self.state.madctl = madctl;
        self.state.width = width;
        self.state.height = height;
        Ok(())
    }

    ///
    /// Inverts every pixel on the panel (INVON/INVOFF). Pure controller
    /// state; no driver state is touched.
    ///
    pub fn invert_display(&mut self, invert: bool) -> Result<(), DI::Error> {
        let opcode = if invert { dcs::INVON } else { dcs::INVOFF };
        self.with_bus(|d| d.di.send_command(opcode, &[]))
    }

    ///
    /// Returns `true` if the display is currently set to sleep.
    ///
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    ///
    /// Puts the display to sleep, reducing power consumption.
    /// Call [Self::wake] before issuing further drawing commands.
    ///
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DI::Error> {
        self.with_bus(|d| d.di.send_command(dcs::SLPIN, &[]))?;
        // controller needs settle time before the next command
        delay.delay_ms(120);
        self.sleeping = true;
        Ok(())
    }

    ///
    /// Wakes the display after [Self::sleep].
    ///
    pub fn wake<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DI::Error> {
        self.with_bus(|d| d.di.send_command(dcs::SLPOUT, &[]))?;
        delay.delay_ms(120);
        self.sleeping = false;
        Ok(())
    }

    /// Replays a controller init sequence.
    ///
    /// Each step acquires the bus, sends the opcode and its argument bytes,
    /// drains, honors the step's settle time and releases the bus. A table
    /// delay of 255 means 500 ms. Nothing is read back; a sequence cannot
    /// fail to apply.
    pub fn run_command_list<D: DelayNs>(
        &mut self,
        sequence: &[InitStep],
        delay: &mut D,
    ) -> Result<(), DI::Error> {
        for step in sequence {
            self.di.select()?;
            let sent = self
                .di
                .send_command(step.opcode, step.args)
                .and_then(|_| self.di.flush());
            if sent.is_err() {
                let _ = self.di.deselect();
                return sent;
            }
            if let Some(ms) = step.delay_ms {
                // 255 is table shorthand for a 500 ms settle
                let ms = if ms == 255 { 500 } else { ms };
                delay.delay_ms(u32::from(ms));
            }
            self.di.deselect()?;
        }
        Ok(())
    }

    /// Programs the address window and starts a memory write.
    ///
    /// Sends CASET/RASET with the panel offsets applied, then RAMWR. The
    /// bus must already be selected; afterwards the controller accepts an
    /// unbounded run of pixel words that auto-fill the window row-major.
    /// Sending fewer words than the window covers leaves the controller
    /// mid-row, which is only safe because every drawing entry point
    /// re-issues a window.
    pub fn set_address_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), DI::Error> {
        let (co, ro) = (self.state.col_offset, self.state.row_offset);
        let [sxh, sxl] = (x0 + co).to_be_bytes();
        let [exh, exl] = (x1 + co).to_be_bytes();
        let [syh, syl] = (y0 + ro).to_be_bytes();
        let [eyh, eyl] = (y1 + ro).to_be_bytes();
        self.di.send_command(dcs::CASET, &[sxh, sxl, exh, exl])?;
        self.di.send_command(dcs::RASET, &[syh, syl, eyh, eyl])?;
        self.di.send_command(dcs::RAMWR, &[])
    }

    ///
    /// Release resources allocated to this driver back.
    /// This returns the transport, reset pin and glyph source,
    /// deconstructing the driver.
    ///
    pub fn release(self) -> (DI, Option<RST>, F) {
        (self.di, self.rst, self.font)
    }

    /// Returns the raw transport for sending commands directly.
    ///
    /// # Safety
    ///
    /// Sending raw commands to the controller can lead to undefined
    /// behaviour, because the rest of the code isn't aware of any state
    /// changes that were caused by sending raw commands. The user must
    /// ensure that the state of the controller isn't altered in a way that
    /// interferes with the normal operation of this crate.
    pub unsafe fn interface(&mut self) -> &mut DI {
        &mut self.di
    }

    // One bus critical section: select, run `op`, drain, deselect. The
    // drain must complete before deselect or the controller may latch a
    // command/data boundary in the wrong place. On an op error the release
    // is still attempted (best effort; the protocol has no recovery).
    pub(crate) fn with_bus<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, DI::Error>,
    ) -> Result<T, DI::Error> {
        self.di.select()?;
        match op(self) {
            Ok(value) => {
                let drained = self.di.flush();
                let released = self.di.deselect();
                drained?;
                released?;
                Ok(value)
            }
            Err(e) => {
                let _ = self.di.deselect();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::_mock::record::{commands, display, windows, Op, RecordingDelay};
    use std::vec::Vec;

    #[test]
    fn command_list_replays_in_order_with_sentinel_delay() {
        let mut d = display(PanelVariant::RRedTab);
        let mut delay = RecordingDelay::default();
        let list: &[InitStep] = &[
            InitStep { opcode: dcs::SWRESET, args: &[], delay_ms: Some(150) },
            InitStep { opcode: dcs::SLPOUT, args: &[], delay_ms: Some(255) },
            InitStep { opcode: dcs::COLMOD, args: &[0x05], delay_ms: None },
        ];
        d.run_command_list(list, &mut delay).unwrap();

        let cmds = commands(&d);
        assert_eq!(
            cmds,
            [
                (dcs::SWRESET, Vec::new()),
                (dcs::SLPOUT, Vec::new()),
                (dcs::COLMOD, std::vec![0x05]),
            ]
        );
        // 255 expands to the 500 ms settle
        assert_eq!(delay.ms, [150, 500]);
        // each step is its own select/flush/deselect cycle
        let selects = d.di.ops.iter().filter(|op| **op == Op::Select).count();
        let flushes = d.di.ops.iter().filter(|op| **op == Op::Flush).count();
        let deselects = d.di.ops.iter().filter(|op| **op == Op::Deselect).count();
        assert_eq!((selects, flushes, deselects), (3, 3, 3));
    }

    #[test]
    fn rotation_round_trip_restores_dimensions() {
        let mut d = display(PanelVariant::RRedTab);
        assert_eq!((d.width(), d.height()), (128, 160));

        d.set_rotation(Rotation::Deg0).unwrap();
        d.set_rotation(Rotation::Deg180).unwrap();
        assert_eq!((d.width(), d.height()), (128, 160));

        d.set_rotation(Rotation::Deg90).unwrap();
        assert_eq!((d.width(), d.height()), (160, 128));
        let madctl_90 = d.state.madctl;

        d.set_rotation(Rotation::Deg270).unwrap();
        assert_eq!((d.width(), d.height()), (160, 128));
        assert_ne!(d.state.madctl, madctl_90);
    }

    #[test]
    fn rotation_access_control_bits() {
        let mut d = display(PanelVariant::RRedTab);
        let mut sent = Vec::new();
        for r in [Rotation::Deg0, Rotation::Deg90, Rotation::Deg180, Rotation::Deg270] {
            d.di.ops.clear();
            d.set_rotation(r).unwrap();
            let cmds = commands(&d);
            assert_eq!(cmds.len(), 1);
            assert_eq!(cmds[0].0, dcs::MADCTL);
            sent.push(cmds[0].1[0]);
        }
        assert_eq!(sent, [0xDC, 0xB8, 0x08, 0x6C]);
    }

    #[test]
    fn invert_sends_single_command() {
        let mut d = display(PanelVariant::B);
        d.invert_display(true).unwrap();
        d.invert_display(false).unwrap();
        let cmds = commands(&d);
        assert_eq!(cmds[0], (dcs::INVON, Vec::new()));
        assert_eq!(cmds[1], (dcs::INVOFF, Vec::new()));
    }

    #[test]
    fn sleep_and_wake_track_state() {
        let mut d = display(PanelVariant::RRedTab);
        let mut delay = RecordingDelay::default();
        assert!(!d.is_sleeping());
        d.sleep(&mut delay).unwrap();
        assert!(d.is_sleeping());
        d.wake(&mut delay).unwrap();
        assert!(!d.is_sleeping());
        let cmds = commands(&d);
        assert_eq!(cmds[0].0, dcs::SLPIN);
        assert_eq!(cmds[1].0, dcs::SLPOUT);
        assert_eq!(delay.ms, [120, 120]);
    }

    #[test]
    fn window_applies_panel_offsets() {
        let mut d = display(PanelVariant::RGreenTab);
        d.fill_rect(0, 0, 1, 1, 0xFFFF).unwrap();
        let w = windows(&d);
        assert_eq!(w, [(2, 1, 2, 1)]);
    }

    #[test]
    fn drain_happens_before_deselect() {
        let mut d = display(PanelVariant::RRedTab);
        d.fill_rect(0, 0, 2, 2, 0x0000).unwrap();
        let ops = &d.di.ops;
        let flush = ops.iter().position(|op| *op == Op::Flush).unwrap();
        let deselect = ops.iter().position(|op| *op == Op::Deselect).unwrap();
        assert!(flush < deselect);
    }

    #[test]
    fn drain_fault_surfaces_and_releases_bus() {
        let mut d = display(PanelVariant::RRedTab);
        d.di.fail_flush = true;
        let err = d.fill_rect(0, 0, 2, 2, 0x0000).unwrap_err();
        assert_eq!(err, crate::interface::TransportError::Fault);
        assert_eq!(d.di.ops.last(), Some(&Op::Deselect));
    }
}
