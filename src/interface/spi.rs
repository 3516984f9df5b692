//!
//! Blocking SPI transport for the ST7735's 4-line serial bus.
//!
//! This module implements the [`Interface`] trait on top of an
//! [`embedded_hal::spi::SpiBus`], a device-select pin and a data/command pin.
//! Bus speed, mode and word size are configured where the `SpiBus` is
//! constructed, in the platform HAL; the driver itself touches no hardware
//! registers.
//!
//! # Example
//!
//! ```rust,ignore
//! use st7735_raster::interface::SpiInterface;
//!
//! let spi = /* your blocking SPI bus, MODE 0 */;
//! let cs = /* chip-select OutputPin, active low */;
//! let dc = /* data/command OutputPin */;
//! let mut buffer = [0u8; 512];
//! let iface = SpiInterface::new(spi, cs, dc, &mut buffer);
//! // Use iface with the display driver
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::{Interface, TransportError};

/// Blocking SPI transport with manual device-select handling.
///
/// Pixel words are serialized big-endian through a caller-provided scratch
/// buffer so repeated fills and slice bursts go out as few large transfers
/// instead of one two-byte write per pixel.
///
/// Use [`SpiInterface::new`] to construct and [`SpiInterface::release`] to
/// deconstruct and recover the bus and pins.
pub struct SpiInterface<'a, SPI, CS, DC> {
    spi: SPI,
    cs: CS,
    dc: DC,
    buffer: &'a mut [u8],
}

impl<'a, SPI, CS, DC> SpiInterface<'a, SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin<Error = CS::Error>,
{
    /// Creates a new SPI transport from a bus, its control pins and a
    /// scratch buffer.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` holds fewer than 2 bytes (one pixel word).
    pub fn new(spi: SPI, cs: CS, dc: DC, buffer: &'a mut [u8]) -> Self {
        assert!(buffer.len() >= 2, "scratch buffer must hold at least one pixel word");
        Self { spi, cs, dc, buffer }
    }

    /// Releases the bus and pins back, deconstructing the transport.
    pub fn release(self) -> (SPI, CS, DC) {
        (self.spi, self.cs, self.dc)
    }
}

impl<SPI, CS, DC> Interface for SpiInterface<'_, SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin<Error = CS::Error>,
{
    type Error = TransportError<SPI::Error, CS::Error>;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(TransportError::Pin)
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(TransportError::Pin)
    }

    /// Send a command and its arguments to the display controller.
    ///
    /// The DC pin is set low for the command byte, then high for the
    /// argument bytes.
    fn send_command(&mut self, command: u8, args: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(TransportError::Pin)?;
        self.spi.write(&[command]).map_err(TransportError::Bus)?;
        self.dc.set_high().map_err(TransportError::Pin)?;
        self.spi.write(args).map_err(TransportError::Bus)?;
        Ok(())
    }

    fn send_pixel(&mut self, word: u16) -> Result<(), Self::Error> {
        self.spi
            .write(&word.to_be_bytes())
            .map_err(TransportError::Bus)
    }

    fn send_pixels(&mut self, words: &[u16]) -> Result<(), Self::Error> {
        for chunk in words.chunks(self.buffer.len() / 2) {
            let mut n = 0;
            for word in chunk {
                let [hi, lo] = word.to_be_bytes();
                self.buffer[n] = hi;
                self.buffer[n + 1] = lo;
                n += 2;
            }
            self.spi.write(&self.buffer[..n]).map_err(TransportError::Bus)?;
        }
        Ok(())
    }

    fn send_repeated(&mut self, word: u16, count: u32) -> Result<(), Self::Error> {
        if count == 0 {
            return Ok(());
        }
        let pairs = (self.buffer.len() / 2).min(count as usize);
        let [hi, lo] = word.to_be_bytes();
        for n in 0..pairs {
            self.buffer[2 * n] = hi;
            self.buffer[2 * n + 1] = lo;
        }
        let mut remaining = count as usize;
        while remaining > 0 {
            let burst = remaining.min(pairs);
            self.spi
                .write(&self.buffer[..2 * burst])
                .map_err(TransportError::Bus)?;
            remaining -= burst;
        }
        Ok(())
    }

    /// Drain the bus before the caller releases device-select.
    ///
    /// `SpiBus::flush` is specified to complete or fail; HALs with a
    /// pollable FIFO should surface a stuck queue as an error, which maps
    /// onto [`TransportError::Bus`] here rather than wedging the caller.
    fn flush(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().map_err(TransportError::Bus)
    }
}
