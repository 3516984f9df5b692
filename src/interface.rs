//! Transport trait and implementations

mod spi;
pub use spi::*;

/// Command and pixel transport.
///
/// The controller is fire-and-forget: nothing is ever read back. The one
/// ordering guarantee callers rely on is that [`flush`](Interface::flush)
/// returns only once every previously queued word has left the bus, so a
/// command/data boundary is never observed in the wrong place when the
/// device-select line is released.
pub trait Interface {
    /// Error type
    type Error: core::fmt::Debug;

    /// Assert the device-select line.
    fn select(&mut self) -> Result<(), Self::Error>;

    /// Release the device-select line.
    ///
    /// Must only be called after [`flush`](Interface::flush) confirmed the
    /// transmit queue is empty.
    fn deselect(&mut self) -> Result<(), Self::Error>;

    /// Send a command with optional parameters.
    ///
    /// The opcode goes out as a command word, each argument byte as a data
    /// word.
    fn send_command(&mut self, command: u8, args: &[u8]) -> Result<(), Self::Error>;

    /// Send a single 16-bit pixel word.
    ///
    /// `RAMWR` (or equivalent) must have primed an address window first.
    fn send_pixel(&mut self, word: u16) -> Result<(), Self::Error>;

    /// Send a slice of pixel words.
    fn send_pixels(&mut self, words: &[u16]) -> Result<(), Self::Error> {
        for &word in words {
            self.send_pixel(word)?;
        }
        Ok(())
    }

    /// Send the same pixel word `count` times.
    fn send_repeated(&mut self, word: u16, count: u32) -> Result<(), Self::Error> {
        for _ in 0..count {
            self.send_pixel(word)?;
        }
        Ok(())
    }

    /// Wait for the transmit queue to drain and clear the completion flags.
    ///
    /// Implementations must bound this wait: a transport that cannot confirm
    /// drain reports [`TransportError::Fault`] (or its own equivalent) rather
    /// than blocking the caller forever.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

impl<T: Interface + ?Sized> Interface for &mut T {
    type Error = T::Error;

    fn select(&mut self) -> Result<(), Self::Error> {
        T::select(self)
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        T::deselect(self)
    }

    fn send_command(&mut self, command: u8, args: &[u8]) -> Result<(), Self::Error> {
        T::send_command(self, command, args)
    }

    fn send_pixel(&mut self, word: u16) -> Result<(), Self::Error> {
        T::send_pixel(self, word)
    }

    fn send_pixels(&mut self, words: &[u16]) -> Result<(), Self::Error> {
        T::send_pixels(self, words)
    }

    fn send_repeated(&mut self, word: u16, count: u32) -> Result<(), Self::Error> {
        T::send_repeated(self, word, count)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        T::flush(self)
    }
}

/// Error type for bus transports.
///
/// Wraps errors from the underlying bus and its control pins, plus the
/// drain failure every transport can surface instead of stalling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<BUS, PIN> {
    /// Bus transfer error
    Bus(BUS),
    /// Data/command or device-select pin error
    Pin(PIN),
    /// The transmit queue failed to drain within the transport's wait budget
    Fault,
}
