//! Mock capabilities used by documentation examples.
//!
//! Everything here succeeds and goes nowhere; real applications wire up
//! [`SpiInterface`](crate::interface::SpiInterface) and a platform HAL.

use core::convert::Infallible;

use crate::font::Font;
use crate::interface::Interface;
use crate::options::{DisplayState, PanelVariant};
use crate::Display;

/// Transport that accepts and discards all traffic.
pub struct MockInterface;

impl Interface for MockInterface {
    type Error = Infallible;

    fn select(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn send_command(&mut self, _command: u8, _args: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn send_pixel(&mut self, _word: u16) -> Result<(), Self::Error> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Output pin that ignores writes.
pub struct MockOutputPin;

impl embedded_hal::digital::ErrorType for MockOutputPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Delay provider that returns immediately.
pub struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Glyph source with empty bitmaps.
pub struct MockFont;

impl Font for MockFont {
    fn glyph_columns(&self, _code: u8) -> [u8; 5] {
        [0; 5]
    }
}

/// Builds an uninitialized display over the mock capabilities.
pub fn new_mock_display() -> Display<MockInterface, MockFont, MockOutputPin> {
    Display {
        di: MockInterface,
        rst: None,
        font: MockFont,
        state: DisplayState::new(PanelVariant::RRedTab),
        sleeping: false,
    }
}

#[cfg(test)]
pub(crate) mod record {
    //! Recording transport and a small controller model for unit tests.

    use std::collections::BTreeMap;
    use std::vec::Vec;

    use super::*;
    use crate::builder::NoResetPin;
    use crate::dcs;
    use crate::interface::TransportError;

    /// One recorded transport call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Op {
        Select,
        Deselect,
        Flush,
        Command(u8, Vec<u8>),
        Pixel(u16),
        Pixels(Vec<u16>),
        Repeat(u16, u32),
    }

    /// Transport that records every call in order.
    #[derive(Default)]
    pub struct RecordingInterface {
        pub ops: Vec<Op>,
        pub fail_flush: bool,
    }

    impl Interface for RecordingInterface {
        type Error = TransportError<(), ()>;

        fn select(&mut self) -> Result<(), Self::Error> {
            self.ops.push(Op::Select);
            Ok(())
        }

        fn deselect(&mut self) -> Result<(), Self::Error> {
            self.ops.push(Op::Deselect);
            Ok(())
        }

        fn send_command(&mut self, command: u8, args: &[u8]) -> Result<(), Self::Error> {
            self.ops.push(Op::Command(command, args.to_vec()));
            Ok(())
        }

        fn send_pixel(&mut self, word: u16) -> Result<(), Self::Error> {
            self.ops.push(Op::Pixel(word));
            Ok(())
        }

        fn send_pixels(&mut self, words: &[u16]) -> Result<(), Self::Error> {
            self.ops.push(Op::Pixels(words.to_vec()));
            Ok(())
        }

        fn send_repeated(&mut self, word: u16, count: u32) -> Result<(), Self::Error> {
            self.ops.push(Op::Repeat(word, count));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            if self.fail_flush {
                return Err(TransportError::Fault);
            }
            self.ops.push(Op::Flush);
            Ok(())
        }
    }

    /// Test font: a couple of real 5x7 glyphs plus a filler pattern.
    pub struct TestFont;

    impl Font for TestFont {
        fn glyph_columns(&self, code: u8) -> [u8; 5] {
            match code {
                b'A' => [0x7C, 0x12, 0x11, 0x12, 0x7C],
                b'!' => [0x00, 0x00, 0x5F, 0x00, 0x00],
                _ => [0x55, 0x2A, 0x55, 0x2A, 0x55],
            }
        }
    }

    /// Delay provider recording every requested millisecond value.
    #[derive(Default)]
    pub struct RecordingDelay {
        pub ms: Vec<u32>,
    }

    impl embedded_hal::delay::DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.ms.push(ns / 1_000_000);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.ms.push(ms);
        }
    }

    /// A ready display over the recording transport, skipping init traffic.
    pub fn display(variant: PanelVariant) -> Display<RecordingInterface, TestFont, NoResetPin> {
        Display {
            di: RecordingInterface::default(),
            rst: None,
            font: TestFont,
            state: DisplayState::new(variant),
            sleeping: false,
        }
    }

    /// All recorded commands with their argument bytes.
    pub fn commands(
        d: &Display<RecordingInterface, TestFont, NoResetPin>,
    ) -> Vec<(u8, Vec<u8>)> {
        d.di.ops
            .iter()
            .filter_map(|op| match op {
                Op::Command(opcode, args) => Some((*opcode, args.clone())),
                _ => None,
            })
            .collect()
    }

    /// All programmed address windows as raw wire values `(x0, y0, x1, y1)`.
    pub fn windows(
        d: &Display<RecordingInterface, TestFont, NoResetPin>,
    ) -> Vec<(u16, u16, u16, u16)> {
        let mut out = Vec::new();
        let mut pending: Option<(u16, u16)> = None;
        for op in &d.di.ops {
            match op {
                Op::Command(opcode, args) if *opcode == dcs::CASET && args.len() == 4 => {
                    pending = Some((be(args[0], args[1]), be(args[2], args[3])));
                }
                Op::Command(opcode, args) if *opcode == dcs::RASET && args.len() == 4 => {
                    if let Some((x0, x1)) = pending.take() {
                        out.push((x0, be(args[0], args[1]), x1, be(args[2], args[3])));
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// Total number of pixel words streamed.
    pub fn pixel_words(d: &Display<RecordingInterface, TestFont, NoResetPin>) -> u32 {
        d.di.ops
            .iter()
            .map(|op| match op {
                Op::Pixel(_) => 1,
                Op::Pixels(words) => words.len() as u32,
                Op::Repeat(_, count) => *count,
                _ => 0,
            })
            .sum()
    }

    /// Replays recorded traffic through a model of the controller,
    /// returning the painted `(x, y) -> word` map.
    ///
    /// Honors CASET/RASET/RAMWR, row-major auto-increment and the MADCTL
    /// row/column-exchange bit the glyph fast path toggles. Panel offsets
    /// are not subtracted; use a zero-offset variant with this helper.
    pub fn paint(
        d: &Display<RecordingInterface, TestFont, NoResetPin>,
    ) -> BTreeMap<(u16, u16), u16> {
        #[derive(Default)]
        struct Model {
            map: BTreeMap<(u16, u16), u16>,
            transposed: bool,
            x0: u16,
            x1: u16,
            y0: u16,
            cx: u16,
            cy: u16,
        }

        impl Model {
            fn put(&mut self, word: u16) {
                let coord = if self.transposed {
                    (self.cy, self.cx)
                } else {
                    (self.cx, self.cy)
                };
                self.map.insert(coord, word);
                if self.cx < self.x1 {
                    self.cx += 1;
                } else {
                    self.cx = self.x0;
                    self.cy += 1;
                }
            }
        }

        let mut m = Model::default();
        for op in &d.di.ops {
            match op {
                Op::Command(opcode, args) if *opcode == dcs::MADCTL => {
                    m.transposed = args[0] & dcs::MADCTL_MV != 0;
                }
                Op::Command(opcode, args) if *opcode == dcs::CASET && args.len() == 4 => {
                    m.x0 = be(args[0], args[1]);
                    m.x1 = be(args[2], args[3]);
                }
                Op::Command(opcode, args) if *opcode == dcs::RASET && args.len() == 4 => {
                    m.y0 = be(args[0], args[1]);
                }
                Op::Command(opcode, _) if *opcode == dcs::RAMWR => {
                    m.cx = m.x0;
                    m.cy = m.y0;
                }
                Op::Pixel(word) => m.put(*word),
                Op::Pixels(words) => {
                    for word in words {
                        m.put(*word);
                    }
                }
                Op::Repeat(word, count) => {
                    for _ in 0..*count {
                        m.put(*word);
                    }
                }
                _ => {}
            }
        }
        m.map
    }

    fn be(hi: u8, lo: u8) -> u16 {
        u16::from_be_bytes([hi, lo])
    }
}
