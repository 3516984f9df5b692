//! ST7735 command set.
//!
//! Opcode values from the ST7735 datasheet. Commands are sent on the
//! command line, their arguments on the data line; see
//! [`Interface::send_command`](crate::interface::Interface::send_command).

pub const NOP: u8 = 0x00;
pub const SWRESET: u8 = 0x01;
pub const RDDID: u8 = 0x04;
pub const RDDST: u8 = 0x09;

pub const SLPIN: u8 = 0x10;
pub const SLPOUT: u8 = 0x11;
pub const PTLON: u8 = 0x12;
pub const NORON: u8 = 0x13;

pub const INVOFF: u8 = 0x20;
pub const INVON: u8 = 0x21;
pub const DISPOFF: u8 = 0x28;
pub const DISPON: u8 = 0x29;

/// Column address set: two big-endian u16 bounds, inclusive.
pub const CASET: u8 = 0x2A;
/// Row address set: two big-endian u16 bounds, inclusive.
pub const RASET: u8 = 0x2B;
/// Memory write: pixel words that follow auto-fill the address window.
pub const RAMWR: u8 = 0x2C;
pub const RAMRD: u8 = 0x2E;

pub const PTLAR: u8 = 0x30;
pub const MADCTL: u8 = 0x36;
pub const COLMOD: u8 = 0x3A;

pub const FRMCTR1: u8 = 0xB1;
pub const FRMCTR2: u8 = 0xB2;
pub const FRMCTR3: u8 = 0xB3;
pub const INVCTR: u8 = 0xB4;
pub const DISSET5: u8 = 0xB6;

pub const PWCTR1: u8 = 0xC0;
pub const PWCTR2: u8 = 0xC1;
pub const PWCTR3: u8 = 0xC2;
pub const PWCTR4: u8 = 0xC3;
pub const PWCTR5: u8 = 0xC4;
pub const VMCTR1: u8 = 0xC5;
pub const PWCTR6: u8 = 0xFC;

pub const GMCTRP1: u8 = 0xE0;
pub const GMCTRN1: u8 = 0xE1;

/// MADCTL row address order.
pub const MADCTL_MY: u8 = 0x80;
/// MADCTL column address order.
pub const MADCTL_MX: u8 = 0x40;
/// MADCTL row/column exchange; the glyph fast path toggles this bit to
/// rotate the controller's auto-increment direction.
pub const MADCTL_MV: u8 = 0x20;
/// MADCTL vertical refresh order.
pub const MADCTL_ML: u8 = 0x10;
/// MADCTL RGB/BGR subpixel order.
pub const MADCTL_RGB: u8 = 0x08;
/// MADCTL horizontal refresh order.
pub const MADCTL_MH: u8 = 0x04;
