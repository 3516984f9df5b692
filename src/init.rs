//! Power-on command tables for the supported panel families.
//!
//! Controller bring-up is table-driven: each family is an ordered list of
//! [`InitStep`]s replayed by
//! [`Display::run_command_list`](crate::Display::run_command_list). The
//! sequences reprogram frame rate, power rails, gamma, inversion and color
//! depth; the drawing layer treats all of that as opaque controller state.

use crate::dcs;

/// One step of a controller init sequence.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitStep {
    /// Command opcode.
    pub opcode: u8,
    /// Argument bytes sent on the data line.
    pub args: &'static [u8],
    /// Settle time after the command. The table value 255 is shorthand
    /// for 500 ms.
    pub delay_ms: Option<u16>,
}

/// Init sequence for ST7735B controllers.
pub const ST7735B: &[InitStep] = &[
    InitStep { opcode: dcs::SWRESET, args: &[], delay_ms: Some(50) },
    InitStep { opcode: dcs::SLPOUT, args: &[], delay_ms: Some(255) },
    // 16-bit color
    InitStep { opcode: dcs::COLMOD, args: &[0x05], delay_ms: Some(10) },
    // fastest refresh, 6 lines front / 3 lines back porch
    InitStep { opcode: dcs::FRMCTR1, args: &[0x00, 0x06, 0x03], delay_ms: Some(10) },
    InitStep { opcode: dcs::MADCTL, args: &[0x08], delay_ms: None },
    InitStep { opcode: dcs::DISSET5, args: &[0x15, 0x02], delay_ms: None },
    // line inversion
    InitStep { opcode: dcs::INVCTR, args: &[0x00], delay_ms: None },
    InitStep { opcode: dcs::PWCTR1, args: &[0x02, 0x70], delay_ms: Some(10) },
    InitStep { opcode: dcs::PWCTR2, args: &[0x05], delay_ms: None },
    InitStep { opcode: dcs::PWCTR3, args: &[0x01, 0x02], delay_ms: None },
    InitStep { opcode: dcs::VMCTR1, args: &[0x3C, 0x38], delay_ms: Some(10) },
    InitStep { opcode: dcs::PWCTR6, args: &[0x11, 0x15], delay_ms: None },
    // gamma correction, positive then negative polarity
    InitStep {
        opcode: dcs::GMCTRP1,
        args: &[
            0x09, 0x16, 0x09, 0x20, 0x21, 0x1B, 0x13, 0x19,
            0x17, 0x15, 0x1E, 0x2B, 0x04, 0x05, 0x02, 0x0E,
        ],
        delay_ms: None,
    },
    InitStep {
        opcode: dcs::GMCTRN1,
        args: &[
            0x0B, 0x14, 0x08, 0x1E, 0x22, 0x1D, 0x18, 0x1E,
            0x1B, 0x1A, 0x24, 0x2B, 0x06, 0x06, 0x02, 0x0F,
        ],
        delay_ms: Some(10),
    },
    InitStep { opcode: dcs::CASET, args: &[0x00, 0x02, 0x00, 0x81], delay_ms: None },
    InitStep { opcode: dcs::RASET, args: &[0x00, 0x02, 0x00, 0x81], delay_ms: None },
    InitStep { opcode: dcs::NORON, args: &[], delay_ms: Some(10) },
    InitStep { opcode: dcs::DISPON, args: &[], delay_ms: Some(255) },
];

/// Init sequence for ST7735R controllers, part 1 (all tabs).
pub const ST7735R_COMMON: &[InitStep] = &[
    InitStep { opcode: dcs::SWRESET, args: &[], delay_ms: Some(150) },
    InitStep { opcode: dcs::SLPOUT, args: &[], delay_ms: Some(255) },
    // frame rate = fosc / (1*2+40) * (LINE+2C+2D), normal/idle/partial
    InitStep { opcode: dcs::FRMCTR1, args: &[0x01, 0x2C, 0x2D], delay_ms: None },
    InitStep { opcode: dcs::FRMCTR2, args: &[0x01, 0x2C, 0x2D], delay_ms: None },
    InitStep {
        opcode: dcs::FRMCTR3,
        args: &[0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D],
        delay_ms: None,
    },
    InitStep { opcode: dcs::INVCTR, args: &[0x07], delay_ms: None },
    InitStep { opcode: dcs::PWCTR1, args: &[0xA2, 0x02, 0x84], delay_ms: None },
    InitStep { opcode: dcs::PWCTR2, args: &[0xC5], delay_ms: None },
    InitStep { opcode: dcs::PWCTR3, args: &[0x0A, 0x00], delay_ms: None },
    InitStep { opcode: dcs::PWCTR4, args: &[0x8A, 0x2A], delay_ms: None },
    InitStep { opcode: dcs::PWCTR5, args: &[0x8A, 0xEE], delay_ms: None },
    InitStep { opcode: dcs::VMCTR1, args: &[0x0E], delay_ms: None },
    InitStep { opcode: dcs::INVOFF, args: &[], delay_ms: None },
    InitStep { opcode: dcs::MADCTL, args: &[0xC8], delay_ms: None },
    InitStep { opcode: dcs::COLMOD, args: &[0x05], delay_ms: None },
];

/// ST7735R part 2, green tab: address window with the (2, 1) panel offset.
pub const ST7735R_GREEN_TAB: &[InitStep] = &[
    InitStep { opcode: dcs::CASET, args: &[0x00, 0x02, 0x00, 0x81], delay_ms: None },
    InitStep { opcode: dcs::RASET, args: &[0x00, 0x01, 0x00, 0xA0], delay_ms: None },
];

/// ST7735R part 2, red and black tabs: zero-based address window.
pub const ST7735R_RED_TAB: &[InitStep] = &[
    InitStep { opcode: dcs::CASET, args: &[0x00, 0x00, 0x00, 0x7F], delay_ms: None },
    InitStep { opcode: dcs::RASET, args: &[0x00, 0x00, 0x00, 0x9F], delay_ms: None },
];

/// Black tab color-filter override: MADCTL without the BGR bit.
pub const ST7735R_BLACK_TAB_ORDER: &[InitStep] = &[
    InitStep { opcode: dcs::MADCTL, args: &[0xC0], delay_ms: None },
];

/// Init sequence for ST7735R controllers, part 3 (all tabs).
pub const ST7735R_FINAL: &[InitStep] = &[
    InitStep {
        opcode: dcs::GMCTRP1,
        args: &[
            0x02, 0x1C, 0x07, 0x12, 0x37, 0x32, 0x29, 0x2D,
            0x29, 0x25, 0x2B, 0x39, 0x00, 0x01, 0x03, 0x10,
        ],
        delay_ms: None,
    },
    InitStep {
        opcode: dcs::GMCTRN1,
        args: &[
            0x03, 0x1D, 0x07, 0x06, 0x2E, 0x2C, 0x29, 0x2D,
            0x2E, 0x2E, 0x37, 0x3F, 0x00, 0x00, 0x02, 0x10,
        ],
        delay_ms: None,
    },
    InitStep { opcode: dcs::NORON, args: &[], delay_ms: Some(10) },
    InitStep { opcode: dcs::DISPON, args: &[], delay_ms: Some(100) },
];
