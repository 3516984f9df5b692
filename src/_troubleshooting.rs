//! # Troubleshooting guide
//!
//! This guide lists common issues that can cause a blank or corrupted display.
//!
//! ## Display stays black/blank
//!
//! ### Reset pin
//!
//! The reset pin on the ST7735 is active low, requiring it to be driven
//! **high** in order for the display to operate. It is recommended to
//! connect the reset pin to a GPIO pin and let this crate control it by
//! passing it to the builder via [`reset_pin`](crate::Builder::reset_pin).
//! If this isn't possible in the target application the user must make sure
//! the reset line is kept high before [`init`](crate::Builder::init) runs.
//!
//! ### Backlight pin
//!
//! This driver does **NOT** handle the backlight pin to keep the code
//! simpler. Users must control the backlight manually. First thing to try
//! is to see if setting the backlight pin to high fixes the issue.
//!
//! ### Transport misconfiguration
//!
//! Make sure the SPI bus is configured correctly. Typical mistakes are the
//! use of the wrong SPI mode (the ST7735 expects MODE 0) or transfer speeds
//! beyond what the panel wiring supports. Both are configured where the
//! HAL's `SpiBus` is constructed, not in this crate.
//!
//! ## Incorrect colors
//!
//! Red and blue swapped usually means the wrong
//! [`PanelVariant`](crate::options::PanelVariant) was selected: black-tab
//! panels store the two fields reversed and the driver corrects for this in
//! software when built with `RBlackTab`. Try the variant matching the
//! factory tab sticker on the panel, or each variant in turn.
//!
//! ## Picture shifted by a few pixels
//!
//! Green-tab panels sit at an offset inside the controller's memory and
//! need `RGreenTab` so every window is placed at (2, 1). Using the red-tab
//! tables on such a panel shows a shifted image with noise columns at one
//! edge.
//!
//! ## Glyphs come out rotated or displaced
//!
//! The fast text path temporarily exchanges the controller's row/column
//! addressing. If custom raw commands (via
//! [`interface`](crate::Display::interface)) run between glyph draws, make
//! sure they leave the memory-access-control register as they found it, or
//! subsequent windows land transposed.
