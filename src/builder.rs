//! [Builder] construction and controller bring-up.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::font::Font;
use crate::init;
use crate::interface::Interface;
use crate::options::{DisplayState, PanelVariant};
use crate::Display;

///
/// Builder for [Display] instances.
///
/// Collects the panel variant, the bus transport, an optional glyph source
/// and an optional reset pin, then runs the variant's power-on sequence.
///
/// # Examples
///
/// ```rust,ignore
/// use st7735_raster::{Builder, options::PanelVariant};
///
/// let mut display = Builder::new(PanelVariant::RGreenTab, iface)
///     .font(font)
///     .reset_pin(rst)
///     .init(&mut delay)?;
/// ```
pub struct Builder<DI, F = NoFont, RST = NoResetPin>
where
    DI: Interface,
{
    di: DI,
    variant: PanelVariant,
    font: F,
    rst: Option<RST>,
}

impl<DI> Builder<DI>
where
    DI: Interface,
{
    ///
    /// Constructs a new builder for the given panel variant and transport.
    ///
    pub fn new(variant: PanelVariant, di: DI) -> Self {
        Self {
            di,
            variant,
            font: NoFont,
            rst: None,
        }
    }
}

impl<DI, F, RST> Builder<DI, F, RST>
where
    DI: Interface,
{
    ///
    /// Supplies the glyph source used by the text operations.
    ///
    /// Without a font the display still builds, but the character and
    /// string methods are unavailable.
    ///
    pub fn font<F2: Font>(self, font: F2) -> Builder<DI, F2, RST> {
        Builder {
            di: self.di,
            variant: self.variant,
            font,
            rst: self.rst,
        }
    }

    ///
    /// Supplies the reset pin, pulsed during [Builder::init].
    ///
    /// If the pin is not wired to the host, the controller's reset line
    /// must be held high externally before init runs.
    ///
    pub fn reset_pin<RST2: OutputPin>(self, rst: RST2) -> Builder<DI, F, RST2> {
        Builder {
            di: self.di,
            variant: self.variant,
            font: self.font,
            rst: Some(rst),
        }
    }

    ///
    /// Consumes the builder, resets the controller and replays the panel
    /// variant's init tables.
    ///
    /// Returns the ready [Display]. Bring-up is fire-and-forget: a
    /// transport error surfaces here, but there is no acknowledgement that
    /// the sequence took effect.
    ///
    pub fn init<D: DelayNs>(
        self,
        delay: &mut D,
    ) -> Result<Display<DI, F, RST>, InitError<DI::Error, RST::Error>>
    where
        RST: OutputPin,
    {
        let variant = self.variant;
        let mut display = Display {
            di: self.di,
            rst: self.rst,
            font: self.font,
            state: DisplayState::new(variant),
            sleeping: false,
        };

        if let Some(rst) = display.rst.as_mut() {
            rst.set_high().map_err(InitError::ResetPin)?;
            delay.delay_ms(1);
            rst.set_low().map_err(InitError::ResetPin)?;
            delay.delay_ms(1);
            rst.set_high().map_err(InitError::ResetPin)?;
            delay.delay_ms(1);
        }

        let tables: &[&[init::InitStep]] = match variant {
            PanelVariant::B => &[init::ST7735B],
            PanelVariant::RGreenTab => &[
                init::ST7735R_COMMON,
                init::ST7735R_GREEN_TAB,
                init::ST7735R_FINAL,
            ],
            PanelVariant::RRedTab => &[
                init::ST7735R_COMMON,
                init::ST7735R_RED_TAB,
                init::ST7735R_FINAL,
            ],
            PanelVariant::RBlackTab => &[
                init::ST7735R_COMMON,
                init::ST7735R_RED_TAB,
                init::ST7735R_BLACK_TAB_ORDER,
                init::ST7735R_FINAL,
            ],
        };
        for table in tables {
            display
                .run_command_list(table, delay)
                .map_err(InitError::Interface)?;
        }

        Ok(display)
    }
}

/// Placeholder glyph source for displays built without a font.
pub struct NoFont;

/// Placeholder for the reset pin when the line is wired externally.
pub struct NoResetPin;

impl embedded_hal::digital::ErrorType for NoResetPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Error returned by [Builder::init].
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError<IF, P> {
    /// Transport failure during bring-up
    Interface(IF),
    /// Reset pin failure
    ResetPin(P),
}
