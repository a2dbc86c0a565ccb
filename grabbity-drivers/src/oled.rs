//! SSD1306 OLED display
//!
//! Adapts the `ssd1306` crate's buffered graphics mode to the glove's
//! display traits. Text uses the 5x8 embedded-graphics font with one column
//! of spacing, giving 21 characters on each of 4 rows.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;
use grabbity_display::{
    Bitmap, BitmapMode, DisplayBackend, DisplayError, DisplayInit, GLYPH_WIDTH, LINE_HEIGHT,
};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

/// Glyph cells match the character grid used by the screen layout
const FONT: MonoFont<'static> = MonoFont {
    character_spacing: 1,
    ..FONT_5X8
};

type Panel<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// 128x32 SSD1306 panel on blocking I2C
pub struct Oled<I2C> {
    panel: Panel<I2C>,
    initialized: bool,
}

impl<I2C> Oled<I2C>
where
    I2C: I2c,
{
    /// Create a driver for the panel at the default address (0x3C)
    pub fn new(i2c: I2C, rotation: DisplayRotation) -> Self {
        Self::from_interface(I2CDisplayInterface::new(i2c), rotation)
    }

    /// Create a driver for a panel at a specific address
    pub fn with_address(i2c: I2C, address: u8, rotation: DisplayRotation) -> Self {
        Self::from_interface(
            I2CDisplayInterface::new_custom_address(i2c, address),
            rotation,
        )
    }

    fn from_interface(interface: I2CInterface<I2C>, rotation: DisplayRotation) -> Self {
        Self {
            panel: Ssd1306::new(interface, DisplaySize128x32, rotation)
                .into_buffered_graphics_mode(),
            initialized: false,
        }
    }

    /// Whether the init sequence has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl<I2C> DisplayInit for Oled<I2C>
where
    I2C: I2c,
{
    fn probe(&mut self) -> Result<(), DisplayError> {
        // Harmless at any time; fails with a NACK when nothing is there
        self.panel
            .set_display_on(false)
            .map_err(|_| DisplayError::Communication)
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        self.panel
            .init()
            .map_err(|_| DisplayError::Communication)?;
        self.initialized = true;
        self.panel.clear_buffer();
        self.present()
    }
}

impl<I2C> DisplayBackend for Oled<I2C>
where
    I2C: I2c,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.panel.clear_buffer();
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(&FONT, BinaryColor::On);
        // Drawing into the RAM buffer clips at the edge and cannot fail
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.panel);
        Ok(())
    }

    fn draw_bitmap(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &Bitmap<'_>,
        mode: BitmapMode,
    ) -> Result<(), DisplayError> {
        let size = self.panel.size();
        if x < 0 || y < 0 || x as u32 >= size.width || y as u32 >= size.height {
            return Err(DisplayError::InvalidCoordinates);
        }

        let on = mode == BitmapMode::Set;
        for (bx, by) in bitmap.set_pixels() {
            // The panel ignores pixels past its edge
            self.panel
                .set_pixel(x as u32 + bx as u32, y as u32 + by as u32, on);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.panel.flush().map_err(|_| DisplayError::Communication)
    }

    fn size_chars(&self) -> (u8, u8) {
        let size = self.panel.size();
        (
            (size.width as i32 / GLYPH_WIDTH) as u8,
            (size.height as i32 / LINE_HEIGHT) as u8,
        )
    }
}
