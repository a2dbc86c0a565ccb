//! Addressable pixel output

pub use smart_leds::RGBW;

/// 8-bit RGBW color as sent to the finger pixels
pub type Rgbw = RGBW<u8>;

/// Build an [`Rgbw`] value from its four channels
pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Rgbw {
    RGBW {
        r,
        g,
        b,
        a: smart_leds::White(w),
    }
}

/// A single addressable RGBW LED
///
/// Each finger pixel sits on its own data line, so one write sets the
/// color and latches it ("set color" + "show").
pub trait PixelOutput {
    /// Send a color to the pixel
    fn write(&mut self, color: Rgbw);
}

/// Byte order a pixel expects on its data line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorOrder {
    /// Green, red, blue, white (SK6812 RGBW parts)
    #[default]
    Grbw,
    /// Red, green, blue, white
    Rgbw,
}

impl ColorOrder {
    /// Pack a color into the 32-bit word shifted out MSB first
    pub const fn pack(self, color: Rgbw) -> u32 {
        let (first, second) = match self {
            ColorOrder::Grbw => (color.g, color.r),
            ColorOrder::Rgbw => (color.r, color.g),
        };
        ((first as u32) << 24) | ((second as u32) << 16) | ((color.b as u32) << 8) | color.a.0 as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_grbw() {
        let word = ColorOrder::Grbw.pack(rgbw(0x11, 0x22, 0x33, 0x44));
        assert_eq!(word, 0x2211_3344);
    }

    #[test]
    fn test_pack_rgbw() {
        let word = ColorOrder::Rgbw.pack(rgbw(0x11, 0x22, 0x33, 0x44));
        assert_eq!(word, 0x1122_3344);
    }
}
