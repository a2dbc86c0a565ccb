//! Display backend trait
//!
//! Defines the interface for the glove's status display.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display (bus error or NACK)
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// How set bits of a bitmap are applied to the frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapMode {
    /// Turn pixels on where the bitmap has a 1
    #[default]
    Set,
    /// Turn pixels off where the bitmap has a 1
    Clear,
}

/// 1-bit bitmap, row-major, most significant bit first
///
/// Each row is padded to a whole number of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap<'a> {
    data: &'a [u8],
    width: u16,
    height: u16,
}

impl<'a> Bitmap<'a> {
    /// Wrap raw bitmap data
    ///
    /// Returns `None` if `data` is too short for the given dimensions.
    pub const fn new(data: &'a [u8], width: u16, height: u16) -> Option<Self> {
        let stride = (width as usize + 7) / 8;
        if data.len() < stride * height as usize {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bytes per row
    pub const fn stride(&self) -> usize {
        (self.width as usize + 7) / 8
    }

    /// Whether the pixel at (x, y) is set
    ///
    /// Out-of-range coordinates read as unset.
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.data[y as usize * self.stride() + (x as usize / 8)];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// Iterate over the coordinates of all set pixels
    pub fn set_pixels(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.pixel(x, y))
    }
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering to the status
/// display. Drawing goes to a frame buffer; `present` pushes it out.
pub trait DisplayBackend {
    /// Clear the frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at pixel (x, y)
    ///
    /// Text running past the right edge is clipped.
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError>;

    /// Draw a bitmap with its top-left corner at pixel (x, y)
    fn draw_bitmap(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &Bitmap<'_>,
        mode: BitmapMode,
    ) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    fn present(&mut self) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn size_chars(&self) -> (u8, u8);
}

/// Boot-time bring-up of a display controller
pub trait DisplayInit {
    /// Check that the controller answers on its bus
    fn probe(&mut self) -> Result<(), DisplayError>;

    /// Send the power-up command sequence
    fn init(&mut self) -> Result<(), DisplayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // 3x2 arrow: row 0 = 101, row 1 = 010
    const ARROW: [u8; 2] = [0b1010_0000, 0b0100_0000];

    #[test]
    fn test_bitmap_rejects_short_data() {
        assert!(Bitmap::new(&ARROW, 3, 2).is_some());
        assert!(Bitmap::new(&ARROW, 3, 3).is_none());
        assert!(Bitmap::new(&ARROW, 9, 2).is_none());
    }

    #[test]
    fn test_bitmap_pixels() {
        let bitmap = Bitmap::new(&ARROW, 3, 2).unwrap();
        assert!(bitmap.pixel(0, 0));
        assert!(!bitmap.pixel(1, 0));
        assert!(bitmap.pixel(2, 0));
        assert!(bitmap.pixel(1, 1));
        assert!(!bitmap.pixel(3, 0));
        assert!(!bitmap.pixel(0, 2));
    }

    #[test]
    fn test_bitmap_set_pixels() {
        let bitmap = Bitmap::new(&ARROW, 3, 2).unwrap();
        let mut count = 0;
        for (x, y) in bitmap.set_pixels() {
            assert!(bitmap.pixel(x, y));
            count += 1;
        }
        assert_eq!(count, 3);
    }
}
