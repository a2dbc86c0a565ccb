//! Screen buffer types
//!
//! Provides the four-row character buffer shown on the 128x32 OLED and
//! its mapping to pixel positions.

use heapless::String;

use crate::backend::{Bitmap, BitmapMode, DisplayBackend, DisplayError};

/// Number of character rows on the glove display
pub const SCREEN_ROWS: usize = 4;

/// Number of character columns on the glove display
pub const SCREEN_COLS: usize = 20;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Pixel width of the panel
pub const SCREEN_WIDTH: i32 = 128;

/// Pixel height of one text row
pub const LINE_HEIGHT: i32 = 8;

/// Pixel width of one glyph cell (5px glyph + 1px spacing)
pub const GLYPH_WIDTH: i32 = 6;

/// Vertical offset of the first row
pub const TOP_MARGIN: i32 = 1;

/// Gap between an icon and the text that follows it
const ICON_GAP: i32 = 2;

/// A bitmap drawn at the start of a row, pushing that row's text right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    /// Row the icon sits on
    pub row: usize,
    /// Icon image
    pub bitmap: Bitmap<'static>,
}

/// Screen buffer for text-mode displays
///
/// Holds what one refresh of the display shows. Rendering clears the
/// backend, draws every non-empty row and the optional icon, then
/// presents the frame.
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Optional row icon
    icon: Option<Icon>,
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            icon: None,
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.icon = None;
        self.dirty = true;
    }

    /// Set the content of a specific row
    ///
    /// Text longer than the row's visible width is truncated.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < SCREEN_ROWS {
            let cols = self.row_cols(row);
            self.lines[row].clear();
            for ch in text.chars().take(cols) {
                if self.lines[row].push(ch).is_err() {
                    break;
                }
            }
            self.dirty = true;
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Place an icon at the start of a row
    pub fn set_icon(&mut self, row: usize, bitmap: Bitmap<'static>) {
        if row < SCREEN_ROWS {
            self.icon = Some(Icon { row, bitmap });
            // Text already on the row now starts further right
            let cols = self.row_cols(row);
            if let Some((end, _)) = self.lines[row].char_indices().nth(cols) {
                self.lines[row].truncate(end);
            }
            self.dirty = true;
        }
    }

    /// Current icon, if any
    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Pixel y coordinate of a row's top edge
    pub const fn row_y(row: usize) -> i32 {
        TOP_MARGIN + LINE_HEIGHT * row as i32
    }

    /// Pixel x coordinate where a row's text starts
    pub fn text_x(&self, row: usize) -> i32 {
        match &self.icon {
            Some(icon) if icon.row == row => icon.bitmap.width() as i32 + ICON_GAP,
            _ => 0,
        }
    }

    /// Characters that fit on a row after its text offset
    pub fn row_cols(&self, row: usize) -> usize {
        let fit = (SCREEN_WIDTH - self.text_x(row)) / GLYPH_WIDTH;
        (fit.max(0) as usize).min(SCREEN_COLS)
    }

    /// Draw the screen onto a backend and present it
    pub fn render<D: DisplayBackend>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        display.clear()?;

        if let Some(icon) = &self.icon {
            display.draw_bitmap(0, Self::row_y(icon.row), &icon.bitmap, BitmapMode::Set)?;
        }

        for (row, line) in self.lines.iter().enumerate() {
            if !line.is_empty() {
                display.draw_text(self.text_x(row), Self::row_y(row), line.as_str())?;
            }
        }

        display.present()?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
