//! Transmission log scroller
//!
//! Streams a long fixed text corpus onto the character display a few lines
//! at a time. Each call scans forward from the cursor, breaking lines on a
//! newline or when the line is full, and then moves the cursor so the next
//! frame continues where this one left off.

use grabbity_display::SCREEN_COLS;
use heapless::{String, Vec};

/// Glyph placed in the first column of every scrolled line
pub const LINE_MARKER: char = '>';

/// Most lines a single advance can produce
pub const MAX_LINES: usize = 4;

/// One rendered line, marker included
pub type ScrollLine = String<SCREEN_COLS>;

/// How far the cursor moves after each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollAdvance {
    /// Move past the first line only; consecutive frames overlap
    #[default]
    OneLine,
    /// Move past every line shown in the frame
    Window,
}

/// Circular scroller over a static corpus
#[derive(Debug, Clone)]
pub struct Scroller {
    corpus: &'static [u8],
    /// Byte offset where the next frame starts
    cursor: usize,
    /// Line width in characters, marker included
    width: usize,
    lines_per_tick: usize,
    advance: ScrollAdvance,
}

impl Scroller {
    /// Create a scroller starting at the beginning of `corpus`
    ///
    /// `width` is clamped to `2..=SCREEN_COLS` so every line holds the marker
    /// plus at least one character; `lines_per_tick` is clamped to
    /// `1..=MAX_LINES`.
    pub fn new(
        corpus: &'static str,
        width: usize,
        lines_per_tick: usize,
        advance: ScrollAdvance,
    ) -> Self {
        Self {
            corpus: corpus.as_bytes(),
            cursor: 0,
            width: width.clamp(2, SCREEN_COLS),
            lines_per_tick: lines_per_tick.clamp(1, MAX_LINES),
            advance,
        }
    }

    /// Current cursor offset into the corpus
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Line width, marker included
    pub fn width(&self) -> usize {
        self.width
    }

    /// Lines produced per advance
    pub fn lines_per_tick(&self) -> usize {
        self.lines_per_tick
    }

    /// Produce the next frame of lines and move the cursor
    pub fn advance(&mut self) -> Vec<ScrollLine, MAX_LINES> {
        let mut lines = Vec::new();
        let len = self.corpus.len();

        if len == 0 {
            while lines.len() < self.lines_per_tick {
                let _ = lines.push(Self::fresh_line());
            }
            self.cursor = 0;
            return lines;
        }

        let mut pos = if self.cursor >= len { 0 } else { self.cursor };
        let mut first_break = None;
        let mut line = Self::fresh_line();

        while lines.len() < self.lines_per_tick {
            let byte = self.corpus[pos];

            let boundary = if byte == b'\n' {
                // Newline ends the line and is consumed
                pos = (pos + 1) % len;
                true
            } else if line.len() >= self.width {
                // Full line; the byte that did not fit is dropped
                pos = (pos + 1) % len;
                true
            } else {
                let _ = line.push(printable(byte));
                pos = (pos + 1) % len;
                false
            };

            if boundary {
                first_break.get_or_insert(pos);
                let _ = lines.push(core::mem::replace(&mut line, Self::fresh_line()));
            }
        }

        self.cursor = match self.advance {
            ScrollAdvance::OneLine => first_break.unwrap_or(pos),
            ScrollAdvance::Window => pos,
        };

        lines
    }

    fn fresh_line() -> ScrollLine {
        let mut line = String::new();
        let _ = line.push(LINE_MARKER);
        line
    }
}

/// Map a corpus byte to something the display font can draw
fn printable(byte: u8) -> char {
    match byte {
        b' '..=b'~' => byte as char,
        _ => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LOG: &str = "ALPHA\nBRAVO CHARLIE\nDELTA\n";

    fn texts(lines: &Vec<ScrollLine, MAX_LINES>) -> [&str; 2] {
        [lines[0].as_str(), lines[1].as_str()]
    }

    #[test]
    fn test_breaks_on_newline() {
        let mut scroller = Scroller::new(LOG, 20, 2, ScrollAdvance::OneLine);
        let lines = scroller.advance();
        assert_eq!(texts(&lines), [">ALPHA", ">BRAVO CHARLIE"]);
        // Next frame starts on the second line
        assert_eq!(scroller.cursor(), 6);
    }

    #[test]
    fn test_one_line_advance_overlaps() {
        let mut scroller = Scroller::new(LOG, 20, 2, ScrollAdvance::OneLine);
        scroller.advance();
        let lines = scroller.advance();
        assert_eq!(texts(&lines), [">BRAVO CHARLIE", ">DELTA"]);
    }

    #[test]
    fn test_window_advance_skips_shown_lines() {
        let mut scroller = Scroller::new(LOG, 20, 2, ScrollAdvance::Window);
        scroller.advance();
        let lines = scroller.advance();
        assert_eq!(texts(&lines), [">DELTA", ">ALPHA"]);
    }

    #[test]
    fn test_width_break_drops_character() {
        let mut scroller = Scroller::new("ABCDEFGHIJ", 5, 2, ScrollAdvance::OneLine);
        let lines = scroller.advance();
        // E and J did not fit and are skipped
        assert_eq!(texts(&lines), [">ABCD", ">FGHI"]);
        assert_eq!(scroller.cursor(), 5);

        let lines = scroller.advance();
        assert_eq!(texts(&lines), [">FGHI", ">ABCD"]);
        assert_eq!(scroller.cursor(), 0);
    }

    #[test]
    fn test_wraps_at_corpus_end() {
        let mut scroller = Scroller::new(LOG, 20, 2, ScrollAdvance::OneLine);
        scroller.advance();
        scroller.advance();
        // DELTA is last; the scan wraps back to ALPHA for the second line
        let lines = scroller.advance();
        assert_eq!(texts(&lines), [">DELTA", ">ALPHA"]);
        // Cursor sat right after the final newline, normalized to 0
        assert_eq!(scroller.cursor(), 0);
    }

    #[test]
    fn test_short_corpus_without_newline() {
        let mut scroller = Scroller::new("HI", 20, 2, ScrollAdvance::OneLine);
        let lines = scroller.advance();
        // Circular scan fills the line up to the width limit
        assert_eq!(lines[0].as_str(), ">HIHIHIHIHIHIHIHIHIH");
        // The I that did not fit is dropped
        assert_eq!(lines[1].as_str(), ">HIHIHIHIHIHIHIHIHIH");
        assert_eq!(scroller.cursor(), 0);
    }

    #[test]
    fn test_empty_corpus() {
        let mut scroller = Scroller::new("", 20, 2, ScrollAdvance::OneLine);
        let lines = scroller.advance();
        assert_eq!(texts(&lines), [">", ">"]);
        assert_eq!(scroller.cursor(), 0);
    }

    #[test]
    fn test_blank_lines_are_emitted() {
        let mut scroller = Scroller::new("\n\nX\n", 20, 2, ScrollAdvance::OneLine);
        let lines = scroller.advance();
        assert_eq!(texts(&lines), [">", ">"]);
        assert_eq!(scroller.cursor(), 1);
    }

    #[test]
    fn test_non_printable_bytes_become_spaces() {
        let mut scroller = Scroller::new("A\tB\n", 20, 1, ScrollAdvance::OneLine);
        let lines = scroller.advance();
        assert_eq!(lines[0].as_str(), ">A B");
    }

    #[test]
    fn test_parameters_are_clamped() {
        let scroller = Scroller::new(LOG, 1, 0, ScrollAdvance::OneLine);
        assert_eq!(scroller.width(), 2);
        assert_eq!(scroller.lines_per_tick(), 1);

        let scroller = Scroller::new(LOG, 64, 9, ScrollAdvance::OneLine);
        assert_eq!(scroller.width(), SCREEN_COLS);
        assert_eq!(scroller.lines_per_tick(), MAX_LINES);
    }

    proptest! {
        #[test]
        fn prop_frame_shape(
            corpus in "[a-z \n]{0,200}",
            width in 2usize..=20,
            lines in 1usize..=4,
            window in any::<bool>(),
            frames in 1usize..50,
        ) {
            // Corpus must outlive the scroller
            let corpus: &'static str = Box::leak(corpus.into_boxed_str());
            let advance = if window { ScrollAdvance::Window } else { ScrollAdvance::OneLine };
            let mut scroller = Scroller::new(corpus, width, lines, advance);

            for _ in 0..frames {
                let frame = scroller.advance();
                prop_assert_eq!(frame.len(), lines);
                for line in frame.iter() {
                    prop_assert!(line.len() <= width);
                    prop_assert!(line.starts_with(LINE_MARKER));
                }
                prop_assert!(scroller.cursor() < corpus.len().max(1));
            }
        }

        #[test]
        fn prop_cursor_lands_on_line_start(
            corpus in "[a-z]{1,19}(\n[a-z]{1,19}){0,10}\n",
            frames in 1usize..40,
        ) {
            // Every line fits, so only newlines break lines
            let corpus: &'static str = Box::leak(corpus.into_boxed_str());
            let mut scroller = Scroller::new(corpus, 20, 2, ScrollAdvance::OneLine);

            for _ in 0..frames {
                scroller.advance();
                let cursor = scroller.cursor();
                prop_assert!(cursor == 0 || corpus.as_bytes()[cursor - 1] == b'\n');
            }
        }
    }
}
