//! Time since boot, split for display

use core::fmt::Write;

use grabbity_display::SCREEN_COLS;
use heapless::String;

/// Milliseconds since boot broken into clock fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Uptime {
    ms: u32,
}

impl Uptime {
    /// Wrap a millisecond timestamp
    pub const fn from_ms(ms: u32) -> Self {
        Self { ms }
    }

    /// Whole hours since boot (not wrapped at 24)
    pub const fn hours(&self) -> u32 {
        self.ms / 3_600_000
    }

    /// Minute within the hour
    pub const fn minute(&self) -> u8 {
        ((self.ms / 60_000) % 60) as u8
    }

    /// Second within the minute
    pub const fn second(&self) -> u8 {
        ((self.ms / 1000) % 60) as u8
    }

    /// Status line shown under the header, e.g. `LISTEN [01:02:03]`
    pub fn listen_line(&self) -> String<SCREEN_COLS> {
        let mut line = String::new();
        // Longest possible value (1193 hours) is 19 characters
        let _ = write!(
            line,
            "LISTEN [{:02}:{:02}:{:02}]",
            self.hours(),
            self.minute(),
            self.second()
        );
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields() {
        let up = Uptime::from_ms(3_723_000);
        assert_eq!(up.hours(), 1);
        assert_eq!(up.minute(), 2);
        assert_eq!(up.second(), 3);
    }

    #[test]
    fn test_listen_line() {
        assert_eq!(Uptime::from_ms(3_723_000).listen_line().as_str(), "LISTEN [01:02:03]");
        assert_eq!(Uptime::from_ms(0).listen_line().as_str(), "LISTEN [00:00:00]");
    }

    #[test]
    fn test_listen_line_at_wrap() {
        let line = Uptime::from_ms(u32::MAX).listen_line();
        assert_eq!(line.as_str(), "LISTEN [1193:02:47]");
    }
}
