//! Configuration type definitions

use grabbity_display::SCREEN_COLS;
use grabbity_hal::ColorOrder;
use heapless::String;

use crate::heartbeat::HeartbeatPolicy;
use crate::pulse::Hsv;
use crate::scroller::ScrollAdvance;

/// Maximum header length
pub const MAX_HEADER_LEN: usize = SCREEN_COLS;

/// Header shown on the top display row
pub const DEFAULT_HEADER: &str = "OVERWATCH 711.1MHZ";

/// Which glove the firmware runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GloveKind {
    Left,
    #[default]
    Right,
}

/// Status display settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Top row text
    pub header: String<MAX_HEADER_LEN>,
    /// Minimum time between display refreshes
    pub refresh_ms: u32,
    /// Scroller line width, marker included
    pub width_chars: u8,
    /// Scroller lines shown per refresh (rows 2 and 3)
    pub lines_per_tick: u8,
    /// Scroller cursor movement per refresh
    pub advance: ScrollAdvance,
    /// Show the resin icon and count before the header
    pub resin_icon: bool,
}

/// Heart indicator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeartbeatConfig {
    pub enabled: bool,
    pub policy: HeartbeatPolicy,
    /// Time between beats
    pub interval_ms: u32,
}

/// Breathing LED settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterConfig {
    pub enabled: bool,
    /// Low-pass time constant in seconds
    pub time_constant_s: f32,
    /// PWM level written for a fully-on filter output
    pub max_level: u8,
    /// Seconds on, then seconds off, of the square-wave target
    pub half_period_s: u8,
}

/// Resin counter settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResinConfig {
    pub enabled: bool,
    /// Minimum time between resin draws
    pub interval_ms: u32,
    /// Expected increments per second
    pub rate_per_second: f32,
}

/// Pulsing finger color settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseConfig {
    /// Base color
    pub base: Hsv,
    /// Apply gamma correction before sending to the pixels
    pub gamma: bool,
}

/// What drives the finger pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelSource {
    /// Pixels stay dark
    Off,
    /// Mirror the heart indicators
    Heartbeat,
    /// Breathing color from the pulse generator
    #[default]
    Pulse,
}

/// Finger pixel settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelConfig {
    pub source: PixelSource,
    /// Byte order on the data line
    pub order: ColorOrder,
}

/// Fan settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FanConfig {
    pub enabled: bool,
    /// Length of each on and each off period
    pub toggle_ms: u32,
}

/// Complete glove configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GloveConfig {
    pub kind: GloveKind,
    /// Control loop period
    pub tick_ms: u32,
    pub display: DisplayConfig,
    pub heartbeat: HeartbeatConfig,
    pub filter: FilterConfig,
    pub resin: ResinConfig,
    pub pulse: PulseConfig,
    pub pixels: PixelConfig,
    pub fan: FanConfig,
}

impl Default for GloveConfig {
    fn default() -> Self {
        Self::right()
    }
}

impl GloveConfig {
    /// Defaults for the given glove
    pub fn for_kind(kind: GloveKind) -> Self {
        match kind {
            GloveKind::Left => Self::left(),
            GloveKind::Right => Self::right(),
        }
    }

    /// Left glove: hearts, fan, resin counter, heartbeat-colored fingers
    pub fn left() -> Self {
        Self {
            kind: GloveKind::Left,
            tick_ms: 200,
            display: DisplayConfig {
                header: header(DEFAULT_HEADER),
                refresh_ms: 200,
                width_chars: SCREEN_COLS as u8,
                lines_per_tick: 2,
                advance: ScrollAdvance::Window,
                resin_icon: true,
            },
            heartbeat: HeartbeatConfig {
                enabled: true,
                policy: HeartbeatPolicy::WallClock,
                interval_ms: 1000,
            },
            filter: FilterConfig {
                enabled: false,
                ..Self::right_filter()
            },
            resin: ResinConfig {
                enabled: true,
                interval_ms: 200,
                rate_per_second: 1.0 / 300.0,
            },
            pulse: Self::default_pulse(),
            pixels: PixelConfig {
                source: PixelSource::Heartbeat,
                order: ColorOrder::Rgbw,
            },
            fan: FanConfig {
                enabled: true,
                toggle_ms: 1000,
            },
        }
    }

    /// Right glove: breathing LED and pulsing orange fingers
    pub fn right() -> Self {
        Self {
            kind: GloveKind::Right,
            tick_ms: 100,
            display: DisplayConfig {
                header: header(DEFAULT_HEADER),
                refresh_ms: 2000,
                width_chars: SCREEN_COLS as u8,
                lines_per_tick: 2,
                advance: ScrollAdvance::OneLine,
                resin_icon: false,
            },
            heartbeat: HeartbeatConfig {
                enabled: false,
                policy: HeartbeatPolicy::FreeRunning,
                interval_ms: 1000,
            },
            filter: Self::right_filter(),
            resin: ResinConfig {
                enabled: false,
                interval_ms: 200,
                rate_per_second: 1.0 / 300.0,
            },
            pulse: Self::default_pulse(),
            pixels: PixelConfig {
                source: PixelSource::Pulse,
                order: ColorOrder::Grbw,
            },
            fan: FanConfig {
                enabled: false,
                toggle_ms: 1000,
            },
        }
    }

    const fn right_filter() -> FilterConfig {
        FilterConfig {
            enabled: true,
            time_constant_s: 1.0,
            max_level: 100,
            half_period_s: 2,
        }
    }

    const fn default_pulse() -> PulseConfig {
        PulseConfig {
            base: Hsv::new(0.08, 0.9, 0.7),
            gamma: true,
        }
    }
}

fn header(text: &str) -> String<MAX_HEADER_LEN> {
    let mut s = String::new();
    let _ = s.push_str(text);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glove_defaults() {
        let left = GloveConfig::for_kind(GloveKind::Left);
        assert_eq!(left.kind, GloveKind::Left);
        assert!(left.fan.enabled);
        assert!(!left.filter.enabled);
        assert_eq!(left.pixels.source, PixelSource::Heartbeat);

        let right = GloveConfig::default();
        assert_eq!(right.kind, GloveKind::Right);
        assert_eq!(right.tick_ms, 100);
        assert_eq!(right.display.refresh_ms, 2000);
        assert_eq!(right.display.header.as_str(), "OVERWATCH 711.1MHZ");
        assert_eq!(right.pixels.order, ColorOrder::Grbw);
    }
}
