//! Pulsing finger colors
//!
//! Each finger pixel breathes around a base HSV color. A smooth two-term
//! noise function of uptime shifts hue, saturation and value by small
//! per-channel amounts, with the two fingers offset from each other.

use grabbity_hal::pixel::{rgbw, Rgbw};
use smart_leds::hsv::{hsv2rgb, Hsv as Hsv8};
use smart_leds::RGB8;

/// Number of finger pixels
pub const FINGER_COUNT: usize = 2;

/// One channel's wobble: `amplitude * noise(0, rate * t + phase)`
#[derive(Debug, Clone, Copy)]
struct Wobble {
    amplitude: f32,
    rate: f32,
    phase: f32,
}

impl Wobble {
    const fn new(amplitude: f32, rate: f32, phase: f32) -> Self {
        Self {
            amplitude,
            rate,
            phase,
        }
    }

    fn at(&self, t_s: f32) -> f32 {
        self.amplitude * pulsing_noise(0.0, self.rate * t_s + self.phase)
    }
}

/// Rows are fingers; columns are hue, saturation and value
const WOBBLE: [[Wobble; 3]; FINGER_COUNT] = [
    [
        Wobble::new(0.02, 2.0, 0.0),
        Wobble::new(0.1, 0.2, 1.0),
        Wobble::new(0.3, 0.5, 2.0),
    ],
    [
        Wobble::new(0.02, 2.0, 4.0),
        Wobble::new(0.1, 0.09, 3.0),
        Wobble::new(0.3, 0.5, 6.0),
    ],
];

/// Common period of every wobble term, in seconds
///
/// `pulsing_noise(0, a)` repeats every 4π in `a`; 400π s is a whole number
/// of those periods at every rate in `WOBBLE`.
const CYCLE_S: f64 = 400.0 * core::f64::consts::PI;

/// Seconds into the repeating color cycle at `ms` of uptime
///
/// Reduced in f64 so the result keeps millisecond resolution however long
/// the glove has been running.
pub fn cycle_time(ms: u32) -> f32 {
    libm::fmod(ms as f64 / 1000.0, CYCLE_S) as f32
}

/// Smooth pseudo-noise: `cos(2x + t) * sin(x - t/2)`, bounded by [-1, 1]
pub fn pulsing_noise(x: f32, t: f32) -> f32 {
    libm::cosf(2.0 * x + t) * libm::sinf(x - 0.5 * t)
}

/// HSV color with each channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsv {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl Hsv {
    pub const fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Convert to a pixel color, optionally gamma corrected
    ///
    /// Every channel is clamped to [0, 1] before scaling to a byte. The
    /// white channel stays off.
    pub fn to_rgbw(&self, gamma: bool) -> Rgbw {
        let rgb = hsv2rgb(Hsv8 {
            hue: unit_to_byte(self.hue),
            sat: unit_to_byte(self.saturation),
            val: unit_to_byte(self.value),
        });
        let rgb = if gamma {
            smart_leds::gamma(core::iter::once(rgb))
                .next()
                .unwrap_or(rgb)
        } else {
            rgb
        };
        from_rgb(rgb)
    }
}

fn unit_to_byte(v: f32) -> u8 {
    libm::roundf(v.clamp(0.0, 1.0) * 255.0) as u8
}

fn from_rgb(rgb: RGB8) -> Rgbw {
    rgbw(rgb.r, rgb.g, rgb.b, 0)
}

/// Breathing color generator for the finger pixels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseGenerator {
    base: Hsv,
    gamma: bool,
}

impl PulseGenerator {
    pub const fn new(base: Hsv, gamma: bool) -> Self {
        Self { base, gamma }
    }

    /// Finger colors in HSV at `t_s` seconds into the cycle
    ///
    /// Pure function of time: the same `t_s` always yields the same colors.
    pub fn colors(&self, t_s: f32) -> [Hsv; FINGER_COUNT] {
        WOBBLE.map(|[h, s, v]| {
            Hsv::new(
                self.base.hue + h.at(t_s),
                self.base.saturation + s.at(t_s),
                self.base.value + v.at(t_s),
            )
        })
    }

    /// Finger pixel colors at `t_s` seconds into the cycle
    pub fn pixels(&self, t_s: f32) -> [Rgbw; FINGER_COUNT] {
        self.colors(t_s).map(|c| c.to_rgbw(self.gamma))
    }
}
