//! Low-pass filter for the breathing LED
//!
//! Smooths a square-wave target into a gentle fade. The smoothing factor
//! is recomputed every step from the measured step length.

/// First-order low-pass filter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LowPassFilter {
    /// Time constant in seconds
    time_constant_s: f32,
    value: f32,
}

impl LowPassFilter {
    /// Create a filter resting at 0
    pub const fn new(time_constant_s: f32) -> Self {
        Self {
            time_constant_s,
            value: 0.0,
        }
    }

    /// Smoothing factor for a step of `dt_s` seconds
    pub fn alpha(&self, dt_s: f32) -> f32 {
        let dt = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };
        let denom = self.time_constant_s + dt;
        if denom > 0.0 {
            dt / denom
        } else {
            0.0
        }
    }

    /// Step toward `target` and return the new value
    ///
    /// The result always lies between the previous value and the target,
    /// so the output never overshoots.
    pub fn step(&mut self, target: f32, dt_s: f32) -> f32 {
        let alpha = self.alpha(dt_s);
        let next = self.value * alpha + target * (1.0 - alpha);
        let (lo, hi) = if self.value <= target {
            (self.value, target)
        } else {
            (target, self.value)
        };
        self.value = next.clamp(lo, hi);
        self.value
    }

    /// Current value
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Current value scaled to an 8-bit duty level
    pub fn level(&self, max_level: u8) -> u8 {
        let scaled = libm::roundf(self.value.clamp(0.0, 1.0) * max_level as f32);
        scaled as u8
    }
}

/// Square-wave target: 1.0 for `half_period_s` seconds, then 0.0
///
/// Derived from the second within the minute, like the display clock.
pub fn square_target(second: u8, half_period_s: u8) -> f32 {
    let half = half_period_s.max(1);
    if (second / half) % 2 == 1 {
        1.0
    } else {
        0.0
    }
}
