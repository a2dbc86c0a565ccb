//! GPIO output abstractions
//!
//! Digital outputs drive the heart indicators and the fan; the analog
//! output drives the PWM-dimmed LED.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Analog (PWM) output
///
/// The level is an 8-bit duty value: 0 is off, 255 is fully on.
pub trait AnalogOutput {
    /// Write an 8-bit duty level
    fn set_level(&mut self, level: u8);

    /// Last level written
    fn level(&self) -> u8;
}
