//! PWM output for the breathing LED

use embedded_hal::pwm::SetDutyCycle;
use grabbity_hal::AnalogOutput;

/// 8-bit level on top of any embedded-hal PWM channel
///
/// On the RP2040 the channel is an `embassy_rp::pwm::PwmOutput` split off
/// a PWM slice; the level is scaled onto the slice's full duty range.
pub struct PwmLevel<P> {
    pwm: P,
    level: u8,
}

impl<P: SetDutyCycle> PwmLevel<P> {
    /// Wrap `pwm`, starting fully off
    pub fn new(mut pwm: P) -> Self {
        let _ = pwm.set_duty_cycle_fully_off();
        Self { pwm, level: 0 }
    }

    /// Release the channel
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> AnalogOutput for PwmLevel<P> {
    fn set_level(&mut self, level: u8) {
        // Slice errors are not recoverable here; keep the last good level
        if self
            .pwm
            .set_duty_cycle_fraction(level as u16, u8::MAX as u16)
            .is_ok()
        {
            self.level = level;
        }
    }

    fn level(&self) -> u8 {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    struct MockPwm {
        duty: u16,
    }

    impl ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_level_scaling() {
        let mut led = PwmLevel::new(MockPwm { duty: 77 });
        assert_eq!(led.level(), 0);
        led.set_level(255);
        assert_eq!(led.level(), 255);
        led.set_level(100);
        let pwm = led.release();
        assert_eq!(pwm.duty, 392);
    }
}
