//! Applying tick outputs to hardware

use grabbity_hal::{AnalogOutput, OutputPin, PixelOutput, Rgbw};

use crate::glove::TickOutputs;
use crate::pulse::FINGER_COUNT;

/// Stand-in for an output a glove does not have
///
/// The right glove has no hearts or fan and the left glove has no PWM
/// LED; their slots in [`GloveIo`] hold this no-op output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unconnected;

impl OutputPin for Unconnected {
    fn set_high(&mut self) {}

    fn set_low(&mut self) {}

    fn is_set_high(&self) -> bool {
        false
    }
}

impl AnalogOutput for Unconnected {
    fn set_level(&mut self, _level: u8) {}

    fn level(&self) -> u8 {
        0
    }
}

impl PixelOutput for Unconnected {
    fn write(&mut self, _color: Rgbw) {}
}

/// Every output on a glove
///
/// The two finger pixels are separate types because each sits on its own
/// PIO state machine.
pub struct GloveIo<H, F, L, P, Q> {
    /// Heart indicators A, B, C
    pub hearts: [H; 3],
    pub fan: F,
    /// PWM-dimmed LED
    pub led: L,
    pub fingers: (P, Q),
}

impl<H, F, L, P, Q> GloveIo<H, F, L, P, Q>
where
    H: OutputPin,
    F: OutputPin,
    L: AnalogOutput,
    P: PixelOutput,
    Q: PixelOutput,
{
    pub fn new(hearts: [H; 3], fan: F, led: L, fingers: (P, Q)) -> Self {
        Self {
            hearts,
            fan,
            led,
            fingers,
        }
    }

    /// Drive everything to its idle state
    pub fn all_off(&mut self) {
        for heart in self.hearts.iter_mut() {
            heart.set_low();
        }
        self.fan.set_low();
        self.led.set_level(0);
        let dark = grabbity_hal::rgbw(0, 0, 0, 0);
        self.write_fingers([dark; FINGER_COUNT]);
    }

    /// Push one tick's outputs to the hardware
    ///
    /// Outputs the tick left as `None` keep their previous state.
    pub fn apply(&mut self, outputs: &TickOutputs) {
        if let Some(states) = outputs.indicators {
            let [a, b, c] = &mut self.hearts;
            a.set_state(states.a);
            b.set_state(states.b);
            c.set_state(states.c);
        }
        if let Some(on) = outputs.fan {
            self.fan.set_state(on);
        }
        if let Some(level) = outputs.pwm_level {
            self.led.set_level(level);
        }
        self.write_fingers(outputs.pixels);
    }

    fn write_fingers(&mut self, colors: [Rgbw; FINGER_COUNT]) {
        let [first, second] = colors;
        self.fingers.0.write(first);
        self.fingers.1.write(second);
    }
}
