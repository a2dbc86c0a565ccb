//! Board pin maps
//!
//! Both gloves share the OLED on I2C1 (GPIO18 SDA, GPIO19 SCL) and the two
//! finger pixels on GPIO22 and GPIO23, each on its own PIO0 state machine.
//!
//! | glove | hearts A/B/C     | fan    | PWM LED              |
//! |-------|------------------|--------|----------------------|
//! | left  | GPIO7, 21, 16    | GPIO17 | -                    |
//! | right | -                | -      | GPIO16 (slice 0, A)  |

use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::{I2C1, PIO0};
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::Peripherals;
use grabbity_core::outputs::{GloveIo, Unconnected};
use grabbity_drivers::{DisplayRotation, Oled};
use grabbity_hal_rp2040::sk6812::{Sk6812, Sk6812Program};
use grabbity_hal_rp2040::ColorOrder;

#[cfg(feature = "left")]
use grabbity_hal_rp2040::gpio::RpOutput;

#[cfg(feature = "right")]
use embassy_rp::pwm::{self, Pwm, PwmOutput};
#[cfg(feature = "right")]
use grabbity_hal_rp2040::pwm::PwmLevel;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

/// OLED bus speed
const I2C_FREQUENCY_HZ: u32 = 400_000;

/// PWM wrap value; roughly 375 kHz at the default 125 MHz system clock
#[cfg(feature = "right")]
const PWM_TOP: u16 = 332;

/// I2C bus the display sits on
pub type DisplayBus = I2c<'static, I2C1, Blocking>;

/// Finger pixels on PIO0 state machines 0 and 1
pub type FingerA = Sk6812<'static, PIO0, 0>;
pub type FingerB = Sk6812<'static, PIO0, 1>;

#[cfg(feature = "left")]
pub type Heart = RpOutput<'static>;
#[cfg(feature = "left")]
pub type Fan = RpOutput<'static>;
#[cfg(feature = "left")]
pub type Led = Unconnected;

#[cfg(feature = "right")]
pub type Heart = Unconnected;
#[cfg(feature = "right")]
pub type Fan = Unconnected;
#[cfg(feature = "right")]
pub type Led = PwmLevel<PwmOutput<'static>>;

/// Every output this glove drives
pub type Io = GloveIo<Heart, Fan, Led, FingerA, FingerB>;

/// Hardware handed to the main loop
pub struct Board {
    pub io: Io,
    pub display: Oled<DisplayBus>,
}

impl Board {
    /// Claim the peripherals and configure every output
    ///
    /// Outputs come up low; the pixels use `order` for their byte layout.
    pub fn init(p: Peripherals, order: ColorOrder) -> Self {
        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = I2C_FREQUENCY_HZ;
        let bus = I2c::new_blocking(p.I2C1, p.PIN_19, p.PIN_18, i2c_config);
        // The panel is mounted upside down on both gloves
        let display = Oled::new(bus, DisplayRotation::Rotate180);

        let Pio {
            mut common,
            sm0,
            sm1,
            ..
        } = Pio::new(p.PIO0, Irqs);
        let program = Sk6812Program::new(&mut common);
        let fingers = (
            Sk6812::new(&mut common, sm0, p.PIN_22, &program, order),
            Sk6812::new(&mut common, sm1, p.PIN_23, &program, order),
        );

        #[cfg(feature = "left")]
        let io = GloveIo::new(
            [
                RpOutput::new(p.PIN_7),
                RpOutput::new(p.PIN_21),
                RpOutput::new(p.PIN_16),
            ],
            RpOutput::new(p.PIN_17),
            Unconnected,
            fingers,
        );

        #[cfg(feature = "right")]
        let io = {
            let mut pwm_config = pwm::Config::default();
            pwm_config.top = PWM_TOP;
            let (Some(led), _) = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config).split()
            else {
                unreachable!("new_output_a always yields channel A");
            };
            GloveIo::new([Unconnected; 3], Unconnected, PwmLevel::new(led), fingers)
        };

        Self { io, display }
    }
}
