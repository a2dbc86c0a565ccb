//! PIO-based SK6812 RGBW pixel driver
//!
//! One state machine per pixel. Colors are packed into a 32-bit word in
//! the pixel's byte order and pushed into the TX FIFO; the program shifts
//! it out MSB first.

use embassy_rp::pio::{
    Common, Config, FifoJoin, Instance, LoadedProgram, PioPin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use embassy_rp::Peri;
use grabbity_hal::{ColorOrder, PixelOutput, Rgbw};

use crate::pio::{clock_divider, BITS_PER_PIXEL};

/// The bit loop program, loaded once per PIO block
pub struct Sk6812Program<'d, PIO: Instance> {
    prg: LoadedProgram<'d, PIO>,
}

impl<'d, PIO: Instance> Sk6812Program<'d, PIO> {
    /// Load the program into `common`
    pub fn new(common: &mut Common<'d, PIO>) -> Self {
        // Side-set drives the data pin; `x` holds the bit being sent
        let prg = pio::pio_asm!(
            ".side_set 1",
            ".wrap_target",
            "bitloop:",
            "    out x, 1        side 0 [2]",
            "    jmp !x do_zero  side 1 [1]",
            "do_one:",
            "    jmp bitloop     side 1 [4]",
            "do_zero:",
            "    nop             side 0 [4]",
            ".wrap"
        );
        // Delays above are T3 - 1, T1 - 1 and T2 - 1 from crate::pio

        Self {
            prg: common.load_program(&prg.program),
        }
    }
}

/// A single SK6812 pixel on its own state machine
pub struct Sk6812<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
    order: ColorOrder,
}

impl<'d, PIO: Instance, const SM: usize> Sk6812<'d, PIO, SM> {
    /// Configure `sm` to drive a pixel on `pin`
    ///
    /// # Arguments
    /// * `common` - PIO common resources
    /// * `sm` - State machine to use
    /// * `pin` - Data pin (must be PIO-capable)
    /// * `program` - Bit loop program already loaded into this PIO block
    /// * `order` - Byte order the pixel expects
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        pin: Peri<'d, impl PioPin>,
        program: &Sk6812Program<'d, PIO>,
        order: ColorOrder,
    ) -> Self {
        let out_pin = common.make_pio_pin(pin);

        let mut cfg = Config::default();
        cfg.set_out_pins(&[&out_pin]);
        cfg.set_set_pins(&[&out_pin]);
        cfg.use_program(&program.prg, &[&out_pin]);
        cfg.clock_divider = clock_divider(embassy_rp::clocks::clk_sys_freq());
        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: BITS_PER_PIXEL,
            direction: ShiftDirection::Left,
        };

        sm.set_config(&cfg);
        sm.set_enable(true);

        Self { sm, order }
    }

    /// Byte order this pixel uses
    pub fn order(&self) -> ColorOrder {
        self.order
    }
}

impl<'d, PIO: Instance, const SM: usize> PixelOutput for Sk6812<'d, PIO, SM> {
    fn write(&mut self, color: Rgbw) {
        // One word per tick never fills the FIFO; a full FIFO drops the frame
        let _ = self.sm.tx().try_push(self.order.pack(color));
    }
}
