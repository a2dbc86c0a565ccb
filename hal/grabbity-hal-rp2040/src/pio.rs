//! PIO timing for SK6812 RGBW pixels
//!
//! The pixels take a single-wire NRZ signal at 800 kHz. Each bit is one
//! PIO loop of `CYCLES_PER_BIT` PIO clocks: a short high pulse for a 0,
//! a long one for a 1. The clock divider sets the PIO clock so that loop
//! runs at exactly the bit rate.
//!
//! # Architecture
//!
//! Each finger pixel sits on its own data pin and gets its own state
//! machine, but both share one copy of the program in the PIO block.

use fixed::types::U24F8;

/// System clock frequency (RP2040 default)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Bit rate of the pixel data line
pub const BIT_RATE_HZ: u32 = 800_000;

/// PIO clocks in the high-before-decision part of a bit
pub const T1: u8 = 2;
/// PIO clocks in the data part of a bit
pub const T2: u8 = 5;
/// PIO clocks in the low tail of a bit
pub const T3: u8 = 3;

/// PIO clocks per transmitted bit
pub const CYCLES_PER_BIT: u32 = (T1 + T2 + T3) as u32;

/// Bits per RGBW pixel
pub const BITS_PER_PIXEL: u8 = 32;

/// Low time after a frame before pixels latch, in microseconds
pub const LATCH_US: u32 = 80;

/// Clock divider for the bit loop at `sys_clk_hz`
///
/// Works in kHz to keep the 24.8 fixed-point math in range.
pub fn clock_divider(sys_clk_hz: u32) -> U24F8 {
    let clock_khz = U24F8::from_num(sys_clk_hz / 1000);
    let bit_khz = U24F8::from_num(BIT_RATE_HZ / 1000 * CYCLES_PER_BIT);
    clock_khz / bit_khz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_divider() {
        // 125 MHz / 8 MHz = 15.625
        let div = clock_divider(SYS_CLK_HZ);
        assert_eq!(div, U24F8::from_num(15.625));
    }

    #[test]
    fn test_bit_timing() {
        assert_eq!(CYCLES_PER_BIT, 10);
        // A full pixel takes 40 us at 800 kHz
        assert_eq!(BITS_PER_PIXEL as u32 * 1_000_000 / BIT_RATE_HZ, 40);
    }
}
