//! RP2040-specific HAL for the glove firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `grabbity-hal` traits:
//!
//! - GPIO outputs for the heart indicators and fan
//! - PWM output for the breathing LED
//! - Millisecond clock on top of embassy-time
//! - PIO-based SK6812 RGBW pixel driver for the finger LEDs

#![no_std]

pub mod clock;
pub mod gpio;
pub mod pio;
pub mod pwm;
pub mod sk6812;

// Re-export shared traits from grabbity-hal for convenience
pub use grabbity_hal::{AnalogOutput, Clock, ColorOrder, OutputPin, PixelOutput, Rgbw};
