//! Grabbity Hardware Abstraction Layer
//!
//! This crate defines the capability traits the glove logic calls into.
//! Chip-specific crates (currently RP2040) implement them, and the host
//! tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (grabbity-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  grabbity-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ grabbity-hal-     │
//!           │    rp2040         │
//!           └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::AnalogOutput`] - Digital and PWM outputs
//! - [`pixel::PixelOutput`] - Single addressable RGBW LED
//! - [`clock::Clock`] - Milliseconds since boot
//! - [`random::RandomSource`] - Uniform random draws

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod pixel;
pub mod random;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use gpio::{AnalogOutput, OutputPin};
pub use pixel::{rgbw, ColorOrder, PixelOutput, Rgbw};
pub use random::RandomSource;
