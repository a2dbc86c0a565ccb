//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the display traits
//! defined in grabbity-display:
//!
//! - SSD1306 128x32 OLED over blocking I2C, built on the `ssd1306` crate

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod oled;

pub use oled::Oled;
pub use ssd1306::prelude::DisplayRotation;
