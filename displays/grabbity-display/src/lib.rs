//! Display abstraction traits and shared components for Grabbity
//!
//! This crate provides:
//! - `DisplayBackend` trait for the glove's status display
//! - `Bitmap` for 1-bit icons drawn next to text
//! - `Screen`, a four-row character buffer and its pixel layout
//!
//! # Architecture
//!
//! The glove logic composes a `Screen` each refresh and renders it onto
//! any `DisplayBackend`. The firmware backs the trait with the SSD1306
//! driver from `grabbity-drivers`; tests back it with a recorder.

#![no_std]

pub mod backend;
pub mod screen;

// Re-export key types
pub use backend::{Bitmap, BitmapMode, DisplayBackend, DisplayError, DisplayInit};
pub use screen::{
    Icon, Screen, GLYPH_WIDTH, LINE_HEIGHT, SCREEN_COLS, SCREEN_ROWS, SCREEN_WIDTH, TOP_MARGIN,
};
