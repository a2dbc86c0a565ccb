//! Glove configuration
//!
//! Each glove ships a small TOML file embedded in the firmware image. The
//! types here describe it; [`parse`] reads the TOML subset without an
//! allocator and overlays the values onto the per-glove defaults.

pub mod parse;
pub mod types;

pub use parse::*;
pub use types::*;
