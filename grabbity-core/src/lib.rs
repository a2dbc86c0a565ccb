//! Board-agnostic glove logic
//!
//! This crate contains everything that does not depend on a specific
//! board, so it builds and tests on the host:
//!
//! - Text scroller for the transmission log
//! - Heartbeat indicator state machine
//! - Low-pass filter for the breathing PWM LED
//! - Resin counter
//! - Pulsing finger colors
//! - Rate gates, uptime formatting and the fan schedule
//! - Configuration types and the TOML subset parser
//! - The glove controller that ties them together each tick

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod filter;
pub mod glove;
pub mod heartbeat;
pub mod icons;
pub mod outputs;
pub mod pulse;
pub mod random;
pub mod resin;
pub mod schedule;
pub mod scroller;
pub mod startup;
pub mod uptime;

pub use glove::{Glove, TickOutputs};
pub use startup::{Startup, StartupError};
