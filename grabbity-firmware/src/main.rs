//! Grabbity glove firmware
//!
//! Main entry point for the RP2040 glove controller. A single embassy task
//! runs the control loop; the glove is chosen at build time with the
//! `left` or `right` feature.

#![no_std]
#![no_main]

mod board;

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Ticker, Timer};
use grabbity_core::config::{parse_config, GloveConfig, GloveKind};
use grabbity_core::random::XorShift32;
use grabbity_core::uptime::Uptime;
use grabbity_core::{Glove, Startup};
use grabbity_hal_rp2040::clock::EmbassyClock;
use grabbity_hal_rp2040::Clock;
use {defmt_rtt as _, panic_probe as _};

use crate::board::Board;

#[cfg(all(feature = "left", feature = "right"))]
compile_error!("features `left` and `right` are mutually exclusive");

#[cfg(feature = "left")]
const GLOVE: GloveKind = GloveKind::Left;
#[cfg(feature = "left")]
static GLOVE_TOML: &str = include_str!("../left.toml");

#[cfg(feature = "right")]
const GLOVE: GloveKind = GloveKind::Right;
#[cfg(feature = "right")]
static GLOVE_TOML: &str = include_str!("../right.toml");

/// Transmission log shown on the lower display rows
static CORPUS: &str = include_str!("../corpus.txt");

/// How long the boot splash stays up
const BOOT_SCREEN_MS: u64 = 500;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Grabbity firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("RP2040 initialized");

    let config = load_config();
    info!(
        "Glove: {}, tick {} ms, refresh {} ms",
        config.kind, config.tick_ms, config.display.refresh_ms
    );

    let Board { mut io, display } = Board::init(p, config.pixels.order);
    io.all_off();
    info!("Outputs off");

    let mut display = match Startup::bring_up(display) {
        Startup::Ready(display) => display,
        Startup::Halted(err) => {
            error!("Display bring-up failed: {}", err);
            halt();
        }
    };
    info!("Display ready");

    let clock = EmbassyClock::since_boot();
    let tick = Duration::from_millis(config.tick_ms as u64);
    let mut glove = Glove::new(config, CORPUS);

    glove.compose_boot();
    if let Err(e) = glove.screen_mut().render(&mut display) {
        warn!("Boot screen write failed: {}", e);
    }
    Timer::after_millis(BOOT_SCREEN_MS).await;

    glove.compose_status(Uptime::from_ms(clock.elapsed_ms()));
    if let Err(e) = glove.screen_mut().render(&mut display) {
        warn!("Status screen write failed: {}", e);
    }

    // Timer ticks at boot differ run to run, which is enough spread here
    let mut rng = XorShift32::new(Instant::now().as_ticks() as u32);

    info!("Entering main loop");
    let mut ticker = Ticker::every(tick);

    loop {
        let now_ms = clock.elapsed_ms();
        let outputs = glove.tick(now_ms, &mut rng);
        io.apply(&outputs);

        trace!(
            "t={} ms hearts={} fan={} pwm={}",
            now_ms,
            outputs.indicators,
            outputs.fan,
            outputs.pwm_level
        );

        if outputs.resin_changed {
            debug!("Resin count now {}", glove.resin_count());
        }

        if outputs.screen_updated {
            debug!("Display refresh, scroll cursor {}", glove.scroller().cursor());
            if let Err(e) = glove.screen_mut().render(&mut display) {
                warn!("Display write failed: {}", e);
            }
        }

        ticker.next().await;
    }
}

/// Parse the embedded glove file, falling back to built-in defaults
fn load_config() -> GloveConfig {
    let defaults = GloveConfig::for_kind(GLOVE);

    match parse_config(GLOVE_TOML, defaults.clone()) {
        Ok(config) if config.kind == GLOVE => config,
        Ok(config) => {
            error!(
                "Config is for the {} glove but firmware is built for {}; using defaults",
                config.kind, GLOVE
            );
            defaults
        }
        Err(e) => {
            error!("Config error on line {}: {}; using defaults", e.line(), e);
            defaults
        }
    }
}

/// Park the core forever
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
