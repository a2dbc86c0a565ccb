//! Glove controller
//!
//! Owns every subsystem and runs one control-loop tick at a time. Each
//! subsystem has its own rate gate, so a tick may update some outputs and
//! leave others alone. The controller never touches hardware: it returns a
//! [`TickOutputs`] snapshot that [`crate::outputs::GloveIo`] applies, and
//! composes the display contents into a [`Screen`] the caller renders.

use core::fmt::Write;

use grabbity_display::{Screen, SCREEN_COLS, SCREEN_ROWS};
use grabbity_hal::{RandomSource, Rgbw};
use heapless::String;

use crate::config::{GloveConfig, GloveKind, PixelSource};
use crate::filter::{square_target, LowPassFilter};
use crate::heartbeat::{Heartbeat, IndicatorStates};
use crate::icons;
use crate::pulse::{cycle_time, PulseGenerator, FINGER_COUNT};
use crate::resin::ResinCounter;
use crate::schedule::{FanSchedule, RateGate};
use crate::scroller::Scroller;
use crate::uptime::Uptime;

/// First display row used by the scroller
const SCROLL_FIRST_ROW: usize = 2;

const DARK: Rgbw = grabbity_hal::rgbw(0, 0, 0, 0);

/// Everything one tick wants the hardware to show
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutputs {
    /// Heart indicator states, when the glove has hearts
    pub indicators: Option<IndicatorStates>,
    /// Fan on/off, when the glove has a fan
    pub fan: Option<bool>,
    /// New PWM level, when the filter stepped this tick
    pub pwm_level: Option<u8>,
    /// Finger pixel colors
    pub pixels: [Rgbw; FINGER_COUNT],
    /// Whether the screen was recomposed and should be rendered
    pub screen_updated: bool,
    /// Whether the resin count changed this tick
    pub resin_changed: bool,
}

/// A subsystem together with the gate that paces it
#[derive(Debug, Clone)]
struct Paced<T> {
    inner: T,
    gate: RateGate,
}

impl<T> Paced<T> {
    fn new(inner: T, interval_ms: u32) -> Self {
        Self {
            inner,
            gate: RateGate::new(interval_ms),
        }
    }
}

/// All per-glove state
pub struct Glove {
    config: GloveConfig,
    scroller: Scroller,
    display_gate: RateGate,
    heartbeat: Option<Paced<Heartbeat>>,
    filter: Option<Paced<LowPassFilter>>,
    resin: Option<Paced<ResinCounter>>,
    fan: Option<FanSchedule>,
    pulse: PulseGenerator,
    screen: Screen,
}

impl Glove {
    /// Build the controller for `config`, scrolling `corpus`
    pub fn new(config: GloveConfig, corpus: &'static str) -> Self {
        let scroller = Scroller::new(
            corpus,
            config.display.width_chars as usize,
            config.display.lines_per_tick as usize,
            config.display.advance,
        );
        let heartbeat = config.heartbeat.enabled.then(|| {
            Paced::new(
                Heartbeat::new(config.heartbeat.policy),
                config.heartbeat.interval_ms,
            )
        });
        // The filter steps every tick; its dt is the measured gap
        let filter = config
            .filter
            .enabled
            .then(|| Paced::new(LowPassFilter::new(config.filter.time_constant_s), 0));
        let resin = config.resin.enabled.then(|| {
            Paced::new(
                ResinCounter::new(config.resin.rate_per_second),
                config.resin.interval_ms,
            )
        });
        let fan = config
            .fan
            .enabled
            .then(|| FanSchedule::new(config.fan.toggle_ms));

        Self {
            scroller,
            display_gate: RateGate::new(config.display.refresh_ms),
            heartbeat,
            filter,
            resin,
            fan,
            pulse: PulseGenerator::new(config.pulse.base, config.pulse.gamma),
            screen: Screen::new(),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &GloveConfig {
        &self.config
    }

    /// Composed display contents
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Mutable access for rendering
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Text scroller state
    pub fn scroller(&self) -> &Scroller {
        &self.scroller
    }

    /// Resin count, when the glove has a resin counter
    pub fn resin_count(&self) -> Option<u8> {
        self.resin.as_ref().map(|r| r.inner.count())
    }

    /// Filtered PWM value in [0, 1], when the glove has a breathing LED
    pub fn filter_value(&self) -> Option<f32> {
        self.filter.as_ref().map(|f| f.inner.value())
    }

    /// Current heart states, when the glove has hearts
    pub fn indicators(&self) -> Option<IndicatorStates> {
        self.heartbeat.as_ref().map(|h| h.inner.states())
    }

    /// Run one control-loop tick at `now_ms`
    pub fn tick<R: RandomSource>(&mut self, now_ms: u32, rng: &mut R) -> TickOutputs {
        let uptime = Uptime::from_ms(now_ms);

        // Heartbeat
        if let Some(heart) = self.heartbeat.as_mut() {
            if heart.gate.poll(now_ms).is_some() {
                heart.inner.beat(now_ms);
            }
        }
        let indicators = self.indicators();

        // Breathing LED
        let half_period_s = self.config.filter.half_period_s;
        let max_level = self.config.filter.max_level;
        let pwm_level = self.filter.as_mut().and_then(|filter| {
            let dt_ms = filter.gate.poll(now_ms)?;
            let target = square_target(uptime.second(), half_period_s);
            filter.inner.step(target, dt_ms as f32 / 1000.0);
            Some(filter.inner.level(max_level))
        });

        // Resin
        let resin_changed = self.resin.as_mut().is_some_and(|resin| {
            resin
                .gate
                .poll(now_ms)
                .is_some_and(|dt_ms| resin.inner.update(dt_ms as f32 / 1000.0, rng))
        });

        // Display and scroller
        let screen_updated = self.display_gate.poll(now_ms).is_some();
        if screen_updated {
            self.compose_status(uptime);
            let lines = self.scroller.advance();
            for (row, line) in (SCROLL_FIRST_ROW..SCREEN_ROWS).zip(lines.iter()) {
                self.screen.set_line(row, line);
            }
        }

        // Finger colors
        let pixels = match self.config.pixels.source {
            PixelSource::Off => [DARK; FINGER_COUNT],
            PixelSource::Heartbeat => {
                [indicators.unwrap_or(IndicatorStates::OFF).to_rgbw(); FINGER_COUNT]
            }
            PixelSource::Pulse => self.pulse.pixels(cycle_time(now_ms)),
        };

        TickOutputs {
            indicators,
            fan: self.fan.map(|fan| fan.is_on(now_ms)),
            pwm_level,
            pixels,
            screen_updated,
            resin_changed,
        }
    }

    /// Compose the splash shown while the glove boots
    pub fn compose_boot(&mut self) {
        self.screen.clear();
        self.screen.set_line(0, &self.config.display.header);
        let label = match self.config.kind {
            GloveKind::Left => "LEFT GAUNTLET",
            GloveKind::Right => "RIGHT GAUNTLET",
        };
        self.screen.set_line(2, label);
        self.screen.set_line(3, "LINKING...");
    }

    /// Compose the header and uptime rows, clearing the rest
    pub fn compose_status(&mut self, uptime: Uptime) {
        self.screen.clear();
        let header = self.header_line();
        self.screen.set_line(0, &header);
        if self.config.display.resin_icon && self.resin.is_some() {
            self.screen.set_icon(0, icons::RESIN);
        }
        self.screen.set_line(1, &uptime.listen_line());
    }

    /// Header text; the screen truncates it to what fits beside the icon
    fn header_line(&self) -> String<{ 2 * SCREEN_COLS }> {
        let mut line = String::new();
        match self.resin_count() {
            Some(count) if self.config.display.resin_icon => {
                let _ = write!(line, "{:02} {}", count, self.config.display.header);
            }
            _ => {
                let _ = line.push_str(&self.config.display.header);
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::XorShift32;
    use grabbity_hal::rgbw;

    const LOG: &str = "ALPHA\nBRAVO\nCHARLIE\nDELTA\n";

    struct Always(u32);

    impl RandomSource for Always {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
    }

    fn right() -> Glove {
        Glove::new(GloveConfig::right(), LOG)
    }

    fn left() -> Glove {
        Glove::new(GloveConfig::left(), LOG)
    }

    #[test]
    fn test_right_display_refresh_every_two_seconds() {
        let mut glove = right();
        let mut rng = XorShift32::new(1);
        let mut refreshes = 0;
        for tick in 1..=60u32 {
            if glove.tick(tick * 100, &mut rng).screen_updated {
                refreshes += 1;
            }
        }
        // 6 s of ticks: refreshes at 2 s, 4 s and 6 s
        assert_eq!(refreshes, 3);
    }

    #[test]
    fn test_right_screen_contents() {
        let mut glove = right();
        let mut rng = XorShift32::new(1);
        let out = glove.tick(3_723_000, &mut rng);
        assert!(out.screen_updated);

        let screen = glove.screen();
        assert_eq!(screen.get_line(0), Some("OVERWATCH 711.1MHZ"));
        assert_eq!(screen.get_line(1), Some("LISTEN [01:02:03]"));
        assert_eq!(screen.get_line(2), Some(">ALPHA"));
        assert_eq!(screen.get_line(3), Some(">BRAVO"));
        assert!(screen.icon().is_none());

        // One-line advance: next refresh starts at BRAVO
        glove.tick(3_725_000, &mut rng);
        assert_eq!(glove.screen().get_line(2), Some(">BRAVO"));
        assert_eq!(glove.screen().get_line(3), Some(">CHARLIE"));
    }

    #[test]
    fn test_right_outputs() {
        let mut glove = right();
        let mut rng = XorShift32::new(1);
        let out = glove.tick(100, &mut rng);
        assert_eq!(out.indicators, None);
        assert_eq!(out.fan, None);
        assert!(out.pwm_level.is_some());
        assert!(!out.resin_changed);
        assert_eq!(glove.resin_count(), None);
        // Pulsing fingers are lit and differ from each other
        assert_ne!(out.pixels[0], DARK);
        assert_ne!(out.pixels[0], out.pixels[1]);
    }

    #[test]
    fn test_breathing_follows_square_wave() {
        let mut glove = right();
        let mut rng = XorShift32::new(1);

        // Seconds 2-3 drive the target high
        let mut level = 0;
        for tick in 20..40u32 {
            level = glove.tick(tick * 100, &mut rng).pwm_level.unwrap();
        }
        let high = glove.filter_value().unwrap();
        assert!(high > 0.9);
        assert!(level > 90);

        // Seconds 4-5 drive it back down
        for tick in 40..60u32 {
            glove.tick(tick * 100, &mut rng);
        }
        assert!(glove.filter_value().unwrap() < 0.1);
    }

    #[test]
    fn test_left_window_advance_and_resin_header() {
        let mut glove = left();
        // Draws of 0 always increment
        let mut rng = Always(0);

        glove.tick(200, &mut rng);
        assert_eq!(glove.resin_count(), Some(1));
        let screen = glove.screen();
        // The icon pushes the header right, so it loses one more column
        assert_eq!(screen.get_line(0), Some("01 OVERWATCH 711.1M"));
        assert_eq!(screen.icon().map(|icon| icon.row), Some(0));
        assert_eq!(screen.get_line(2), Some(">ALPHA"));
        assert_eq!(screen.get_line(3), Some(">BRAVO"));

        let out = glove.tick(400, &mut rng);
        assert!(out.resin_changed);
        assert_eq!(glove.screen().get_line(2), Some(">CHARLIE"));
        assert_eq!(glove.screen().get_line(3), Some(">DELTA"));
    }

    #[test]
    fn test_left_resin_never_moves_with_high_draws() {
        let mut glove = left();
        let mut rng = Always(u32::MAX);
        for tick in 1..=100u32 {
            assert!(!glove.tick(tick * 200, &mut rng).resin_changed);
        }
        assert_eq!(glove.resin_count(), Some(0));
    }

    #[test]
    fn test_left_hearts_fan_and_fingers() {
        let mut glove = left();
        let mut rng = XorShift32::new(5);

        // Before the first beat the hearts are dark
        let out = glove.tick(200, &mut rng);
        assert_eq!(out.indicators, Some(IndicatorStates::OFF));
        assert_eq!(out.fan, Some(true));
        assert_eq!(out.pwm_level, None);

        // Second 50: hearts A and B
        let out = glove.tick(50_000, &mut rng);
        assert_eq!(
            out.indicators,
            Some(IndicatorStates {
                a: true,
                b: true,
                c: false
            })
        );
        assert_eq!(out.fan, Some(true));
        assert_eq!(out.pixels, [rgbw(255, 255, 0, 0); 2]);

        let out = glove.tick(51_000, &mut rng);
        assert_eq!(out.fan, Some(false));
    }

    #[test]
    fn test_boot_screen() {
        let mut glove = left();
        glove.compose_boot();
        assert_eq!(glove.screen().get_line(0), Some("OVERWATCH 711.1MHZ"));
        assert_eq!(glove.screen().get_line(2), Some("LEFT GAUNTLET"));
        assert!(glove.screen().is_dirty());
    }

    #[test]
    fn test_pixels_off() {
        let mut config = GloveConfig::right();
        config.pixels.source = PixelSource::Off;
        let mut glove = Glove::new(config, LOG);
        let out = glove.tick(100, &mut XorShift32::new(1));
        assert_eq!(out.pixels, [DARK; 2]);
    }
}
