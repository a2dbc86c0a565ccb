//! Heart indicator state machine
//!
//! Three heart LEDs (A, B, C) show a simple pattern. Two policies exist:
//! a free-running phase counter that steps once per beat, and a
//! wall-clock pattern that drops hearts as the minute runs out.

use grabbity_hal::pixel::{rgbw, Rgbw};

use crate::uptime::Uptime;

/// Number of phases in the free-running cycle
pub const PHASE_COUNT: u8 = 4;

/// Indicator pattern source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeartbeatPolicy {
    /// Phase counter stepping once per beat, one heart lit at a time
    FreeRunning,
    /// Hearts derived from the second within the current minute
    #[default]
    WallClock,
}

/// On/off state of the three heart indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorStates {
    pub a: bool,
    pub b: bool,
    pub c: bool,
}

impl IndicatorStates {
    /// All hearts dark
    pub const OFF: Self = Self {
        a: false,
        b: false,
        c: false,
    };

    /// Number of lit hearts
    pub fn lit(&self) -> u8 {
        self.a as u8 + self.b as u8 + self.c as u8
    }

    /// Finger color mirroring the hearts: A red, B green, C blue
    pub const fn to_rgbw(&self) -> Rgbw {
        rgbw(
            if self.a { 255 } else { 0 },
            if self.b { 255 } else { 0 },
            if self.c { 255 } else { 0 },
            0,
        )
    }
}

/// Heartbeat state machine
#[derive(Debug, Clone)]
pub struct Heartbeat {
    policy: HeartbeatPolicy,
    phase: u8,
    states: IndicatorStates,
}

impl Heartbeat {
    /// Create a heartbeat with all hearts dark and the phase at 0
    pub const fn new(policy: HeartbeatPolicy) -> Self {
        Self {
            policy,
            phase: 0,
            states: IndicatorStates::OFF,
        }
    }

    /// Current free-running phase (stays 0 under the wall-clock policy)
    pub const fn phase(&self) -> u8 {
        self.phase
    }

    /// Last computed indicator states
    pub const fn states(&self) -> IndicatorStates {
        self.states
    }

    /// Advance one beat and return the new indicator states
    pub fn beat(&mut self, now_ms: u32) -> IndicatorStates {
        self.states = match self.policy {
            HeartbeatPolicy::FreeRunning => {
                self.phase = (self.phase + 1) % PHASE_COUNT;
                Self::free_running(self.phase)
            }
            HeartbeatPolicy::WallClock => Self::wall_clock(Uptime::from_ms(now_ms).second()),
        };
        self.states
    }

    /// Pattern for a free-running phase: heart `phase` lit, none at 0
    pub const fn free_running(phase: u8) -> IndicatorStates {
        IndicatorStates {
            a: phase == 1,
            b: phase == 2,
            c: phase == 3,
        }
    }

    /// Pattern for a second within the minute
    pub const fn wall_clock(second: u8) -> IndicatorStates {
        IndicatorStates {
            a: true,
            b: second < 55,
            c: second < 45,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_running_cycle() {
        let mut heart = Heartbeat::new(HeartbeatPolicy::FreeRunning);
        let expected = [
            (1, true, false, false),
            (2, false, true, false),
            (3, false, false, true),
            (0, false, false, false),
            (1, true, false, false),
        ];
        for (phase, a, b, c) in expected {
            let states = heart.beat(0);
            assert_eq!(heart.phase(), phase);
            assert_eq!(states, IndicatorStates { a, b, c });
        }
    }

    #[test]
    fn test_free_running_ignores_clock() {
        let mut heart = Heartbeat::new(HeartbeatPolicy::FreeRunning);
        heart.beat(59_000);
        assert_eq!(heart.phase(), 1);
    }

    #[test]
    fn test_wall_clock_pattern() {
        let mut heart = Heartbeat::new(HeartbeatPolicy::WallClock);

        let s = heart.beat(44_000);
        assert_eq!(s, IndicatorStates { a: true, b: true, c: true });

        let s = heart.beat(50_000);
        assert_eq!(s, IndicatorStates { a: true, b: true, c: false });

        let s = heart.beat(56_000);
        assert_eq!(s, IndicatorStates { a: true, b: false, c: false });

        // Next minute starts over
        let s = heart.beat(61_000);
        assert_eq!(s.lit(), 3);
        assert_eq!(heart.phase(), 0);
    }

    #[test]
    fn test_boundaries() {
        assert!(Heartbeat::wall_clock(44).c);
        assert!(!Heartbeat::wall_clock(45).c);
        assert!(Heartbeat::wall_clock(54).b);
        assert!(!Heartbeat::wall_clock(55).b);
    }

    #[test]
    fn test_pixel_color() {
        let color = Heartbeat::free_running(2).to_rgbw();
        assert_eq!(color, rgbw(0, 255, 0, 0));
        assert_eq!(IndicatorStates::OFF.to_rgbw(), rgbw(0, 0, 0, 0));
    }
}
