//! Rate gates and the fan schedule
//!
//! The control loop ticks at a fixed rate; each subsystem decides on its
//! own whether enough time has passed since it last ran.

/// Fires when at least `interval_ms` has passed since it last fired
///
/// Elapsed time uses wrapping arithmetic so the gate keeps working when
/// the millisecond clock rolls over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateGate {
    interval_ms: u32,
    last_ms: u32,
}

impl RateGate {
    /// Create a gate that last fired at boot (t = 0)
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_ms: 0,
        }
    }

    /// Timestamp of the last time the gate fired
    pub const fn last_ms(&self) -> u32 {
        self.last_ms
    }

    /// Check the gate at `now_ms`
    ///
    /// Returns the elapsed milliseconds since the previous firing when the
    /// gate fires, and records `now_ms` as the new reference point.
    pub fn poll(&mut self, now_ms: u32) -> Option<u32> {
        let elapsed = now_ms.wrapping_sub(self.last_ms);
        if elapsed >= self.interval_ms {
            self.last_ms = now_ms;
            Some(elapsed)
        } else {
            None
        }
    }
}

/// Square-wave fan output
///
/// On for one `toggle_ms` period, off for the next, starting on at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FanSchedule {
    toggle_ms: u32,
}

impl FanSchedule {
    /// Create a schedule; a zero period is treated as 1 ms
    pub const fn new(toggle_ms: u32) -> Self {
        Self {
            toggle_ms: if toggle_ms == 0 { 1 } else { toggle_ms },
        }
    }

    /// Whether the fan runs at `now_ms`
    pub const fn is_on(&self, now_ms: u32) -> bool {
        (now_ms / self.toggle_ms) % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_fires_after_interval() {
        let mut gate = RateGate::new(2000);
        assert_eq!(gate.poll(100), None);
        assert_eq!(gate.poll(1999), None);
        assert_eq!(gate.poll(2000), Some(2000));
        assert_eq!(gate.last_ms(), 2000);
        assert_eq!(gate.poll(3000), None);
        assert_eq!(gate.poll(4100), Some(2100));
    }

    #[test]
    fn test_gate_matching_tick_fires_every_tick() {
        let mut gate = RateGate::new(200);
        for tick in 1..10u32 {
            assert_eq!(gate.poll(tick * 200), Some(200));
        }
    }

    #[test]
    fn test_zero_interval_always_fires() {
        let mut gate = RateGate::new(0);
        assert_eq!(gate.poll(0), Some(0));
        assert_eq!(gate.poll(0), Some(0));
        assert_eq!(gate.poll(100), Some(100));
    }

    #[test]
    fn test_gate_survives_clock_wrap() {
        let mut gate = RateGate::new(200);
        assert!(gate.poll(u32::MAX - 99).is_some());
        assert_eq!(gate.poll(50), None);
        assert_eq!(gate.poll(100), Some(200));
    }

    #[test]
    fn test_fan_square_wave() {
        let fan = FanSchedule::new(1000);
        assert!(fan.is_on(0));
        assert!(fan.is_on(999));
        assert!(!fan.is_on(1000));
        assert!(!fan.is_on(1999));
        assert!(fan.is_on(2000));
    }

    #[test]
    fn test_fan_zero_period() {
        let fan = FanSchedule::new(0);
        assert!(fan.is_on(0));
        assert!(!fan.is_on(1));
    }
}
