//! Resin counter
//!
//! A two-digit counter that creeps upward at random. Each update draws a
//! uniform number and increments with probability proportional to the
//! time since the previous update, so the long-run rate does not depend
//! on how often the counter is polled.

use grabbity_hal::RandomSource;

/// The count wraps back to 0 when it reaches this value
pub const RESIN_WRAP: u8 = 100;

/// Randomly incrementing two-digit counter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResinCounter {
    count: u8,
    /// Expected increments per second
    rate_per_second: f32,
}

impl ResinCounter {
    /// Create a counter at 0
    pub const fn new(rate_per_second: f32) -> Self {
        Self {
            count: 0,
            rate_per_second,
        }
    }

    /// Current count, always below [`RESIN_WRAP`]
    pub const fn count(&self) -> u8 {
        self.count
    }

    /// Increment probability for an update covering `dt_s` seconds
    pub fn probability(&self, dt_s: f32) -> f32 {
        (dt_s * self.rate_per_second).clamp(0.0, 1.0)
    }

    /// Force one increment
    pub fn increment(&mut self) {
        self.count = (self.count + 1) % RESIN_WRAP;
    }

    /// Run one update; returns true when the count changed
    pub fn update<R: RandomSource>(&mut self, dt_s: f32, rng: &mut R) -> bool {
        let p = self.probability(dt_s);
        if rng.next_unit() < p {
            self.increment();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::XorShift32;

    struct Fixed(u32);

    impl RandomSource for Fixed {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_wraps_at_hundred() {
        let mut resin = ResinCounter::new(0.0);
        for _ in 0..99 {
            resin.increment();
        }
        assert_eq!(resin.count(), 99);
        resin.increment();
        assert_eq!(resin.count(), 0);
    }

    #[test]
    fn test_probability() {
        let resin = ResinCounter::new(1.0 / 300.0);
        assert!((resin.probability(0.2) - 0.2 / 300.0).abs() < 1e-7);
        assert_eq!(resin.probability(-1.0), 0.0);
        assert_eq!(ResinCounter::new(10.0).probability(1.0), 1.0);
    }

    #[test]
    fn test_draw_decides_increment() {
        let mut resin = ResinCounter::new(0.5);
        // Draw of 0.0 is below p = 0.5
        assert!(resin.update(1.0, &mut Fixed(0)));
        assert_eq!(resin.count(), 1);
        // Draw just under 1.0 is not
        assert!(!resin.update(1.0, &mut Fixed(u32::MAX)));
        assert_eq!(resin.count(), 1);
    }

    #[test]
    fn test_zero_rate_never_increments() {
        let mut resin = ResinCounter::new(0.0);
        let mut rng = XorShift32::new(7);
        for _ in 0..10_000 {
            assert!(!resin.update(0.2, &mut rng));
        }
        assert_eq!(resin.count(), 0);
    }

    #[test]
    fn test_long_run_rate() {
        // 100k updates of 0.2 s at 1/300 per second: expect about 66.7 hits
        let mut resin = ResinCounter::new(1.0 / 300.0);
        let mut rng = XorShift32::new(0xC0FF_EE11);
        let hits = (0..100_000).filter(|_| resin.update(0.2, &mut rng)).count();
        assert!((40..=95).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn test_rate_independent_of_interval() {
        // Same 20,000 s of simulated time polled at two rates
        let mut fast = ResinCounter::new(0.01);
        let mut slow = ResinCounter::new(0.01);
        let mut rng = XorShift32::new(99);

        let fast_hits = (0..100_000).filter(|_| fast.update(0.2, &mut rng)).count();
        let slow_hits = (0..20_000).filter(|_| slow.update(1.0, &mut rng)).count();

        // Both expect 200 increments
        assert!((150..=250).contains(&fast_hits), "fast = {fast_hits}");
        assert!((150..=250).contains(&slow_hits), "slow = {slow_hits}");
    }
}
