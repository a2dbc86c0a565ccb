//! Deterministic pseudo-random source

use grabbity_hal::RandomSource;

/// Marsaglia xorshift32 generator
///
/// Small and fast enough to draw once per tick. A zero state would lock the
/// generator at zero, so a zero seed is replaced with a fixed constant.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    const FALLBACK_SEED: u32 = 0x9E37_79B9;

    /// Create a generator from a seed
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }
}

impl RandomSource for XorShift32 {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sequence() {
        let mut rng = XorShift32::new(1);
        assert_eq!(rng.next_u32(), 270_369);
        assert_eq!(rng.next_u32(), 67_634_689);
    }

    #[test]
    fn test_zero_seed_does_not_stick() {
        let mut rng = XorShift32::new(0);
        assert_ne!(rng.next_u32(), 0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_unit_draws_are_roughly_uniform() {
        let mut rng = XorShift32::new(0x1234_5678);
        let n = 100_000;
        let below_half = (0..n).filter(|_| rng.next_unit() < 0.5).count();
        let ratio = below_half as f32 / n as f32;
        assert!((ratio - 0.5).abs() < 0.01);
    }
}
