//! Random number source

/// Uniform random draws
pub trait RandomSource {
    /// Next uniformly distributed 32-bit value
    fn next_u32(&mut self) -> u32;

    /// Next uniformly distributed value in `[0, 1)`
    ///
    /// Uses the top 24 bits so every result is exactly representable
    /// as an `f32`.
    fn next_unit(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u32);

    impl RandomSource for Fixed {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_unit_range() {
        assert_eq!(Fixed(0).next_unit(), 0.0);
        assert_eq!(Fixed(0xFF).next_unit(), 0.0);

        // Largest draw stays below 1.0
        let top = Fixed(u32::MAX).next_unit();
        assert!(top < 1.0);
        assert!(top > 0.999_999);

        assert_eq!(Fixed(0x8000_0000).next_unit(), 0.5);
    }
}
