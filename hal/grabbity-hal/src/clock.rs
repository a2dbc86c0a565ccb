//! Time source

/// Monotonic milliseconds since boot
///
/// The counter wraps at `u32::MAX` (about 49.7 days). Consumers compare
/// timestamps with `wrapping_sub`.
pub trait Clock {
    /// Milliseconds elapsed since boot
    fn elapsed_ms(&self) -> u32;
}
