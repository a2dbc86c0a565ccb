//! Milliseconds since boot

use embassy_time::Instant;
use grabbity_hal::Clock;

/// Clock counting from the moment it was created
pub struct EmbassyClock {
    start: Instant,
}

impl EmbassyClock {
    /// Start counting now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Start counting from the timer's zero point
    pub fn since_boot() -> Self {
        Self {
            start: Instant::from_ticks(0),
        }
    }
}

impl Default for EmbassyClock {
    fn default() -> Self {
        Self::since_boot()
    }
}

impl Clock for EmbassyClock {
    fn elapsed_ms(&self) -> u32 {
        // Truncation wraps like the u32 millisecond counter users expect
        self.start.elapsed().as_millis() as u32
    }
}
