//! Stand-in for a display's frame callback.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Nominal display refresh interval.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Produces monotonically increasing frame timestamps with a little jitter,
/// the way a busy browser or compositor delivers them.
pub struct FrameSource {
    rng:       SmallRng,
    now_ms:    f64,
    jitter_ms: f64,
}

impl FrameSource {
    pub fn new(seed: u64, jitter_ms: f64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            now_ms: 0.0,
            jitter_ms,
        }
    }

    /// Timestamp of the next frame.
    pub fn next_timestamp(&mut self) -> f64 {
        let jitter = if self.jitter_ms > 0.0 {
            self.rng.gen_range(-self.jitter_ms..self.jitter_ms)
        } else {
            0.0
        };
        self.now_ms += (FRAME_MS + jitter).max(1.0);
        self.now_ms
    }

    /// Simulate the host freezing for `ms`: the next frame arrives late.
    pub fn stall(&mut self, ms: f64) {
        self.now_ms += ms;
    }
}
