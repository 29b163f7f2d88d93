//! Injectable randomness for queue spacing.
//!
//! Queued customers keep a gap to the customer ahead that is re-drawn every
//! step, so the line never looks perfectly uniform.  The movement code only
//! sees the [`GapSource`] trait: the simulation plugs in a seeded
//! [`SpacingRng`], tests plug in [`FixedGap`] and assert exact positions.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Supplies the per-step spacing gap for jittered lanes.
pub trait GapSource {
    /// A gap in `[0, max)`.  `max <= 0` yields `0`.
    fn gap(&mut self, max: f32) -> f32;
}

// ── SpacingRng ────────────────────────────────────────────────────────────────

/// Seeded RNG drawing whole-unit gaps.
///
/// The same seed always produces the same queue layout.
pub struct SpacingRng(SmallRng);

impl SpacingRng {
    pub fn new(seed: u64) -> Self {
        SpacingRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for collaborators that need other draws
    /// (e.g. picking a request) from the same deterministic stream.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

impl GapSource for SpacingRng {
    fn gap(&mut self, max: f32) -> f32 {
        let whole = max.floor() as u32;
        if whole == 0 {
            return 0.0;
        }
        self.0.gen_range(0..whole) as f32
    }
}

// ── FixedGap ──────────────────────────────────────────────────────────────────

/// A [`GapSource`] that always returns the same gap.
///
/// The value is not clamped to `max`; tests pick a gap inside the range they
/// want to assert on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedGap(pub f32);

impl GapSource for FixedGap {
    fn gap(&mut self, _max: f32) -> f32 {
        self.0.max(0.0)
    }
}
