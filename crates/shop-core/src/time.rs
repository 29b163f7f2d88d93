//! Simulation time model and run configuration.
//!
//! # Design
//!
//! Simulated time advances in fixed-size steps.  A step is
//! `(1000 / 60) / speed` milliseconds, and `Tick` counts the steps that were
//! actually simulated:
//!
//!   elapsed_ms = sum of dt over every advanced step
//!
//! The integer tick is the canonical ordering key for events and traces; the
//! millisecond total is what patience timers compare against.  The two are
//! kept separately because `speed` may change mid-run.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Display refresh rate the step interval is derived from.
pub const BASE_STEPS_PER_SEC: f64 = 60.0;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Steps elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Counts advanced steps and the simulated milliseconds they covered.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepClock {
    /// The current tick, advanced by `StepClock::advance()` each step.
    pub current_tick: Tick,
    /// Total simulated milliseconds.
    pub elapsed_ms: f64,
}

impl StepClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one step of `dt_ms` simulated milliseconds.
    #[inline]
    pub fn advance(&mut self, dt_ms: f64) {
        self.current_tick = Tick(self.current_tick.0 + 1);
        self.elapsed_ms += dt_ms;
    }

    /// Break elapsed time into (minutes, seconds, millis) for log lines.
    pub fn elapsed_msm(&self) -> (u64, u32, u32) {
        let total = self.elapsed_ms.max(0.0) as u64;
        let minutes = total / 60_000;
        let secs = ((total % 60_000) / 1_000) as u32;
        let millis = (total % 1_000) as u32;
        (minutes, secs, millis)
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s, ms) = self.elapsed_msm();
        write!(f, "{} ({}:{:02}.{:03})", self.current_tick, m, s, ms)
    }
}

// ── ShopConfig ────────────────────────────────────────────────────────────────

/// Top-level shop configuration.
///
/// Plain numeric parameters only.  Applications may load it from a TOML file
/// with the `serde` feature enabled; every field has a default so partial
/// files are accepted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShopConfig {
    /// Simulation-step multiplier.  2.0 halves the step interval.
    pub speed: f64,

    /// How long a customer waits in the entering queue before giving up (ms).
    pub patience_ms: f64,

    /// Stall guard: most steps one frame callback may run.
    pub max_steps_per_frame: u32,

    /// Fraction of `base_walk_distance` covered per step.
    pub walk_speed: f32,

    /// Base walking distance in length units.
    pub base_walk_distance: f32,

    /// Fixed gap kept between consecutive products on a conveyor.
    pub product_gap: f32,

    /// Width of a customer for spacing.
    pub customer_extent: f32,

    /// Width of a product for spacing.
    pub product_extent: f32,

    /// Usable length of the entering queue.
    pub queue_length: f32,

    /// Usable length of the exit lane.
    pub leave_length: f32,

    /// Usable length of each product conveyor.
    pub conveyor_length: f32,

    /// Master RNG seed for spacing jitter.
    pub seed: u64,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            speed:               1.0,
            patience_ms:         10_000.0,
            max_steps_per_frame: 240,
            walk_speed:          0.3,
            base_walk_distance:  15.0,
            product_gap:         10.0,
            customer_extent:     32.0,
            product_extent:      16.0,
            queue_length:        400.0,
            leave_length:        200.0,
            conveyor_length:     300.0,
            seed:                0,
        }
    }
}

impl ShopConfig {
    /// Simulated milliseconds per step: `(1000/60) / speed`.
    #[inline]
    pub fn step_interval_ms(&self) -> f64 {
        (1000.0 / BASE_STEPS_PER_SEC) / self.speed
    }

    /// Distance an entity covers per step.
    #[inline]
    pub fn walk_delta(&self) -> f32 {
        self.base_walk_distance * self.walk_speed
    }

    /// Reject values the scheduler or movement rules cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(CoreError::Config(format!("speed must be positive, got {}", self.speed)));
        }
        if self.patience_ms.is_nan() || self.patience_ms < 0.0 {
            return Err(CoreError::Config(format!(
                "patience_ms must be non-negative, got {}",
                self.patience_ms
            )));
        }
        if self.max_steps_per_frame == 0 {
            return Err(CoreError::Config("max_steps_per_frame must be at least 1".into()));
        }
        if self.walk_delta().is_nan() || self.walk_delta() <= 0.0 {
            return Err(CoreError::Config("walk_speed * base_walk_distance must be positive".into()));
        }
        if self.product_gap < 0.0 {
            return Err(CoreError::Config("product_gap must be non-negative".into()));
        }
        for (name, len) in [
            ("customer_extent", self.customer_extent),
            ("product_extent", self.product_extent),
            ("queue_length", self.queue_length),
            ("leave_length", self.leave_length),
            ("conveyor_length", self.conveyor_length),
        ] {
            if len.is_nan() || len <= 0.0 {
                return Err(CoreError::Config(format!("{name} must be positive, got {len}")));
            }
        }
        Ok(())
    }
}
