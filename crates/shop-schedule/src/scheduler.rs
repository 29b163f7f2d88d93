//! The frame scheduler.

use shop_core::ShopConfig;
use shop_core::time::BASE_STEPS_PER_SEC;

use crate::{ScheduleError, ScheduleResult};

/// Whatever the scheduler drives.  `advance` runs one simulation step of
/// `dt_ms` simulated milliseconds.
pub trait Advance {
    fn advance(&mut self, dt_ms: f64);

    /// Called once when a frame hits the stall guard, after its steps ran.
    fn on_stall(&mut self, _panic: &StallPanic) {}
}

/// Diagnostic record of a stall: the backlog that was thrown away.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StallPanic {
    /// Steps that ran before the guard tripped.
    pub steps_run: u32,
    /// Accumulated milliseconds discarded by resetting the accumulator.
    pub discarded_ms: f64,
}

/// Result of one [`FrameScheduler::on_frame`] call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Less than one step interval since the last processed frame.
    Dropped,
    /// The frame was processed.  `steps` counts drained step intervals;
    /// while paused none of them reached `advance`.
    Ran {
        steps: u32,
        panic: Option<StallPanic>,
    },
}

impl FrameOutcome {
    pub fn steps(&self) -> u32 {
        match *self {
            FrameOutcome::Dropped => 0,
            FrameOutcome::Ran { steps, .. } => steps,
        }
    }

    pub fn panicked(&self) -> bool {
        matches!(self, FrameOutcome::Ran { panic: Some(_), .. })
    }
}

/// Running totals, for diagnostics and tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames that were processed (not dropped).
    pub frames: u64,
    pub dropped_frames: u64,
    /// Steps driven by the scheduler: frame steps plus the forced unpause step.
    pub advances: u64,
    pub panics: u64,
}

/// Fixed-timestep accumulator.
///
/// States are {running, paused} × {draining, idle}; draining only ever
/// happens inside `on_frame`, so from the outside the scheduler is always
/// idle.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    speed:               f64,
    max_steps_per_frame: u32,
    /// Real milliseconds not yet converted into steps.
    delta_ms:            f64,
    last_frame_ms:       f64,
    paused:              bool,
    stats:               FrameStats,
}

impl FrameScheduler {
    pub fn new(speed: f64, max_steps_per_frame: u32) -> ScheduleResult<Self> {
        check_speed(speed)?;
        if max_steps_per_frame == 0 {
            return Err(ScheduleError::ZeroStepBound);
        }
        Ok(Self {
            speed,
            max_steps_per_frame,
            delta_ms:      0.0,
            last_frame_ms: 0.0,
            paused:        false,
            stats:         FrameStats::default(),
        })
    }

    pub fn from_config(config: &ShopConfig) -> ScheduleResult<Self> {
        Self::new(config.speed, config.max_steps_per_frame)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Simulated milliseconds per step: `(1000/60) / speed`.
    #[inline]
    pub fn step_interval_ms(&self) -> f64 {
        (1000.0 / BASE_STEPS_PER_SEC) / self.speed
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    #[inline]
    pub fn last_frame_ms(&self) -> f64 {
        self.last_frame_ms
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    // ── Frame processing ──────────────────────────────────────────────────

    /// Process one display callback at `timestamp_ms`.  Non-finite
    /// timestamps are dropped.
    pub fn on_frame<A: Advance + ?Sized>(&mut self, timestamp_ms: f64, target: &mut A) -> FrameOutcome {
        if !timestamp_ms.is_finite() {
            tracing::warn!(timestamp_ms, "non-finite frame timestamp dropped");
            self.stats.dropped_frames += 1;
            return FrameOutcome::Dropped;
        }
        let interval = self.step_interval_ms();
        if timestamp_ms < self.last_frame_ms + interval {
            self.stats.dropped_frames += 1;
            return FrameOutcome::Dropped;
        }

        self.delta_ms += timestamp_ms - self.last_frame_ms;
        self.last_frame_ms = timestamp_ms;
        self.stats.frames += 1;

        let mut steps = 0u32;
        let mut panic = None;
        while self.delta_ms >= interval {
            if steps == self.max_steps_per_frame {
                let record = StallPanic { steps_run: steps, discarded_ms: self.delta_ms };
                tracing::warn!(
                    steps = steps,
                    discarded_ms = record.discarded_ms,
                    "panic: frame backlog exceeds step bound, discarding"
                );
                self.delta_ms = 0.0;
                self.stats.panics += 1;
                target.on_stall(&record);
                panic = Some(record);
                break;
            }
            self.step(interval, target);
            self.delta_ms -= interval;
            steps += 1;
        }

        tracing::trace!(timestamp_ms, steps, delta_ms = self.delta_ms, "frame");
        FrameOutcome::Ran { steps, panic }
    }

    fn step<A: Advance + ?Sized>(&mut self, dt_ms: f64, target: &mut A) {
        if self.paused {
            return;
        }
        self.stats.advances += 1;
        target.advance(dt_ms);
    }

    // ── Pause control ─────────────────────────────────────────────────────

    /// Stop advancing.  Returns `false` if already paused.
    pub fn pause(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.paused = true;
        tracing::info!("simulation paused");
        true
    }

    /// Resume and force exactly one advance.  A no-op returning `false` when
    /// already running.
    pub fn unpause<A: Advance + ?Sized>(&mut self, target: &mut A) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        tracing::info!("simulation resumed");
        self.stats.advances += 1;
        target.advance(self.step_interval_ms());
        true
    }

    // ── Reconfiguration ───────────────────────────────────────────────────

    /// Change the step multiplier.  Backlog already accumulated is kept and
    /// drained at the new interval.
    pub fn set_speed(&mut self, speed: f64) -> ScheduleResult<()> {
        check_speed(speed)?;
        tracing::info!(from = self.speed, to = speed, "speed changed");
        self.speed = speed;
        Ok(())
    }

    /// Re-anchor the frame clock at `timestamp_ms` and drop any backlog, e.g.
    /// when the host clock restarts or the frame source is swapped.
    pub fn reset_clock(&mut self, timestamp_ms: f64) {
        self.last_frame_ms = timestamp_ms;
        self.delta_ms = 0.0;
    }
}

fn check_speed(speed: f64) -> ScheduleResult<()> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(ScheduleError::InvalidSpeed(speed))
    }
}
