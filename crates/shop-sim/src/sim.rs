//! The `Sim` struct and its step loop.

use shop_schedule::{Advance, FrameOutcome, FrameScheduler, FrameStats, StallPanic};

use crate::{Shop, ShopEvent, SimObserver, SimResult, StepContext, Subsystem};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Owns the [`FrameScheduler`], the [`Shop`] and the registered
/// [`Subsystem`]s.  The host calls [`on_frame`][Self::on_frame] from its
/// display callback; each step it produces runs the four-phase loop
/// documented at the crate root.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    scheduler:  FrameScheduler,
    shop:       Shop,
    subsystems: Vec<Box<dyn Subsystem>>,
}

impl Sim {
    pub(crate) fn new(scheduler: FrameScheduler, shop: Shop, subsystems: Vec<Box<dyn Subsystem>>) -> Self {
        Self { scheduler, shop, subsystems }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Feed one display callback at `timestamp_ms` to the scheduler.
    pub fn on_frame<O: SimObserver>(&mut self, timestamp_ms: f64, observer: &mut O) -> FrameOutcome {
        let mut driver = Driver {
            shop:       &mut self.shop,
            subsystems: &mut self.subsystems,
            observer,
        };
        self.scheduler.on_frame(timestamp_ms, &mut driver)
    }

    /// Run one step of `dt_ms` directly, bypassing the frame clock.  Skipped
    /// while paused; returns whether the step ran.
    pub fn advance<O: SimObserver>(&mut self, dt_ms: f64, observer: &mut O) -> bool {
        if self.scheduler.is_paused() {
            return false;
        }
        step(&mut self.shop, &mut self.subsystems, observer, dt_ms);
        true
    }

    /// Run `n` steps of one step interval each.  Returns the number that ran
    /// (zero while paused).
    ///
    /// Useful for tests and headless runs.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> u64 {
        let dt = self.scheduler.step_interval_ms();
        (0..n).filter(|_| self.advance(dt, observer)).count() as u64
    }

    /// Stop advancing.  Returns `false` if already paused.
    pub fn pause(&mut self) -> bool {
        self.scheduler.pause()
    }

    /// Resume and run exactly one forced step.  A no-op returning `false`
    /// when already running.
    pub fn unpause<O: SimObserver>(&mut self, observer: &mut O) -> bool {
        let mut driver = Driver {
            shop:       &mut self.shop,
            subsystems: &mut self.subsystems,
            observer,
        };
        self.scheduler.unpause(&mut driver)
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    pub fn set_speed(&mut self, speed: f64) -> SimResult<()> {
        self.scheduler.set_speed(speed)?;
        Ok(())
    }

    /// Re-anchor the frame clock without producing steps.
    pub fn reset_clock(&mut self, timestamp_ms: f64) {
        self.scheduler.reset_clock(timestamp_ms);
    }

    /// Signal the observer that the host stopped driving the simulation.
    pub fn finish<O: SimObserver>(&mut self, observer: &mut O) {
        observer.on_finish(self.shop.clock().current_tick);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    /// Mutable shop access for host-side actions between frames (spawning,
    /// player-driven service).
    #[inline]
    pub fn shop_mut(&mut self) -> &mut Shop {
        &mut self.shop
    }

    #[inline]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Scheduler totals.  Steps run through [`advance`][Self::advance] or
    /// [`run_steps`][Self::run_steps] bypass the scheduler and are not counted.
    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.scheduler.stats()
    }

    /// Names of the registered subsystems, in dispatch order.
    pub fn subsystem_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.subsystems.iter().map(|s| s.name())
    }
}

// ── Step driver ───────────────────────────────────────────────────────────────

/// Borrowed view of the sim handed to the scheduler for one frame.
struct Driver<'a, O: SimObserver> {
    shop:       &'a mut Shop,
    subsystems: &'a mut Vec<Box<dyn Subsystem>>,
    observer:   &'a mut O,
}

impl<O: SimObserver> Advance for Driver<'_, O> {
    fn advance(&mut self, dt_ms: f64) {
        step(self.shop, self.subsystems, self.observer, dt_ms);
    }

    fn on_stall(&mut self, panic: &StallPanic) {
        let ctx = StepContext { tick: self.shop.clock().current_tick, dt_ms: 0.0 };
        let event = ShopEvent::Panic {
            steps_run:    panic.steps_run,
            discarded_ms: panic.discarded_ms,
        };
        dispatch(&event, &ctx, self.shop, self.subsystems, self.observer);
    }
}

fn step<O: SimObserver>(
    shop:       &mut Shop,
    subsystems: &mut [Box<dyn Subsystem>],
    observer:   &mut O,
    dt_ms:      f64,
) {
    let tick = shop.clock().current_tick;
    let ctx = StepContext { tick, dt_ms };
    observer.on_step_start(tick);

    // ── Phase 1: per-step hooks ───────────────────────────────────────────
    for subsystem in subsystems.iter_mut() {
        subsystem.tick(&ctx, shop);
    }

    // ── Phases 2–3: lanes and patience ────────────────────────────────────
    let events = shop.tick(dt_ms);

    // ── Phase 4: dispatch ─────────────────────────────────────────────────
    for event in &events {
        // An earlier handler this step may already have sent the customer home.
        if let ShopEvent::PatienceExpired(id) = *event {
            if !shop.is_queueing(id) {
                continue;
            }
        }
        dispatch(event, &ctx, shop, subsystems, observer);
    }

    observer.on_step_end(tick, shop);
}

fn dispatch<O: SimObserver>(
    event:      &ShopEvent,
    ctx:        &StepContext,
    shop:       &mut Shop,
    subsystems: &mut [Box<dyn Subsystem>],
    observer:   &mut O,
) {
    for subsystem in subsystems.iter_mut() {
        subsystem.on_event(event, ctx, shop);
    }
    observer.on_event(ctx.tick, event);
}
