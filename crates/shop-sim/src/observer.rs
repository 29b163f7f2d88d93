//! Simulation observer trait for progress reporting and data collection.

use shop_core::Tick;

use crate::{Shop, ShopEvent};

/// Read-only callbacks invoked by [`Sim`][crate::Sim] around every step.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers see events after every
/// [`Subsystem`][crate::Subsystem] has handled them.
///
/// # Example: event printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_event(&mut self, tick: Tick, event: &ShopEvent) {
///         println!("{tick}: {event}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the step's subsystems run.
    fn on_step_start(&mut self, _tick: Tick) {}

    /// Called once per event, in emission order.
    fn on_event(&mut self, _tick: Tick, _event: &ShopEvent) {}

    /// Called after the step's events were dispatched.  The shop is in its
    /// settled end-of-step state.
    fn on_step_end(&mut self, _tick: Tick, _shop: &Shop) {}

    /// Called by [`Sim::finish`][crate::Sim::finish] when the host stops
    /// driving the simulation.
    fn on_finish(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
