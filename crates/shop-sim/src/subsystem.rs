//! Collaborators that run inside the step loop.

use shop_core::Tick;

use crate::{Shop, ShopEvent};

/// Per-step facts handed to every [`Subsystem`] call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepContext {
    /// The step being processed.
    pub tick: Tick,
    /// Simulated milliseconds covered by this step.
    pub dt_ms: f64,
}

/// An external collaborator: production, accounting, a service desk.
///
/// Subsystems get the per-step hook and every [`ShopEvent`] of the step,
/// with mutable access to the shop in both.  Both methods default to no-ops.
///
/// # Example
///
/// ```rust,ignore
/// struct Greeter;
///
/// impl Subsystem for Greeter {
///     fn name(&self) -> &str { "greeter" }
///
///     fn on_event(&mut self, event: &ShopEvent, _ctx: &StepContext, shop: &mut Shop) {
///         if let ShopEvent::CustomerLeft(id) = *event {
///             let _ = shop.destroy(id);
///         }
///     }
/// }
/// ```
pub trait Subsystem {
    /// Short label used in traces.
    fn name(&self) -> &str;

    /// Called once per step, before the lanes move.
    fn tick(&mut self, _ctx: &StepContext, _shop: &mut Shop) {}

    /// Called for each event of the step, after all lanes moved.
    fn on_event(&mut self, _event: &ShopEvent, _ctx: &StepContext, _shop: &mut Shop) {}
}

/// A [`Subsystem`] that does nothing.
pub struct NoopSubsystem;

impl Subsystem for NoopSubsystem {
    fn name(&self) -> &str {
        "noop"
    }
}
