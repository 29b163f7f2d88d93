//! `shop-sim`: the shop aggregate and its step loop.
//!
//! # Step order
//!
//! ```text
//! FrameScheduler::on_frame(ts)            (0..=max_steps_per_frame times)
//!   advance(dt):
//!     ① Subsystems: Subsystem::tick for each, in registration order
//!                    (the demo registers production, then business).
//!     ② Lanes:      queue-in, queue-leave, then conveyors in creation
//!                    order; each lane front-to-back over a snapshot.
//!     ③ Patience:   customers still queueing accumulate dt; first expiry
//!                    raises PatienceExpired.
//!     ④ Dispatch:   the step's ShopEvents go, in order, to every
//!                    Subsystem::on_event (which may mutate the shop), then
//!                    to the SimObserver.  PatienceExpired is skipped
//!                    once the customer has left the entering queue.
//!   stall guard tripped → ShopEvent::Panic dispatched the same way.
//! ```
//!
//! Events are dispatched after the lane pass, so handlers may reparent and
//! destroy entities without disturbing iteration.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use shop_core::ShopConfig;
//! use shop_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(ShopConfig::default())
//!     .conveyor()
//!     .subsystem(MyServiceDesk::default())
//!     .build()?;
//! sim.on_frame(now_ms, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod observer;
pub mod shop;
pub mod sim;
pub mod subsystem;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{ShopError, ShopResult, SimError, SimResult};
pub use event::ShopEvent;
pub use observer::{NoopObserver, SimObserver};
pub use shop::Shop;
pub use sim::Sim;
pub use subsystem::{NoopSubsystem, StepContext, Subsystem};
