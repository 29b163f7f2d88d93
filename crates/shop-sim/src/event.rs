//! Lifecycle events collaborators subscribe to.

use std::fmt;

use shop_core::EntityId;

/// Everything the core tells the outside world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShopEvent {
    /// The front customer of the entering queue came to rest.  Service may
    /// begin.
    CustomerStoppedFirstInLine(EntityId),

    /// A customer reached the end of the exit lane.  The customer stays in
    /// the shop until a handler destroys it; the event is not repeated.
    CustomerLeft(EntityId),

    /// The front product of a conveyor came to rest.  Delivery may begin.
    ProductStoppedFirstInLine(EntityId),

    /// A queueing customer ran out of patience.  Emitted once per customer;
    /// whether they leave is up to the handler.
    PatienceExpired(EntityId),

    /// The stall guard discarded backlog instead of fast-forwarding.
    Panic {
        steps_run:    u32,
        discarded_ms: f64,
    },
}

impl ShopEvent {
    /// The entity the event is about, if any.
    pub fn entity(&self) -> Option<EntityId> {
        match *self {
            ShopEvent::CustomerStoppedFirstInLine(id)
            | ShopEvent::CustomerLeft(id)
            | ShopEvent::ProductStoppedFirstInLine(id)
            | ShopEvent::PatienceExpired(id) => Some(id),
            ShopEvent::Panic { .. } => None,
        }
    }

    /// Stable snake_case name, used in traces.
    pub fn name(&self) -> &'static str {
        match self {
            ShopEvent::CustomerStoppedFirstInLine(_) => "customer_stopped_first_in_line",
            ShopEvent::CustomerLeft(_)               => "customer_left",
            ShopEvent::ProductStoppedFirstInLine(_)  => "product_stopped_first_in_line",
            ShopEvent::PatienceExpired(_)            => "patience_expired",
            ShopEvent::Panic { .. }                  => "panic",
        }
    }
}

impl fmt::Display for ShopEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopEvent::Panic { steps_run, discarded_ms } => {
                write!(f, "panic after {steps_run} steps ({discarded_ms:.1} ms discarded)")
            }
            other => match other.entity() {
                Some(id) => write!(f, "{} {id}", other.name()),
                None => f.write_str(other.name()),
            },
        }
    }
}
