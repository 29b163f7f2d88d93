//! Signals produced by [`step_lane`][crate::step_lane].

use shop_core::{EntityId, LaneId};

/// Something an entity did during one lane step.
///
/// The lane does not know whether the entity is a customer or a product;
/// the shop resolves that when it turns these into public events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LaneEvent {
    /// The front entity of an entering lane or conveyor came to rest.
    StoppedFirstInLine { entity: EntityId, lane: LaneId },

    /// An entity reached the end of an exit lane.  Emitted once per entity.
    Left { entity: EntityId, lane: LaneId },
}

impl LaneEvent {
    #[inline]
    pub fn entity(&self) -> EntityId {
        match *self {
            LaneEvent::StoppedFirstInLine { entity, .. } | LaneEvent::Left { entity, .. } => entity,
        }
    }

    #[inline]
    pub fn lane(&self) -> LaneId {
        match *self {
            LaneEvent::StoppedFirstInLine { lane, .. } | LaneEvent::Left { lane, .. } => lane,
        }
    }
}
