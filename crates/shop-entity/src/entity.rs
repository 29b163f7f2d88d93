//! The shared entity shape.

use shop_core::{EntityId, LaneId};

use crate::{CustomerData, ProductData};

/// Lifecycle tag of an entity.
///
/// Entering-lane and conveyor entities go `Idle → Moving → Arrived` (and back
/// to `Moving` when the line in front advances).  Customers moved to the exit
/// lane are `Leaving` until they reach its end, then `Departed`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityState {
    #[default]
    Idle,
    Moving,
    Arrived,
    Leaving,
    Departed,
}

impl EntityState {
    /// `true` while the entity is walking (entering or leaving).
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, EntityState::Moving | EntityState::Leaving)
    }

    /// `true` once the exit signal has been emitted.
    #[inline]
    pub fn is_departed(self) -> bool {
        self == EntityState::Departed
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityState::Idle     => "idle",
            EntityState::Moving   => "moving",
            EntityState::Arrived  => "arrived",
            EntityState::Leaving  => "leaving",
            EntityState::Departed => "departed",
        }
    }
}

impl std::fmt::Display for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Customer(CustomerData),
    Product(ProductData),
}

/// A movable simulation unit resident in exactly one lane.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,

    /// Offset along the lane's travel axis.
    pub position: f32,

    /// Width used by the spacing rule.
    pub extent: f32,

    pub state: EntityState,

    /// The lane this entity currently lives in.  A back-reference only; the
    /// lane owns the ordering.
    pub lane: LaneId,

    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: EntityId, lane: LaneId, position: f32, extent: f32, kind: EntityKind) -> Self {
        Self {
            id,
            position,
            extent,
            state: EntityState::Idle,
            lane,
            kind,
        }
    }

    #[inline]
    pub fn is_customer(&self) -> bool {
        matches!(self.kind, EntityKind::Customer(_))
    }

    #[inline]
    pub fn is_product(&self) -> bool {
        matches!(self.kind, EntityKind::Product(_))
    }

    pub fn as_customer(&self) -> Option<&CustomerData> {
        match &self.kind {
            EntityKind::Customer(c) => Some(c),
            EntityKind::Product(_) => None,
        }
    }

    pub fn as_customer_mut(&mut self) -> Option<&mut CustomerData> {
        match &mut self.kind {
            EntityKind::Customer(c) => Some(c),
            EntityKind::Product(_) => None,
        }
    }

    pub fn as_product(&self) -> Option<&ProductData> {
        match &self.kind {
            EntityKind::Product(p) => Some(p),
            EntityKind::Customer(_) => None,
        }
    }
}

// ── Movable ───────────────────────────────────────────────────────────────────

/// The capability surface the spacing algorithm needs from an entity.
pub trait Movable {
    fn position(&self) -> f32;
    fn set_position(&mut self, position: f32);
    fn extent(&self) -> f32;
    fn state(&self) -> EntityState;
    fn set_state(&mut self, state: EntityState);
}

impl Movable for Entity {
    #[inline]
    fn position(&self) -> f32 {
        self.position
    }

    #[inline]
    fn set_position(&mut self, position: f32) {
        self.position = position;
    }

    #[inline]
    fn extent(&self) -> f32 {
        self.extent
    }

    #[inline]
    fn state(&self) -> EntityState {
        self.state
    }

    #[inline]
    fn set_state(&mut self, state: EntityState) {
        self.state = state;
    }
}
