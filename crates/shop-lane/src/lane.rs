//! Ordered one-dimensional tracks.

use shop_core::{EntityId, LaneId};

/// Which way entities travel along a lane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward position 0 (customers walking up to the counter).
    TowardStart,
    /// Toward the lane's far edge (leavers, conveyor products).
    TowardEnd,
}

/// How the gap to the entity ahead is chosen each step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Spacing {
    /// Re-drawn every step from the gap source.
    Jittered,
    /// The configured product gap.
    Fixed,
}

/// The role a lane plays in the shop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaneKind {
    /// Customers queue toward the counter at position 0.
    QueueIn,
    /// Customers walk out toward the far edge and signal `Left`.
    QueueLeave,
    /// Products move toward the far edge where their consumer waits.
    Conveyor,
}

impl LaneKind {
    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            LaneKind::QueueIn => Direction::TowardStart,
            LaneKind::QueueLeave | LaneKind::Conveyor => Direction::TowardEnd,
        }
    }

    #[inline]
    pub fn spacing(self) -> Spacing {
        match self {
            LaneKind::QueueIn | LaneKind::QueueLeave => Spacing::Jittered,
            LaneKind::Conveyor => Spacing::Fixed,
        }
    }

    /// `true` for lanes whose entities exit the simulation at the far end.
    #[inline]
    pub fn is_exit(self) -> bool {
        self == LaneKind::QueueLeave
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LaneKind::QueueIn    => "queue-in",
            LaneKind::QueueLeave => "queue-leave",
            LaneKind::Conveyor   => "conveyor",
        }
    }
}

impl std::fmt::Display for LaneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered sequence of entity ids sharing one track.
///
/// Index 0 is the front: the entity closest to the lane's directional
/// target.  Order is insertion order minus removals; nothing in the
/// simulation reorders a lane.
#[derive(Debug, Clone)]
pub struct Lane {
    id:      LaneId,
    kind:    LaneKind,
    length:  f32,
    members: Vec<EntityId>,
}

impl Lane {
    pub fn new(id: LaneId, kind: LaneKind, length: f32) -> Self {
        Self { id, kind, length, members: Vec::new() }
    }

    #[inline]
    pub fn id(&self) -> LaneId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> LaneKind {
        self.kind
    }

    /// Total usable length of the lane.
    #[inline]
    pub fn extent(&self) -> f32 {
        self.length
    }

    /// Insert `entity` at the tail.
    pub fn append(&mut self, entity: EntityId) {
        debug_assert!(!self.contains(entity), "{entity} appended to {} twice", self.id);
        self.members.push(entity);
    }

    /// Detach `entity`, keeping the order of the rest.  Returns `false` if it
    /// was not a member.  The entity itself is not destroyed.
    pub fn remove(&mut self, entity: EntityId) -> bool {
        match self.position_of(entity) {
            Some(i) => {
                self.members.remove(i);
                true
            }
            None => false,
        }
    }

    /// The entity immediately ahead of `entity`, or `None` if it is first
    /// (or not a member).
    pub fn neighbor_ahead(&self, entity: EntityId) -> Option<EntityId> {
        match self.position_of(entity)? {
            0 => None,
            i => Some(self.members[i - 1]),
        }
    }

    /// The first-in-line entity.
    #[inline]
    pub fn front(&self) -> Option<EntityId> {
        self.members.first().copied()
    }

    #[inline]
    pub fn position_of(&self, entity: EntityId) -> Option<usize> {
        self.members.iter().position(|&e| e == entity)
    }

    #[inline]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.members.contains(&entity)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members front-to-back.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.members.iter().copied()
    }

    #[inline]
    pub fn members(&self) -> &[EntityId] {
        &self.members
    }
}
