//! The per-entity, per-step spacing rule.

use shop_core::{GapSource, ShopConfig};
use shop_entity::{EntityState, EntityStore, Movable};

use crate::{Direction, Lane, LaneEvent, LaneKind, Spacing};

/// Tunables for [`step_entity`].  Built from [`ShopConfig`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovementParams {
    /// Distance covered per step (`base_walk_distance * walk_speed`).
    pub walk_delta: f32,
    /// Gap between consecutive products on a conveyor.
    pub product_gap: f32,
    /// Exclusive upper bound of the jittered customer gap
    /// (`2 * base_walk_distance`).
    pub jitter_max: f32,
}

impl MovementParams {
    pub fn from_config(config: &ShopConfig) -> Self {
        Self {
            walk_delta:  config.walk_delta(),
            product_gap: config.product_gap,
            jitter_max:  config.base_walk_distance * 2.0,
        }
    }
}

impl Default for MovementParams {
    fn default() -> Self {
        Self::from_config(&ShopConfig::default())
    }
}

/// Position and extent of the entity ahead, as of the previous step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor {
    pub position: f32,
    pub extent:   f32,
}

/// What [`step_entity`] observed, if anything worth reporting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepSignal {
    StoppedFirstInLine,
    Left,
}

/// Where the entity wants to be this step.
///
/// Never negative: a product spawned too close behind the one ahead waits at
/// the start of the conveyor instead of being pushed off it.
pub fn lane_target(
    kind:   LaneKind,
    length: f32,
    extent: f32,
    ahead:  Option<Neighbor>,
    gap:    f32,
) -> f32 {
    let target = match (kind, ahead) {
        (LaneKind::QueueIn, None)      => 0.0,
        (LaneKind::QueueLeave, None)   => length,
        (LaneKind::Conveyor, None)     => length - extent,
        (LaneKind::QueueIn | LaneKind::QueueLeave, Some(a)) => a.position + a.extent + gap,
        (LaneKind::Conveyor, Some(a))  => a.position - extent - gap,
    };
    target.max(0.0)
}

/// Advance one entity by one step.
///
/// `gap` is the spacing to keep behind `ahead`; it is ignored when `ahead`
/// is `None`.  Departed entities are left untouched.
pub fn step_entity<M: Movable>(
    entity: &mut M,
    kind:   LaneKind,
    length: f32,
    ahead:  Option<Neighbor>,
    gap:    f32,
    params: &MovementParams,
) -> Option<StepSignal> {
    if entity.state().is_departed() {
        return None;
    }

    let target = lane_target(kind, length, entity.extent(), ahead, gap);
    let mut pos = entity.position();
    let first_in_line = ahead.is_none();

    match kind.direction() {
        Direction::TowardStart => {
            if pos > target {
                pos -= params.walk_delta;
                // Never step into the extent of the entity ahead.
                if let Some(a) = ahead {
                    pos = pos.max(a.position + a.extent);
                }
                entity.set_state(EntityState::Moving);
            }
            // Nothing constrains the front of the line: land exactly on the
            // target instead of oscillating around it.
            if first_in_line && pos <= target {
                pos = target;
            }
            entity.set_position(pos);

            if pos <= target && entity.state().is_moving() {
                entity.set_state(EntityState::Arrived);
                if first_in_line {
                    return Some(StepSignal::StoppedFirstInLine);
                }
            }
            None
        }

        Direction::TowardEnd if kind.is_exit() => {
            if pos < target {
                pos += params.walk_delta;
                entity.set_state(EntityState::Leaving);
            }
            entity.set_position(pos);

            if pos >= target {
                entity.set_state(EntityState::Departed);
                return Some(StepSignal::Left);
            }
            None
        }

        Direction::TowardEnd => {
            if pos < target {
                pos += params.walk_delta;
                entity.set_state(EntityState::Moving);
            }
            if pos >= target {
                pos = target;
                entity.set_position(pos);
                if entity.state().is_moving() {
                    entity.set_state(EntityState::Arrived);
                    if first_in_line {
                        return Some(StepSignal::StoppedFirstInLine);
                    }
                }
                return None;
            }
            entity.set_position(pos);
            None
        }
    }
}

/// Advance every entity of `lane` by one step, front to back.
///
/// Targets are computed from a snapshot of the lane taken before the first
/// entity moves.  Signals are returned, not dispatched: the caller hands them
/// to collaborators after the whole lane pass, so handlers may reparent or
/// destroy entities freely.
///
/// # Panics
///
/// Panics if a member id is missing from `store` or its lane back-reference
/// names a different lane.  Both mean the shop's bookkeeping is corrupt.
pub fn step_lane(
    lane:   &Lane,
    store:  &mut EntityStore,
    params: &MovementParams,
    gaps:   &mut dyn GapSource,
) -> Vec<LaneEvent> {
    let snapshot: Vec<Neighbor> = lane
        .iter()
        .map(|id| {
            let e = store
                .get(id)
                .unwrap_or_else(|| panic!("{} lists {id}, which is not in the entity store", lane.id()));
            Neighbor { position: e.position, extent: e.extent }
        })
        .collect();

    let mut events = Vec::new();
    for (i, id) in lane.iter().enumerate() {
        let ahead = i.checked_sub(1).map(|j| snapshot[j]);
        let gap = match (ahead, lane.kind().spacing()) {
            (None, _)                  => 0.0,
            (Some(_), Spacing::Fixed)    => params.product_gap,
            (Some(_), Spacing::Jittered) => gaps.gap(params.jitter_max),
        };

        let Some(entity) = store.get_mut(id) else {
            unreachable!("snapshot already resolved {id}");
        };
        assert_eq!(
            entity.lane,
            lane.id(),
            "{id} is stepped by {} but belongs to {}",
            lane.id(),
            entity.lane
        );

        match step_entity(entity, lane.kind(), lane.extent(), ahead, gap, params) {
            Some(StepSignal::StoppedFirstInLine) => {
                tracing::debug!(entity = %id, lane = %lane.id(), "stopped first in line");
                events.push(LaneEvent::StoppedFirstInLine { entity: id, lane: lane.id() });
            }
            Some(StepSignal::Left) => {
                tracing::debug!(entity = %id, lane = %lane.id(), "left");
                events.push(LaneEvent::Left { entity: id, lane: lane.id() });
            }
            None => {}
        }
    }
    events
}
