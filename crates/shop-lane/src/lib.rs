//! `shop-lane`: ordered lanes and the per-step movement rule.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`lane`]     | `Lane`, `LaneKind`, `Direction`, `Spacing`                       |
//! | [`movement`] | `MovementParams`, `Neighbor`, `step_entity`, `step_lane`         |
//! | [`event`]    | `LaneEvent`, signals produced while stepping a lane            |
//!
//! # Movement model (chase the neighbor ahead)
//!
//! Every entity, customer or product, entering or leaving, runs the same
//! rule each step:
//!
//! 1. Derive a target: just behind the entity ahead in the lane, or a
//!    lane-derived default when it is first in line.
//! 2. Walk toward the target by a fixed `walk_delta`.
//! 3. On arrival, stop.  The first entity of an entering lane or conveyor
//!    signals `StoppedFirstInLine`; an entity reaching the end of the exit
//!    lane signals `Left`.
//!
//! Lane kinds differ only in travel direction, target derivation, and how the
//! gap to the entity ahead is chosen.
//!
//! A lane is always stepped front-to-back against a snapshot of the previous
//! step's positions, so no entity reads a neighbor that already moved this
//! step.

pub mod event;
pub mod lane;
pub mod movement;


pub use event::LaneEvent;
pub use lane::{Direction, Lane, LaneKind, Spacing};
pub use movement::{MovementParams, Neighbor, StepSignal, lane_target, step_entity, step_lane};
