//! `shop-core`: foundational types for the shop lane simulation.
//!
//! This crate is a dependency of every other `shop-*` crate.  It has no
//! `shop-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `EntityId`, `LaneId`                                    |
//! | [`product`]   | `ProductType`, interned-by-value product identifier    |
//! | [`time`]      | `Tick`, `StepClock`, `ShopConfig`                       |
//! | [`rng`]       | `GapSource` trait, `SpacingRng`, `FixedGap`             |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod product;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{EntityId, LaneId};
pub use product::ProductType;
pub use rng::{FixedGap, GapSource, SpacingRng};
pub use time::{ShopConfig, StepClock, Tick};
