//! `shop-entity`: movable simulation units.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`entity`]   | `Entity`, `EntityKind`, `EntityState`, `Movable`              |
//! | [`customer`] | `CustomerData` (request list, patience, mood), `Mood`         |
//! | [`product`]  | `ProductData`                                                 |
//! | [`store`]    | `EntityStore`, id-keyed ownership of every live entity        |
//! | [`error`]    | `EntityError`, `EntityResult<T>`                              |
//!
//! # Tagged variants instead of a hierarchy
//!
//! Customers and products share one `Entity` shape (position, extent, state,
//! lane) and differ only in the `kind` payload.  The movement algorithm in
//! `shop-lane` sees entities through the small [`Movable`] capability trait
//! and never matches on the kind.

pub mod customer;
pub mod entity;
pub mod error;
pub mod product;
pub mod store;


pub use customer::{CustomerData, Mood};
pub use entity::{Entity, EntityKind, EntityState, Movable};
pub use error::{EntityError, EntityResult};
pub use product::ProductData;
pub use store::EntityStore;
