//! Base error type for the shop crates.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::{EntityId, LaneId};

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("lane {0} not found")]
    LaneNotFound(LaneId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `shop-core`.
pub type CoreResult<T> = Result<T, CoreError>;
