use shop_core::{CoreError, EntityId, LaneId};
use shop_entity::EntityError;
use shop_schedule::ScheduleError;
use thiserror::Error;

/// Errors from [`Shop`][crate::Shop] operations.
#[derive(Debug, Error, PartialEq)]
pub enum ShopError {
    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error("lane {0} not found")]
    LaneNotFound(LaneId),

    #[error("lane {0} is not a conveyor")]
    NotAConveyor(LaneId),

    #[error("customer {0} is already leaving")]
    AlreadyLeaving(EntityId),
}

pub type ShopResult<T> = Result<T, ShopError>;

/// Errors from building or reconfiguring a [`Sim`][crate::Sim].
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("scheduler error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("shop error: {0}")]
    Shop(#[from] ShopError),
}

pub type SimResult<T> = Result<T, SimError>;
