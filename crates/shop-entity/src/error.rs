use shop_core::EntityId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntityError {
    #[error("entity {0} not found")]
    NotFound(EntityId),

    #[error("entity {0} is not a customer")]
    NotACustomer(EntityId),

    #[error("entity {0} is not a product")]
    NotAProduct(EntityId),
}

pub type EntityResult<T> = Result<T, EntityError>;
