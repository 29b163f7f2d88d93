//! Product payload.

use shop_core::ProductType;

/// A deliverable unit moving toward its consumer.  Carries no request data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductData {
    product_type: ProductType,
}

impl ProductData {
    pub fn new(product_type: ProductType) -> Self {
        Self { product_type }
    }

    /// The product's type.  Fixed at creation.
    #[inline]
    pub fn product_type(&self) -> &ProductType {
        &self.product_type
    }
}
