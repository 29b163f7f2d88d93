//! Product type identifiers.

use std::fmt;
use std::sync::Arc;

/// Identifier of a product type such as `"coffee"` or `"muffin"`.
///
/// Cloning is a reference-count bump; requests hold many of these and the
/// conveyor spawns one per product.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductType(Arc<str>);

impl ProductType {
    pub fn new(name: &str) -> Self {
        ProductType(Arc::from(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductType {
    fn from(name: &str) -> Self {
        ProductType::new(name)
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
