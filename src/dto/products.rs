use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::product::Product;
use crate::domain::types::ProductCode;

/// Full product record plus the derived "is new" flag.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub is_new: bool,
}

impl ProductDetails {
    pub fn new(product: Product, now: DateTime<Utc>) -> Self {
        let is_new = product.is_new(now);
        Self { product, is_new }
    }
}

/// Confirmation returned by destructive operations.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeletionMessage {
    pub message: String,
}

/// Whether a product code is already used by another active product.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CodeAvailability {
    pub code: ProductCode,
    pub exists: bool,
}
