use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::product::Product;
use crate::domain::types::{Availability, LayoutType, ProductCode, ProductId, ProductName};

/// Reduced projection of a product used in catalog listings. Counters and
/// audit fields are deliberately absent.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductListItem {
    pub id: ProductId,
    pub name: ProductName,
    pub code: ProductCode,
    pub image: String,
    pub price: Option<f64>,
    pub availability: Availability,
    pub is_featured: bool,
    pub is_new: bool,
    pub is_promotional: bool,
    pub promotional_price: Option<f64>,
}

impl ProductListItem {
    pub fn from_product(product: &Product, now: DateTime<Utc>) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            code: product.code.clone(),
            image: product.image.to_string(),
            price: product.price.map(f64::from),
            availability: product.availability,
            is_featured: product.is_featured,
            is_new: product.is_new(now),
            is_promotional: product.is_promotional,
            promotional_price: product.promotional_price.map(f64::from),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub items_per_page: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct InfiniteScrollInfo {
    pub loaded_items_count: usize,
    pub batch_size: usize,
    pub has_more_items: bool,
}

/// Catalog page. Exactly one of `pagination` and `infinite_scroll` is set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogResult {
    pub catalog_title: String,
    pub layout: LayoutType,
    pub total_products_count: usize,
    pub products: Vec<ProductListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infinite_scroll: Option<InfiniteScrollInfo>,
}
