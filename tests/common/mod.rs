//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use pushkind_catalog::domain::clock::FixedClock;
use pushkind_catalog::domain::gallery::{NewGalleryImage, ResolutionUrls};
use pushkind_catalog::domain::product::NewProduct;
use pushkind_catalog::domain::types::{
    Availability, DisplayOrder, ImageCategory, ImageUrl, ProductCode, ProductName, ProductPrice,
};
use pushkind_catalog::repository::{InMemoryRepository, StoreLimits};

/// Instant every test clock is frozen at.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn test_clock() -> FixedClock {
    FixedClock(test_now())
}

/// Empty repository with the given limits.
pub fn repo_with_limits(max_products: usize, max_gallery_images: usize) -> InMemoryRepository {
    InMemoryRepository::new(StoreLimits {
        max_products,
        max_gallery_images,
    })
}

pub fn url(path: &str) -> ImageUrl {
    ImageUrl::new(format!("https://cdn.example.com/{path}")).expect("valid url")
}

/// Product payload with code `PRD-{n:04}`.
pub fn new_product(n: usize, price: Option<f64>) -> NewProduct {
    NewProduct {
        name: ProductName::new(format!("Producto {n:03}")).expect("valid name"),
        code: ProductCode::new(format!("PRD-{n:04}")).expect("valid code"),
        image: url(&format!("products/{n}.jpg")),
        price: price.map(|p| ProductPrice::new(p).expect("valid price")),
        availability: Availability::Available,
        is_featured: false,
        is_promotional: false,
        promotional_price: None,
    }
}

pub fn new_image(name: &str, category: ImageCategory, order: u32) -> NewGalleryImage {
    NewGalleryImage {
        thumbnail_url: url(&format!("{name}-thumb.jpg")),
        full_size_url: url(&format!("{name}.jpg")),
        resolutions: ResolutionUrls {
            thumbnail: url(&format!("{name}-thumb.jpg")),
            medium: url(&format!("{name}-medium.jpg")),
            large: url(&format!("{name}-large.jpg")),
            original: url(&format!("{name}.jpg")),
        },
        display_order: DisplayOrder::new(order).expect("valid order"),
        is_active: true,
        category,
        caption: None,
        description: None,
        show_caption: None,
    }
}
