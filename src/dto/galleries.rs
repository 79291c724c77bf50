use serde::Serialize;

use crate::domain::gallery::{Gallery, GalleryImage};
use crate::domain::variation::ProductVariation;

/// A gallery with its images in load order and the product's variations.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GalleryView {
    pub gallery: Gallery,
    pub images: Vec<GalleryImage>,
    pub variations: Vec<ProductVariation>,
}

/// Outcome of adding or removing an image.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GalleryImageChange {
    pub image: GalleryImage,
    pub gallery: Gallery,
}
