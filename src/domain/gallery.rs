use serde::{Deserialize, Serialize};

use crate::domain::scoring::lazy_load_priority;
use crate::domain::types::{
    DisplayMode, DisplayOrder, GalleryId, ImageCaption, ImageCategory, ImageDescription, ImageId,
    ImageUrl, LazyLoadPriority, ProductId, VariationId,
};

/// Default cap on images held by a single gallery.
pub const DEFAULT_MAX_GALLERY_IMAGES: usize = 50;

/// Per-product image gallery. `main_image_url` and `total_images` are
/// denormalized from the gallery's images.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Gallery {
    pub id: GalleryId,
    pub product_id: ProductId,
    pub main_image_url: Option<ImageUrl>,
    pub total_images: usize,
    pub current_image_index: usize,
    pub current_variation_id: Option<VariationId>,
    pub display_mode: DisplayMode,
}

impl Gallery {
    /// An empty gallery in the default display mode.
    pub fn empty(product_id: ProductId, current_variation_id: Option<VariationId>) -> Self {
        Self {
            id: GalleryId::generate(),
            product_id,
            main_image_url: None,
            total_images: 0,
            current_image_index: 0,
            current_variation_id,
            display_mode: DisplayMode::default(),
        }
    }
}

/// Changes to the viewer state of a gallery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryStateChanges {
    pub current_image_index: Option<usize>,
    pub current_variation_id: Option<Option<VariationId>>,
    pub display_mode: Option<DisplayMode>,
}

impl Gallery {
    /// Applies viewer state; the image index is clamped to the last image.
    pub fn apply(&mut self, changes: GalleryStateChanges) {
        if let Some(index) = changes.current_image_index {
            self.current_image_index = index.min(self.total_images.saturating_sub(1));
        }
        if let Some(variation_id) = changes.current_variation_id {
            self.current_variation_id = variation_id;
        }
        if let Some(display_mode) = changes.display_mode {
            self.display_mode = display_mode;
        }
    }
}

/// The four resolution tiers served for every image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolutionUrls {
    pub thumbnail: ImageUrl,
    pub medium: ImageUrl,
    pub large: ImageUrl,
    pub original: ImageUrl,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryImage {
    pub id: ImageId,
    pub gallery_id: GalleryId,
    pub thumbnail_url: ImageUrl,
    pub full_size_url: ImageUrl,
    pub resolutions: ResolutionUrls,
    pub display_order: DisplayOrder,
    pub is_active: bool,
    pub category: ImageCategory,
    /// Derived from `category`.
    pub lazy_load_priority: LazyLoadPriority,
    pub caption: Option<ImageCaption>,
    pub description: Option<ImageDescription>,
    pub show_caption: bool,
}

/// Information required to add a [`GalleryImage`] to a gallery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewGalleryImage {
    pub thumbnail_url: ImageUrl,
    pub full_size_url: ImageUrl,
    pub resolutions: ResolutionUrls,
    pub display_order: DisplayOrder,
    pub is_active: bool,
    pub category: ImageCategory,
    pub caption: Option<ImageCaption>,
    pub description: Option<ImageDescription>,
    /// Defaults to visible when not given.
    pub show_caption: Option<bool>,
}

impl NewGalleryImage {
    pub fn into_image(self, id: ImageId, gallery_id: GalleryId) -> GalleryImage {
        GalleryImage {
            id,
            gallery_id,
            thumbnail_url: self.thumbnail_url,
            full_size_url: self.full_size_url,
            resolutions: self.resolutions,
            display_order: self.display_order,
            is_active: self.is_active,
            category: self.category,
            lazy_load_priority: lazy_load_priority(self.category),
            caption: self.caption,
            description: self.description,
            show_caption: self.show_caption.unwrap_or(true),
        }
    }
}

/// Partial update of a [`GalleryImage`]; unspecified fields are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryImageChanges {
    pub thumbnail_url: Option<ImageUrl>,
    pub full_size_url: Option<ImageUrl>,
    pub resolutions: Option<ResolutionUrls>,
    pub display_order: Option<DisplayOrder>,
    pub is_active: Option<bool>,
    pub category: Option<ImageCategory>,
    pub caption: Option<Option<ImageCaption>>,
    pub description: Option<Option<ImageDescription>>,
    pub show_caption: Option<bool>,
}

impl GalleryImage {
    pub fn apply(&mut self, changes: GalleryImageChanges) {
        if let Some(url) = changes.thumbnail_url {
            self.thumbnail_url = url;
        }
        if let Some(url) = changes.full_size_url {
            self.full_size_url = url;
        }
        if let Some(resolutions) = changes.resolutions {
            self.resolutions = resolutions;
        }
        if let Some(order) = changes.display_order {
            self.display_order = order;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        if let Some(category) = changes.category {
            self.category = category;
            self.lazy_load_priority = lazy_load_priority(category);
        }
        if let Some(caption) = changes.caption {
            self.caption = caption;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(show_caption) = changes.show_caption {
            self.show_caption = show_caption;
        }
    }
}
