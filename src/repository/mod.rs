use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::gallery::{
    DEFAULT_MAX_GALLERY_IMAGES, Gallery, GalleryImage, GalleryImageChanges, GalleryStateChanges,
    NewGalleryImage,
};
use crate::domain::product::{NewProduct, Product, ProductChanges};
use crate::domain::types::{
    GalleryId, ImageId, InteractionKind, ProductCode, ProductId, VariationId,
};
use crate::domain::variation::{NewProductVariation, ProductVariation};

pub mod errors;
pub mod gallery;
pub mod product;
pub mod store;
pub mod variation;

pub use errors::{RepositoryError, RepositoryResult};
use store::EntityStore;

/// Default cap on stored products.
pub const DEFAULT_MAX_PRODUCTS: usize = 10_000;

/// Capacity limits applied by [`InMemoryRepository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    pub max_products: usize,
    pub max_gallery_images: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_products: DEFAULT_MAX_PRODUCTS,
            max_gallery_images: DEFAULT_MAX_GALLERY_IMAGES,
        }
    }
}

/// One store per entity type, guarded together.
#[derive(Debug)]
struct CatalogState {
    products: EntityStore<Product>,
    galleries: EntityStore<Gallery>,
    images: EntityStore<GalleryImage>,
    variations: EntityStore<ProductVariation>,
}

/// Repository implementation backed by process memory.
///
/// All stores sit behind a single lock and every trait method takes it
/// exactly once, so each call (including the compound gallery writes) is
/// atomic. Cloning yields another handle to the same data.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    state: Arc<RwLock<CatalogState>>,
    limits: StoreLimits,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new(StoreLimits::default())
    }
}

impl InMemoryRepository {
    /// Create an empty repository enforcing `limits`.
    pub fn new(limits: StoreLimits) -> Self {
        let state = CatalogState {
            products: EntityStore::with_capacity_limit(limits.max_products),
            galleries: EntityStore::new(),
            images: EntityStore::new(),
            variations: EntityStore::new(),
        };
        Self {
            state: Arc::new(RwLock::new(state)),
            limits,
        }
    }

    pub fn limits(&self) -> StoreLimits {
        self.limits
    }
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// All active products in insertion order.
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    /// Retrieve an active product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// Retrieve a product by identifier even after it was soft-deleted.
    fn get_product_for_audit(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// Whether an active product other than `exclude` uses `code`.
    fn code_exists(&self, code: &ProductCode, exclude: Option<ProductId>)
    -> RepositoryResult<bool>;
    fn count_products(&self) -> RepositoryResult<usize>;
}

pub trait ProductWriter {
    /// Persist a new product, rejecting duplicate codes and a full store.
    fn create_product(&self, product: &NewProduct, now: DateTime<Utc>)
    -> RepositoryResult<Product>;
    /// Merge changes into an active product.
    fn update_product(
        &self,
        id: ProductId,
        changes: &ProductChanges,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Product>;
    /// Increment one interaction counter and recompute popularity.
    fn record_interaction(
        &self,
        id: ProductId,
        kind: InteractionKind,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Product>;
    /// Mark a product inactive.
    fn soft_delete_product(&self, id: ProductId) -> RepositoryResult<Product>;
}

/// Read-only operations for galleries and their images.
pub trait GalleryReader {
    fn get_gallery_by_id(&self, id: GalleryId) -> RepositoryResult<Option<Gallery>>;
    fn get_gallery_by_product(&self, product_id: ProductId) -> RepositoryResult<Option<Gallery>>;
    /// Images of a gallery in insertion order.
    fn list_gallery_images(&self, gallery_id: GalleryId) -> RepositoryResult<Vec<GalleryImage>>;
    fn get_gallery_image_by_id(&self, id: ImageId) -> RepositoryResult<Option<GalleryImage>>;
}

/// Write operations for galleries and their images.
pub trait GalleryWriter {
    /// Return the product's gallery, creating an empty one if absent.
    fn ensure_gallery(
        &self,
        product_id: ProductId,
        variation_id: Option<VariationId>,
    ) -> RepositoryResult<Gallery>;
    /// Gallery of the product (created if absent) with its images in
    /// insertion order and the product's variations, read under one lock.
    fn gallery_view(
        &self,
        product_id: ProductId,
        variation_id: Option<VariationId>,
    ) -> RepositoryResult<(Gallery, Vec<GalleryImage>, Vec<ProductVariation>)>;
    fn update_gallery_state(
        &self,
        id: GalleryId,
        changes: &GalleryStateChanges,
    ) -> RepositoryResult<Gallery>;
    /// Insert an image, enforcing the per-gallery limit and refreshing the
    /// gallery's denormalized fields. Returns the image and updated gallery.
    fn create_gallery_image(
        &self,
        gallery_id: GalleryId,
        image: &NewGalleryImage,
    ) -> RepositoryResult<(GalleryImage, Gallery)>;
    fn update_gallery_image(
        &self,
        id: ImageId,
        changes: &GalleryImageChanges,
    ) -> RepositoryResult<GalleryImage>;
    /// Remove an image and recount its gallery.
    fn delete_gallery_image(&self, id: ImageId) -> RepositoryResult<(GalleryImage, Gallery)>;
}

/// Read-only operations for product variations.
pub trait VariationReader {
    fn list_variations(&self, product_id: ProductId) -> RepositoryResult<Vec<ProductVariation>>;
    fn get_variation_by_id(&self, id: VariationId) -> RepositoryResult<Option<ProductVariation>>;
}

pub trait VariationWriter {
    fn create_variation(
        &self,
        variation: &NewProductVariation,
    ) -> RepositoryResult<ProductVariation>;
}
