use crate::domain::gallery::{
    Gallery, GalleryImage, GalleryImageChanges, GalleryStateChanges, NewGalleryImage,
};
use crate::domain::types::{GalleryId, ImageId, ProductId, VariationId};
use crate::domain::variation::ProductVariation;
use crate::repository::{
    CatalogState, GalleryReader, GalleryWriter, InMemoryRepository, RepositoryError,
    RepositoryResult,
};

fn ensure_in(
    state: &mut CatalogState,
    product_id: ProductId,
    variation_id: Option<VariationId>,
) -> RepositoryResult<Gallery> {
    if let Some(gallery) = state.galleries.find(|g| g.product_id == product_id) {
        return Ok(gallery.clone());
    }
    log::debug!("Creating gallery for product {product_id}");
    state
        .galleries
        .create(Gallery::empty(product_id, variation_id))
}

impl GalleryReader for InMemoryRepository {
    fn get_gallery_by_id(&self, id: GalleryId) -> RepositoryResult<Option<Gallery>> {
        let state = self.state.read();
        Ok(state.galleries.get_by_id(&id).cloned())
    }

    fn get_gallery_by_product(&self, product_id: ProductId) -> RepositoryResult<Option<Gallery>> {
        let state = self.state.read();
        Ok(state
            .galleries
            .find(|g| g.product_id == product_id)
            .cloned())
    }

    fn list_gallery_images(&self, gallery_id: GalleryId) -> RepositoryResult<Vec<GalleryImage>> {
        let state = self.state.read();
        Ok(state
            .images
            .filter(|i| i.gallery_id == gallery_id)
            .into_iter()
            .cloned()
            .collect())
    }

    fn get_gallery_image_by_id(&self, id: ImageId) -> RepositoryResult<Option<GalleryImage>> {
        let state = self.state.read();
        Ok(state.images.get_by_id(&id).cloned())
    }
}

impl GalleryWriter for InMemoryRepository {
    fn ensure_gallery(
        &self,
        product_id: ProductId,
        variation_id: Option<VariationId>,
    ) -> RepositoryResult<Gallery> {
        let mut state = self.state.write();
        ensure_in(&mut state, product_id, variation_id)
    }

    fn gallery_view(
        &self,
        product_id: ProductId,
        variation_id: Option<VariationId>,
    ) -> RepositoryResult<(Gallery, Vec<GalleryImage>, Vec<ProductVariation>)> {
        let mut state = self.state.write();
        let gallery = ensure_in(&mut state, product_id, variation_id)?;
        let images = state
            .images
            .filter(|i| i.gallery_id == gallery.id)
            .into_iter()
            .cloned()
            .collect();
        let variations = state
            .variations
            .filter(|v| v.product_id == product_id)
            .into_iter()
            .cloned()
            .collect();
        Ok((gallery, images, variations))
    }

    fn update_gallery_state(
        &self,
        id: GalleryId,
        changes: &GalleryStateChanges,
    ) -> RepositoryResult<Gallery> {
        let mut state = self.state.write();
        state.galleries.update(&id, |gallery| {
            gallery.apply(changes.clone());
            Ok(())
        })
    }

    fn create_gallery_image(
        &self,
        gallery_id: GalleryId,
        image: &NewGalleryImage,
    ) -> RepositoryResult<(GalleryImage, Gallery)> {
        let limit = self.limits.max_gallery_images;
        let mut guard = self.state.write();
        let state = &mut *guard;

        if !state.galleries.exists(&gallery_id) {
            return Err(RepositoryError::NotFound);
        }
        let existing = state.images.count_where(|i| i.gallery_id == gallery_id);
        if existing >= limit {
            return Err(RepositoryError::CapacityExceeded {
                entity: "gallery image",
                limit,
            });
        }

        let created = state
            .images
            .create(image.clone().into_image(ImageId::generate(), gallery_id))?;
        let total = state.images.count_where(|i| i.gallery_id == gallery_id);
        let gallery = state.galleries.update(&gallery_id, |gallery| {
            // First image into an empty gallery becomes the main image.
            if existing == 0 {
                gallery.main_image_url = Some(created.full_size_url.clone());
            }
            gallery.total_images = total;
            Ok(())
        })?;
        Ok((created, gallery))
    }

    fn update_gallery_image(
        &self,
        id: ImageId,
        changes: &GalleryImageChanges,
    ) -> RepositoryResult<GalleryImage> {
        let mut state = self.state.write();
        state.images.update(&id, |image| {
            image.apply(changes.clone());
            Ok(())
        })
    }

    fn delete_gallery_image(&self, id: ImageId) -> RepositoryResult<(GalleryImage, Gallery)> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let removed = state.images.remove(&id)?;
        let gallery_id = removed.gallery_id;
        let total = state.images.count_where(|i| i.gallery_id == gallery_id);
        let gallery = state.galleries.update(&gallery_id, |gallery| {
            gallery.total_images = total;
            gallery.current_image_index = gallery
                .current_image_index
                .min(total.saturating_sub(1));
            Ok(())
        })?;
        Ok((removed, gallery))
    }
}
