use crate::domain::gallery::{
    Gallery, GalleryImage, GalleryImageChanges, GalleryStateChanges, NewGalleryImage,
};
use crate::domain::types::{GalleryId, ImageId, ProductId, VariationId};
use crate::domain::variation::{NewProductVariation, ProductVariation};
use crate::dto::galleries::{GalleryImageChange, GalleryView};
use crate::repository::{
    GalleryReader, GalleryWriter, RepositoryError, VariationReader, VariationWriter,
};

use super::{ServiceError, ServiceResult};

/// Core business logic for the product gallery.
///
/// Resolves the product's gallery, creating an empty one on first access, and
/// returns it with every image ordered by lazy-load priority then display
/// order, plus all variations of the product. `variation_id` only seeds a new
/// gallery's current variation; it never filters the returned images.
pub fn show_gallery<R>(
    product_id: ProductId,
    variation_id: Option<VariationId>,
    repo: &R,
) -> ServiceResult<GalleryView>
where
    R: GalleryWriter,
{
    let (gallery, mut images, variations) = match repo.gallery_view(product_id, variation_id) {
        Ok(view) => view,
        Err(e) => {
            log::error!("Failed to load gallery for product {product_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };
    images.sort_by_key(|image| (image.lazy_load_priority, image.display_order));

    Ok(GalleryView {
        gallery,
        images,
        variations,
    })
}

pub fn get_gallery_image<R>(image_id: ImageId, repo: &R) -> ServiceResult<GalleryImage>
where
    R: GalleryReader,
{
    match repo.get_gallery_image_by_id(image_id) {
        Ok(Some(image)) => Ok(image),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get gallery image: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Adds an image to an existing gallery.
///
/// The first image of an empty gallery becomes its main image; later images
/// never replace it. Fails with `CapacityExceeded` once the gallery holds the
/// configured maximum.
pub fn create_gallery_image<R>(
    gallery_id: GalleryId,
    payload: NewGalleryImage,
    repo: &R,
) -> ServiceResult<GalleryImageChange>
where
    R: GalleryWriter,
{
    match repo.create_gallery_image(gallery_id, &payload) {
        Ok((image, gallery)) => {
            log::debug!(
                "Added image {} to gallery {gallery_id} ({} total)",
                image.id,
                gallery.total_images
            );
            Ok(GalleryImageChange { image, gallery })
        }
        Err(e @ RepositoryError::CapacityExceeded { .. }) => {
            log::warn!("Rejected image for gallery {gallery_id}: {e}");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn update_gallery_image<R>(
    image_id: ImageId,
    changes: GalleryImageChanges,
    repo: &R,
) -> ServiceResult<GalleryImageChange>
where
    R: GalleryReader + GalleryWriter,
{
    let image = repo.update_gallery_image(image_id, &changes)?;
    let gallery = match repo.get_gallery_by_id(image.gallery_id) {
        Ok(Some(gallery)) => gallery,
        Ok(None) => {
            log::error!("Image {image_id} belongs to missing gallery {}", image.gallery_id);
            return Err(ServiceError::Internal);
        }
        Err(e) => {
            log::error!("Failed to get gallery: {e}");
            return Err(ServiceError::Internal);
        }
    };
    Ok(GalleryImageChange { image, gallery })
}

pub fn delete_gallery_image<R>(image_id: ImageId, repo: &R) -> ServiceResult<GalleryImageChange>
where
    R: GalleryWriter,
{
    let (image, gallery) = repo.delete_gallery_image(image_id)?;
    log::debug!(
        "Removed image {image_id} from gallery {} ({} left)",
        gallery.id,
        gallery.total_images
    );
    Ok(GalleryImageChange { image, gallery })
}

/// Updates the viewer state (current image, variation, display mode).
pub fn update_gallery_state<R>(
    gallery_id: GalleryId,
    changes: GalleryStateChanges,
    repo: &R,
) -> ServiceResult<Gallery>
where
    R: GalleryWriter,
{
    Ok(repo.update_gallery_state(gallery_id, &changes)?)
}

/// Stores a variation. The owning product is not checked for existence.
pub fn create_variation<R>(
    payload: NewProductVariation,
    repo: &R,
) -> ServiceResult<ProductVariation>
where
    R: VariationWriter,
{
    match repo.create_variation(&payload) {
        Ok(variation) => Ok(variation),
        Err(e) => {
            log::error!("Failed to create variation: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_variation<R>(variation_id: VariationId, repo: &R) -> ServiceResult<ProductVariation>
where
    R: VariationReader,
{
    match repo.get_variation_by_id(variation_id) {
        Ok(Some(variation)) => Ok(variation),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get variation: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Variations of a product in creation order.
pub fn list_variations<R>(product_id: ProductId, repo: &R) -> ServiceResult<Vec<ProductVariation>>
where
    R: VariationReader,
{
    repo.list_variations(product_id).map_err(|e| {
        log::error!("Failed to list variations: {e}");
        ServiceError::Internal
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gallery::ResolutionUrls;
    use crate::domain::types::{
        DisplayMode, DisplayOrder, ImageCategory, ImageUrl, VariationName, VariationType,
    };
    use crate::repository::{InMemoryRepository, StoreLimits};

    fn url(path: &str) -> ImageUrl {
        ImageUrl::new(format!("https://cdn.example.com/{path}")).unwrap()
    }

    fn image(name: &str, category: ImageCategory, order: u32) -> NewGalleryImage {
        NewGalleryImage {
            thumbnail_url: url(&format!("{name}-t.jpg")),
            full_size_url: url(&format!("{name}.jpg")),
            resolutions: ResolutionUrls {
                thumbnail: url(&format!("{name}-t.jpg")),
                medium: url(&format!("{name}-m.jpg")),
                large: url(&format!("{name}-l.jpg")),
                original: url(&format!("{name}.jpg")),
            },
            display_order: DisplayOrder::new(order).unwrap(),
            is_active: true,
            category,
            caption: None,
            description: None,
            show_caption: None,
        }
    }

    fn variation(product_id: ProductId, name: &str) -> NewProductVariation {
        NewProductVariation {
            product_id,
            name: VariationName::new(name).unwrap(),
            variation_type: VariationType::Color,
            color_code: None,
            is_default: true,
        }
    }

    #[test]
    fn first_access_creates_empty_gallery() {
        let repo = InMemoryRepository::default();
        let product_id = ProductId::generate();
        let variation_id = VariationId::generate();

        let view = show_gallery(product_id, Some(variation_id), &repo).unwrap();
        assert_eq!(view.gallery.total_images, 0);
        assert_eq!(view.gallery.display_mode, DisplayMode::Page);
        assert_eq!(view.gallery.current_variation_id, Some(variation_id));
        assert!(view.images.is_empty());

        let again = show_gallery(product_id, None, &repo).unwrap();
        assert_eq!(again.gallery.id, view.gallery.id);
    }

    #[test]
    fn first_image_sets_main_image_only_once() {
        let repo = InMemoryRepository::default();
        let gallery = show_gallery(ProductId::generate(), None, &repo)
            .unwrap()
            .gallery;

        let first = create_gallery_image(gallery.id, image("a", ImageCategory::Lateral, 1), &repo)
            .unwrap();
        assert_eq!(first.gallery.main_image_url, Some(url("a.jpg")));
        assert_eq!(first.gallery.total_images, 1);

        let second =
            create_gallery_image(gallery.id, image("b", ImageCategory::Frontal, 2), &repo).unwrap();
        assert_eq!(second.gallery.main_image_url, Some(url("a.jpg")));
        assert_eq!(second.gallery.total_images, 2);
    }

    #[test]
    fn images_are_ordered_by_priority_then_display_order() {
        let repo = InMemoryRepository::default();
        let product_id = ProductId::generate();
        let gallery = show_gallery(product_id, None, &repo).unwrap().gallery;
        for (name, category, order) in [
            ("ctx", ImageCategory::Contexto, 1),
            ("front2", ImageCategory::Frontal, 2),
            ("front1", ImageCategory::Frontal, 1),
            ("detail", ImageCategory::Detalle, 1),
        ] {
            create_gallery_image(gallery.id, image(name, category, order), &repo).unwrap();
        }

        let view = show_gallery(product_id, Some(VariationId::generate()), &repo).unwrap();
        let urls: Vec<&str> = view
            .images
            .iter()
            .map(|i| i.full_size_url.as_str())
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://cdn.example.com/front1.jpg",
                "https://cdn.example.com/front2.jpg",
                "https://cdn.example.com/detail.jpg",
                "https://cdn.example.com/ctx.jpg",
            ]
        );
    }

    #[test]
    fn gallery_capacity_is_enforced() {
        let repo = InMemoryRepository::new(StoreLimits {
            max_gallery_images: 2,
            ..StoreLimits::default()
        });
        let gallery = show_gallery(ProductId::generate(), None, &repo)
            .unwrap()
            .gallery;
        for order in 1..=2 {
            create_gallery_image(gallery.id, image("x", ImageCategory::Frontal, order), &repo)
                .unwrap();
        }
        let err = create_gallery_image(gallery.id, image("y", ImageCategory::Frontal, 3), &repo)
            .unwrap_err();
        assert_eq!(err.kind(), "capacity_exceeded");
    }

    #[test]
    fn image_for_missing_gallery_is_not_found() {
        let repo = InMemoryRepository::default();
        assert_eq!(
            create_gallery_image(
                GalleryId::generate(),
                image("x", ImageCategory::Frontal, 1),
                &repo
            ),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn update_recomputes_priority_and_delete_recounts() {
        let repo = InMemoryRepository::default();
        let gallery = show_gallery(ProductId::generate(), None, &repo)
            .unwrap()
            .gallery;
        let first = create_gallery_image(gallery.id, image("a", ImageCategory::Perspectiva, 1), &repo)
            .unwrap()
            .image;
        create_gallery_image(gallery.id, image("b", ImageCategory::Frontal, 2), &repo).unwrap();

        let updated = update_gallery_image(
            first.id,
            GalleryImageChanges {
                category: Some(ImageCategory::Lateral),
                ..Default::default()
            },
            &repo,
        )
        .unwrap();
        assert_eq!(updated.image.lazy_load_priority.get(), 2);
        assert_eq!(updated.image.display_order.get(), 1);

        let deleted = delete_gallery_image(first.id, &repo).unwrap();
        assert_eq!(deleted.gallery.total_images, 1);
        assert_eq!(deleted.gallery.main_image_url, Some(url("a.jpg")));
        assert_eq!(
            delete_gallery_image(first.id, &repo),
            Err(ServiceError::NotFound)
        );
        assert_eq!(
            update_gallery_image(first.id, GalleryImageChanges::default(), &repo),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn variations_are_not_validated_against_products() {
        let repo = InMemoryRepository::default();
        let product_id = ProductId::generate();
        create_variation(variation(product_id, "Roble"), &repo).unwrap();
        create_variation(variation(product_id, "Nogal"), &repo).unwrap();

        let view = show_gallery(product_id, None, &repo).unwrap();
        assert_eq!(view.variations.len(), 2);
        assert!(view.variations.iter().all(|v| v.is_default));
    }

    #[test]
    fn gallery_state_can_switch_to_modal() {
        let repo = InMemoryRepository::default();
        let gallery = show_gallery(ProductId::generate(), None, &repo)
            .unwrap()
            .gallery;
        let updated = update_gallery_state(
            gallery.id,
            GalleryStateChanges {
                display_mode: Some(DisplayMode::Modal),
                current_image_index: Some(4),
                ..Default::default()
            },
            &repo,
        )
        .unwrap();
        assert_eq!(updated.display_mode, DisplayMode::Modal);
        assert_eq!(updated.current_image_index, 0);
    }

    #[test]
    fn images_and_variations_are_addressable_by_id() {
        let repo = InMemoryRepository::default();
        let product_id = ProductId::generate();
        let gallery = show_gallery(product_id, None, &repo).unwrap().gallery;
        let image = create_gallery_image(gallery.id, image("a", ImageCategory::Detalle, 1), &repo)
            .unwrap()
            .image;
        let variation = create_variation(variation(product_id, "Roble"), &repo).unwrap();

        assert_eq!(get_gallery_image(image.id, &repo).unwrap(), image);
        assert_eq!(get_variation(variation.id, &repo).unwrap(), variation);

        delete_gallery_image(image.id, &repo).unwrap();
        assert_eq!(
            get_gallery_image(image.id, &repo),
            Err(ServiceError::NotFound)
        );
        assert_eq!(
            get_variation(VariationId::generate(), &repo),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn variations_are_listed_per_product_in_creation_order() {
        let repo = InMemoryRepository::default();
        let product_id = ProductId::generate();
        create_variation(variation(product_id, "Roble"), &repo).unwrap();
        create_variation(variation(ProductId::generate(), "Pino"), &repo).unwrap();
        create_variation(variation(product_id, "Nogal"), &repo).unwrap();

        let names: Vec<String> = list_variations(product_id, &repo)
            .unwrap()
            .into_iter()
            .map(|v| v.name.to_string())
            .collect();
        assert_eq!(names, vec!["Roble", "Nogal"]);
        assert!(list_variations(ProductId::generate(), &repo).unwrap().is_empty());
    }

    #[test]
    fn gallery_view_total_matches_returned_images() {
        let repo = InMemoryRepository::default();
        let product_id = ProductId::generate();
        let gallery = show_gallery(product_id, None, &repo).unwrap().gallery;
        for order in 1..=3 {
            create_gallery_image(gallery.id, image("x", ImageCategory::Frontal, order), &repo)
                .unwrap();
        }

        let view = show_gallery(product_id, None, &repo).unwrap();
        assert_eq!(view.gallery.total_images, view.images.len());
        assert_eq!(view.images.len(), 3);
    }
}
