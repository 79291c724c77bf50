use crate::domain::clock::Clock;
use crate::domain::product::{NewProduct, ProductChanges};
use crate::domain::types::{InteractionKind, ProductCode, ProductId};
use crate::dto::products::{DeletionMessage, ProductDetails};
use crate::repository::{ProductReader, ProductWriter, RepositoryError};

use super::{ServiceError, ServiceResult};

/// Creates a product with a fresh identifier, timestamps and zero counters.
///
/// Fails with `DuplicateCode` when an active product already uses the code,
/// `CapacityExceeded` when the product store is full and `TypeConstraint`
/// when the promotional price is missing or not below the price.
pub fn create_product<R, C>(
    payload: NewProduct,
    repo: &R,
    clock: &C,
) -> ServiceResult<ProductDetails>
where
    R: ProductWriter,
    C: Clock + ?Sized,
{
    payload.check_promotion()?;

    let now = clock.now();
    match repo.create_product(&payload, now) {
        Ok(product) => {
            log::info!("Created product {} ({})", product.id, product.code);
            Ok(ProductDetails::new(product, now))
        }
        Err(e @ (RepositoryError::DuplicateCode(_) | RepositoryError::CapacityExceeded { .. })) => {
            log::warn!("Rejected product {}: {e}", payload.code);
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn get_product<R, C>(id: ProductId, repo: &R, clock: &C) -> ServiceResult<ProductDetails>
where
    R: ProductReader,
    C: Clock + ?Sized,
{
    match repo.get_product_by_id(id) {
        Ok(Some(product)) => Ok(ProductDetails::new(product, clock.now())),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Replaces the editable fields of a product.
///
/// Keeping the product's own code is never a duplicate.
pub fn update_product<R, C>(
    id: ProductId,
    payload: NewProduct,
    repo: &R,
    clock: &C,
) -> ServiceResult<ProductDetails>
where
    R: ProductWriter,
    C: Clock + ?Sized,
{
    payload.check_promotion()?;

    let now = clock.now();
    let changes = ProductChanges::from(payload);
    match repo.update_product(id, &changes, now) {
        Ok(product) => {
            log::debug!("Updated product {id}");
            Ok(ProductDetails::new(product, now))
        }
        Err(e @ RepositoryError::DuplicateCode(_)) => {
            log::warn!("Rejected update of product {id}: {e}");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Soft-deletes a product. A second delete of the same id is `NotFound`.
pub fn delete_product<R>(id: ProductId, repo: &R) -> ServiceResult<DeletionMessage>
where
    R: ProductWriter,
{
    match repo.soft_delete_product(id) {
        Ok(product) => {
            log::info!("Deleted product {} ({})", product.id, product.code);
            Ok(DeletionMessage {
                message: format!("Product {} deleted", product.code),
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Counts a shopper interaction and returns the product with its new score.
pub fn record_interaction<R, C>(
    id: ProductId,
    kind: InteractionKind,
    repo: &R,
    clock: &C,
) -> ServiceResult<ProductDetails>
where
    R: ProductWriter,
    C: Clock + ?Sized,
{
    let now = clock.now();
    match repo.record_interaction(id, kind, now) {
        Ok(product) => Ok(ProductDetails::new(product, now)),
        Err(e) => Err(e.into()),
    }
}

pub fn product_code_exists<R>(
    code: &ProductCode,
    exclude: Option<ProductId>,
    repo: &R,
) -> ServiceResult<bool>
where
    R: ProductReader,
{
    repo.code_exists(code, exclude).map_err(|e| {
        log::error!("Failed to check product code: {e}");
        ServiceError::Internal
    })
}
