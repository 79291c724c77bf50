//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` impls live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

/// Expected repository failures keep their kind; `ValidationError` surfaces as
/// a type constraint.
impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::DuplicateCode(_) => ServiceError::DuplicateCode(val.to_string()),
            RepositoryError::CapacityExceeded { .. } => {
                ServiceError::CapacityExceeded(val.to_string())
            }
            RepositoryError::ValidationError(message) => ServiceError::TypeConstraint(message),
        }
    }
}

#[cfg(feature = "server")]
mod form_errors {
    use crate::forms::catalog::CatalogQueryError;
    use crate::forms::galleries::{
        CreateImageFormError, CreateVariationFormError, UpdateGalleryFormError,
        UpdateImageFormError,
    };
    use crate::forms::products::{InteractionFormError, ProductFormError};
    use crate::services::ServiceError;

    macro_rules! form_error_into_service_error {
        ($($error:ty),+ $(,)?) => {
            $(
                impl From<$error> for ServiceError {
                    fn from(val: $error) -> Self {
                        ServiceError::Form(val.to_string())
                    }
                }
            )+
        };
    }

    form_error_into_service_error!(
        CatalogQueryError,
        ProductFormError,
        InteractionFormError,
        CreateImageFormError,
        UpdateImageFormError,
        UpdateGalleryFormError,
        CreateVariationFormError,
    );
}
