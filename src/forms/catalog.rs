use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::catalog::CatalogFilters;
use crate::domain::types::{
    ItemsPerPage, LayoutType, NavigationMode, SortCriterion, TypeConstraintError,
};

/// Query string of the catalog endpoint. Every field is optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CatalogQuery {
    pub layout: Option<String>,
    pub sort: Option<String>,
    pub navigation: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    pub items_per_page: Option<usize>,
    pub loaded_items_count: Option<usize>,
}

#[derive(Debug, Error)]
pub enum CatalogQueryError {
    #[error("Catalog query validation failed: {0}")]
    Validation(String),
    #[error("Catalog query contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CatalogQueryError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CatalogQueryError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CatalogQuery> for CatalogFilters {
    type Error = CatalogQueryError;

    fn try_from(value: CatalogQuery) -> Result<Self, Self::Error> {
        value.validate()?;
        let defaults = CatalogFilters::default();
        Ok(Self {
            layout: value
                .layout
                .as_deref()
                .map(LayoutType::try_from)
                .transpose()?
                .unwrap_or(defaults.layout),
            sort: value
                .sort
                .as_deref()
                .map(SortCriterion::try_from)
                .transpose()?
                .unwrap_or(defaults.sort),
            navigation: value
                .navigation
                .as_deref()
                .map(NavigationMode::try_from)
                .transpose()?
                .unwrap_or(defaults.navigation),
            page: value.page.unwrap_or(defaults.page),
            items_per_page: value
                .items_per_page
                .map(ItemsPerPage::try_from)
                .transpose()?
                .unwrap_or(defaults.items_per_page),
            loaded_items_count: value
                .loaded_items_count
                .unwrap_or(defaults.loaded_items_count),
        })
    }
}
