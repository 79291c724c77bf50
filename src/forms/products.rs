use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::NewProduct;
use crate::domain::types::{
    Availability, ImageUrl, InteractionKind, ProductCode, ProductName, ProductPrice,
    TypeConstraintError,
};

/// Body of the create and replace product endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub code: String,
    #[validate(url)]
    pub image: String,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub availability: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_promotional: bool,
    #[validate(range(min = 0.0))]
    pub promotional_price: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("Product form validation failed: {0}")]
    Validation(String),
    #[error("Product form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ProductForm> for NewProduct {
    type Error = ProductFormError;

    fn try_from(value: ProductForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let product = NewProduct {
            name: ProductName::new(value.name)?,
            code: ProductCode::new(value.code)?,
            image: ImageUrl::new(value.image)?,
            price: value.price.map(ProductPrice::new).transpose()?,
            availability: Availability::try_from(value.availability)?,
            is_featured: value.is_featured,
            is_promotional: value.is_promotional,
            promotional_price: value.promotional_price.map(ProductPrice::new).transpose()?,
        };
        product.check_promotion()?;
        Ok(product)
    }
}

/// Body of the interaction endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct InteractionForm {
    #[validate(length(min = 1))]
    pub kind: String,
}

#[derive(Debug, Error)]
pub enum InteractionFormError {
    #[error("Interaction form validation failed: {0}")]
    Validation(String),
    #[error("Interaction form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for InteractionFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for InteractionFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<InteractionForm> for InteractionKind {
    type Error = InteractionFormError;

    fn try_from(value: InteractionForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(InteractionKind::try_from(value.kind.as_str())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> ProductForm {
        ProductForm {
            name: "Mesa Roble".into(),
            code: "mes-0042".into(),
            image: "https://cdn.example.com/mesa.jpg".into(),
            price: Some(250.0),
            availability: "out_of_stock".into(),
            is_featured: false,
            is_promotional: true,
            promotional_price: Some(199.0),
        }
    }

    #[test]
    fn converts_valid_form() {
        let product: NewProduct = sample_form().try_into().unwrap();
        assert_eq!(product.code, "MES-0042");
        assert_eq!(product.availability, Availability::OutOfStock);
        assert_eq!(product.promotional_price.unwrap().get(), 199.0);
    }

    #[test]
    fn rejects_promotion_without_discount() {
        let mut form = sample_form();
        form.promotional_price = Some(300.0);
        let result: Result<NewProduct, _> = form.try_into();
        assert!(matches!(result, Err(ProductFormError::TypeConstraint(_))));
    }

    #[test]
    fn rejects_overlong_name() {
        let mut form = sample_form();
        form.name = "x".repeat(101);
        let result: Result<NewProduct, _> = form.try_into();
        assert!(matches!(result, Err(ProductFormError::Validation(_))));
    }

    #[test]
    fn code_is_trimmed_before_format_check() {
        let mut form = sample_form();
        form.code = " abc-1234 ".into();
        let product: NewProduct = form.try_into().unwrap();
        assert_eq!(product.code, "ABC-1234");
    }

    #[test]
    fn rejects_malformed_code() {
        let mut form = sample_form();
        form.code = "ABCD-123".into();
        let result: Result<NewProduct, _> = form.try_into();
        assert!(matches!(result, Err(ProductFormError::TypeConstraint(_))));
    }

    #[test]
    fn rejects_negative_price() {
        let mut form = sample_form();
        form.price = Some(-1.0);
        let result: Result<NewProduct, _> = form.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn parses_interaction_kind() {
        let kind: InteractionKind = InteractionForm {
            kind: "click".into(),
        }
        .try_into()
        .unwrap();
        assert_eq!(kind, InteractionKind::Click);
    }
}
