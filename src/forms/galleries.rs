use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::gallery::{
    GalleryImageChanges, GalleryStateChanges, NewGalleryImage, ResolutionUrls,
};
use crate::domain::types::{
    ColorCode, DisplayMode, DisplayOrder, ImageCaption, ImageCategory, ImageDescription,
    ImageUrl, ProductId, TypeConstraintError, VariationId, VariationName, VariationType,
};
use crate::domain::variation::NewProductVariation;

fn default_true() -> bool {
    true
}

/// Blank text clears an optional field.
fn optional_text<T, F>(value: Option<String>, build: F) -> Result<Option<T>, TypeConstraintError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    match value {
        Some(text) if !text.trim().is_empty() => build(text).map(Some),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResolutionUrlsForm {
    #[validate(url)]
    pub thumbnail: String,
    #[validate(url)]
    pub medium: String,
    #[validate(url)]
    pub large: String,
    #[validate(url)]
    pub original: String,
}

impl TryFrom<ResolutionUrlsForm> for ResolutionUrls {
    type Error = TypeConstraintError;

    fn try_from(value: ResolutionUrlsForm) -> Result<Self, Self::Error> {
        Ok(Self {
            thumbnail: ImageUrl::new(value.thumbnail)?,
            medium: ImageUrl::new(value.medium)?,
            large: ImageUrl::new(value.large)?,
            original: ImageUrl::new(value.original)?,
        })
    }
}

/// Body of the create image endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateImageForm {
    #[validate(url)]
    pub thumbnail_url: String,
    #[validate(url)]
    pub full_size_url: String,
    #[validate(nested)]
    pub resolutions: ResolutionUrlsForm,
    #[validate(range(min = 1))]
    pub display_order: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub category: String,
    #[validate(length(max = 200))]
    pub caption: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub show_caption: Option<bool>,
}

#[derive(Debug, Error)]
pub enum CreateImageFormError {
    #[error("Create image form validation failed: {0}")]
    Validation(String),
    #[error("Create image form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreateImageFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateImageFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateImageForm> for NewGalleryImage {
    type Error = CreateImageFormError;

    fn try_from(value: CreateImageForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            thumbnail_url: ImageUrl::new(value.thumbnail_url)?,
            full_size_url: ImageUrl::new(value.full_size_url)?,
            resolutions: value.resolutions.try_into()?,
            display_order: DisplayOrder::new(value.display_order)?,
            is_active: value.is_active,
            category: ImageCategory::try_from(value.category)?,
            caption: optional_text(value.caption, ImageCaption::new)?,
            description: optional_text(value.description, ImageDescription::new)?,
            show_caption: value.show_caption,
        })
    }
}

/// Body of the partial image update endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateImageForm {
    #[validate(url)]
    pub thumbnail_url: Option<String>,
    #[validate(url)]
    pub full_size_url: Option<String>,
    #[validate(nested)]
    pub resolutions: Option<ResolutionUrlsForm>,
    #[validate(range(min = 1))]
    pub display_order: Option<u32>,
    pub is_active: Option<bool>,
    pub category: Option<String>,
    #[validate(length(max = 200))]
    pub caption: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub show_caption: Option<bool>,
}

#[derive(Debug, Error)]
pub enum UpdateImageFormError {
    #[error("Update image form validation failed: {0}")]
    Validation(String),
    #[error("Update image form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateImageFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateImageFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateImageForm> for GalleryImageChanges {
    type Error = UpdateImageFormError;

    fn try_from(value: UpdateImageForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            thumbnail_url: value.thumbnail_url.map(ImageUrl::new).transpose()?,
            full_size_url: value.full_size_url.map(ImageUrl::new).transpose()?,
            resolutions: value
                .resolutions
                .map(ResolutionUrls::try_from)
                .transpose()?,
            display_order: value.display_order.map(DisplayOrder::new).transpose()?,
            is_active: value.is_active,
            category: value
                .category
                .map(ImageCategory::try_from)
                .transpose()?,
            caption: value
                .caption
                .map(|text| optional_text(Some(text), ImageCaption::new))
                .transpose()?,
            description: value
                .description
                .map(|text| optional_text(Some(text), ImageDescription::new))
                .transpose()?,
            show_caption: value.show_caption,
        })
    }
}

/// Body of the gallery viewer state endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGalleryForm {
    pub current_image_index: Option<usize>,
    /// Blank clears the current variation.
    pub current_variation_id: Option<String>,
    pub display_mode: Option<String>,
}

#[derive(Debug, Error)]
pub enum UpdateGalleryFormError {
    #[error("Update gallery form validation failed: {0}")]
    Validation(String),
    #[error("Update gallery form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateGalleryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateGalleryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateGalleryForm> for GalleryStateChanges {
    type Error = UpdateGalleryFormError;

    fn try_from(value: UpdateGalleryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            current_image_index: value.current_image_index,
            current_variation_id: value
                .current_variation_id
                .map(|id| optional_text(Some(id), |id| VariationId::parse(&id)))
                .transpose()?,
            display_mode: value
                .display_mode
                .map(DisplayMode::try_from)
                .transpose()?,
        })
    }
}

/// Body of the create variation endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVariationForm {
    pub product_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub variation_type: String,
    pub color_code: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Error)]
pub enum CreateVariationFormError {
    #[error("Create variation form validation failed: {0}")]
    Validation(String),
    #[error("Create variation form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreateVariationFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateVariationFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateVariationForm> for NewProductVariation {
    type Error = CreateVariationFormError;

    fn try_from(value: CreateVariationForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            product_id: ProductId::parse(&value.product_id)?,
            name: VariationName::new(value.name)?,
            variation_type: VariationType::try_from(value.variation_type)?,
            color_code: optional_text(value.color_code, ColorCode::new)?,
            is_default: value.is_default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolutions() -> ResolutionUrlsForm {
        ResolutionUrlsForm {
            thumbnail: "https://cdn.example.com/t.jpg".into(),
            medium: "https://cdn.example.com/m.jpg".into(),
            large: "https://cdn.example.com/l.jpg".into(),
            original: "https://cdn.example.com/o.jpg".into(),
        }
    }

    fn create_form() -> CreateImageForm {
        CreateImageForm {
            thumbnail_url: "https://cdn.example.com/t.jpg".into(),
            full_size_url: "https://cdn.example.com/f.jpg".into(),
            resolutions: resolutions(),
            display_order: 1,
            is_active: true,
            category: "frontal".into(),
            caption: Some("  ".into()),
            description: None,
            show_caption: None,
        }
    }

    #[test]
    fn blank_caption_becomes_none() {
        let image: NewGalleryImage = create_form().try_into().unwrap();
        assert!(image.caption.is_none());
        assert_eq!(image.category, ImageCategory::Frontal);
    }

    #[test]
    fn rejects_long_caption() {
        let mut form = create_form();
        form.caption = Some("c".repeat(201));
        let result: Result<NewGalleryImage, _> = form.try_into();
        assert!(matches!(result, Err(CreateImageFormError::Validation(_))));
    }

    #[test]
    fn rejects_unknown_category() {
        let mut form = create_form();
        form.category = "aerea".into();
        let result: Result<NewGalleryImage, _> = form.try_into();
        assert!(matches!(result, Err(CreateImageFormError::TypeConstraint(_))));
    }

    #[test]
    fn rejects_invalid_nested_url() {
        let mut form = create_form();
        form.resolutions.large = "not a url".into();
        let result: Result<NewGalleryImage, _> = form.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn update_form_clears_caption_with_blank() {
        let form = UpdateImageForm {
            caption: Some(String::new()),
            category: Some("contexto".into()),
            ..Default::default()
        };
        let changes: GalleryImageChanges = form.try_into().unwrap();
        assert_eq!(changes.caption, Some(None));
        assert_eq!(changes.category, Some(ImageCategory::Contexto));
        assert!(changes.full_size_url.is_none());
    }

    #[test]
    fn variation_form_parses_color() {
        let form = CreateVariationForm {
            product_id: ProductId::generate().to_string(),
            name: "Rojo".into(),
            variation_type: "color".into(),
            color_code: Some("ff0000".into()),
            is_default: true,
        };
        let variation: NewProductVariation = form.try_into().unwrap();
        assert_eq!(variation.color_code.unwrap().as_str(), "#FF0000");
    }

    #[test]
    fn gallery_form_clears_variation_with_blank() {
        let form = UpdateGalleryForm {
            current_variation_id: Some(String::new()),
            display_mode: Some("modal".into()),
            ..Default::default()
        };
        let changes: GalleryStateChanges = form.try_into().unwrap();
        assert_eq!(changes.current_variation_id, Some(None));
        assert_eq!(changes.display_mode, Some(DisplayMode::Modal));
    }
}
