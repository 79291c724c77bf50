use serde::{Deserialize, Serialize};

use crate::domain::types::{ColorCode, ProductId, VariationId, VariationName, VariationType};

/// A selectable variant of a product. Several variations of one product may
/// carry `is_default`; no single-default rule is enforced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductVariation {
    pub id: VariationId,
    pub product_id: ProductId,
    pub name: VariationName,
    pub variation_type: VariationType,
    pub color_code: Option<ColorCode>,
    pub is_default: bool,
}

/// Data required to insert a new [`ProductVariation`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProductVariation {
    pub product_id: ProductId,
    pub name: VariationName,
    pub variation_type: VariationType,
    pub color_code: Option<ColorCode>,
    pub is_default: bool,
}

impl NewProductVariation {
    pub fn into_variation(self, id: VariationId) -> ProductVariation {
        ProductVariation {
            id,
            product_id: self.product_id,
            name: self.name,
            variation_type: self.variation_type,
            color_code: self.color_code,
            is_default: self.is_default,
        }
    }
}
