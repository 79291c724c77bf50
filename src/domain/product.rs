use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::scoring;
use crate::domain::types::{
    Availability, ImageUrl, InteractionKind, ProductCode, ProductId, ProductName, ProductPrice,
    TypeConstraintError,
};

/// A catalog item together with its interaction counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub code: ProductCode,
    pub image: ImageUrl,
    pub price: Option<ProductPrice>,
    pub availability: Availability,
    pub is_featured: bool,
    pub is_promotional: bool,
    pub promotional_price: Option<ProductPrice>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub view_count: u64,
    pub click_count: u64,
    pub interaction_count: u64,
    /// Always the weighted sum of the three counters above.
    pub popularity_score: u64,
    pub popularity_updated_at: Option<DateTime<Utc>>,
    /// Cleared by soft delete; inactive products are invisible to readers.
    pub is_active: bool,
}

/// Information required to create a new [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub code: ProductCode,
    pub image: ImageUrl,
    pub price: Option<ProductPrice>,
    pub availability: Availability,
    pub is_featured: bool,
    pub is_promotional: bool,
    pub promotional_price: Option<ProductPrice>,
}

/// Field-wise changes merged into an existing [`Product`]. `None` keeps the
/// stored value; nullable fields use a nested option to allow clearing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<ProductName>,
    pub code: Option<ProductCode>,
    pub image: Option<ImageUrl>,
    pub price: Option<Option<ProductPrice>>,
    pub availability: Option<Availability>,
    pub is_featured: Option<bool>,
    pub is_promotional: Option<bool>,
    pub promotional_price: Option<Option<ProductPrice>>,
}

impl From<NewProduct> for ProductChanges {
    fn from(value: NewProduct) -> Self {
        Self {
            name: Some(value.name),
            code: Some(value.code),
            image: Some(value.image),
            price: Some(value.price),
            availability: Some(value.availability),
            is_featured: Some(value.is_featured),
            is_promotional: Some(value.is_promotional),
            promotional_price: Some(value.promotional_price),
        }
    }
}

/// A promotional product needs a promotional price, and that price must stay
/// strictly below the regular price whenever both are known.
pub fn check_promotion(
    price: Option<ProductPrice>,
    is_promotional: bool,
    promotional_price: Option<ProductPrice>,
) -> Result<(), TypeConstraintError> {
    if !is_promotional {
        return Ok(());
    }
    let Some(promotional_price) = promotional_price else {
        return Err(TypeConstraintError::InvalidValue(
            "promotional price is required for promotional products".to_string(),
        ));
    };
    match price {
        Some(price) if promotional_price.get() >= price.get() => {
            Err(TypeConstraintError::InvalidValue(format!(
                "promotional price {promotional_price} must be lower than price {price}"
            )))
        }
        _ => Ok(()),
    }
}

impl NewProduct {
    /// Builds the stored record with zeroed counters.
    pub fn into_product(self, id: ProductId, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            code: self.code,
            image: self.image,
            price: self.price,
            availability: self.availability,
            is_featured: self.is_featured,
            is_promotional: self.is_promotional,
            promotional_price: self.promotional_price,
            created_at: now,
            updated_at: now,
            view_count: 0,
            click_count: 0,
            interaction_count: 0,
            popularity_score: 0,
            popularity_updated_at: None,
            is_active: true,
        }
    }

    pub fn check_promotion(&self) -> Result<(), TypeConstraintError> {
        check_promotion(self.price, self.is_promotional, self.promotional_price)
    }
}

impl Product {
    pub fn is_new(&self, now: DateTime<Utc>) -> bool {
        scoring::is_new(self.created_at, now)
    }

    /// Merges `changes` and re-checks the promotion invariant on the result.
    /// On error `self` is left untouched.
    pub fn apply(
        &mut self,
        changes: ProductChanges,
        now: DateTime<Utc>,
    ) -> Result<(), TypeConstraintError> {
        let price = changes.price.unwrap_or(self.price);
        let is_promotional = changes.is_promotional.unwrap_or(self.is_promotional);
        let promotional_price = changes.promotional_price.unwrap_or(self.promotional_price);
        check_promotion(price, is_promotional, promotional_price)?;

        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(code) = changes.code {
            self.code = code;
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
        if let Some(availability) = changes.availability {
            self.availability = availability;
        }
        if let Some(is_featured) = changes.is_featured {
            self.is_featured = is_featured;
        }
        self.price = price;
        self.is_promotional = is_promotional;
        self.promotional_price = promotional_price;
        self.updated_at = now;
        Ok(())
    }

    /// Bumps one counter and recomputes the popularity score.
    pub fn record_interaction(&mut self, kind: InteractionKind, now: DateTime<Utc>) {
        match kind {
            InteractionKind::View => self.view_count = self.view_count.saturating_add(1),
            InteractionKind::Click => self.click_count = self.click_count.saturating_add(1),
            InteractionKind::Interaction => {
                self.interaction_count = self.interaction_count.saturating_add(1)
            }
        }
        self.popularity_score =
            scoring::popularity_score(self.view_count, self.click_count, self.interaction_count);
        self.popularity_updated_at = Some(now);
    }
}
