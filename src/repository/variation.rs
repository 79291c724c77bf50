use crate::domain::types::{ProductId, VariationId};
use crate::domain::variation::{NewProductVariation, ProductVariation};
use crate::repository::{InMemoryRepository, RepositoryResult, VariationReader, VariationWriter};

impl VariationReader for InMemoryRepository {
    fn list_variations(&self, product_id: ProductId) -> RepositoryResult<Vec<ProductVariation>> {
        let state = self.state.read();
        Ok(state
            .variations
            .filter(|v| v.product_id == product_id)
            .into_iter()
            .cloned()
            .collect())
    }

    fn get_variation_by_id(&self, id: VariationId) -> RepositoryResult<Option<ProductVariation>> {
        let state = self.state.read();
        Ok(state.variations.get_by_id(&id).cloned())
    }
}

impl VariationWriter for InMemoryRepository {
    fn create_variation(
        &self,
        variation: &NewProductVariation,
    ) -> RepositoryResult<ProductVariation> {
        let mut state = self.state.write();
        state
            .variations
            .create(variation.clone().into_variation(VariationId::generate()))
    }
}
