use chrono::{DateTime, Utc};

use crate::domain::product::{NewProduct, Product, ProductChanges};
use crate::domain::types::{InteractionKind, ProductCode, ProductId};
use crate::repository::store::EntityStore;
use crate::repository::{
    InMemoryRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult,
};

fn code_taken(
    products: &EntityStore<Product>,
    code: &ProductCode,
    exclude: Option<ProductId>,
) -> bool {
    products.any_active(|p| p.code == *code && Some(p.id) != exclude)
}

impl ProductReader for InMemoryRepository {
    fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        let state = self.state.read();
        Ok(state.products.get_all().into_iter().cloned().collect())
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let state = self.state.read();
        Ok(state.products.get_by_id(&id).cloned())
    }

    fn get_product_for_audit(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let state = self.state.read();
        Ok(state.products.get_for_audit(&id).cloned())
    }

    fn code_exists(
        &self,
        code: &ProductCode,
        exclude: Option<ProductId>,
    ) -> RepositoryResult<bool> {
        let state = self.state.read();
        Ok(code_taken(&state.products, code, exclude))
    }

    fn count_products(&self) -> RepositoryResult<usize> {
        let state = self.state.read();
        Ok(state.products.len())
    }
}

impl ProductWriter for InMemoryRepository {
    fn create_product(
        &self,
        product: &NewProduct,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Product> {
        product.check_promotion()?;

        let mut state = self.state.write();
        if code_taken(&state.products, &product.code, None) {
            return Err(RepositoryError::DuplicateCode(product.code.to_string()));
        }
        let record = product.clone().into_product(ProductId::generate(), now);
        state.products.create(record)
    }

    fn update_product(
        &self,
        id: ProductId,
        changes: &ProductChanges,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Product> {
        let mut state = self.state.write();
        if !state.products.exists(&id) {
            return Err(RepositoryError::NotFound);
        }
        if let Some(code) = &changes.code {
            if code_taken(&state.products, code, Some(id)) {
                return Err(RepositoryError::DuplicateCode(code.to_string()));
            }
        }
        state.products.update(&id, |product| {
            product.apply(changes.clone(), now)?;
            Ok(())
        })
    }

    fn record_interaction(
        &self,
        id: ProductId,
        kind: InteractionKind,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Product> {
        let mut state = self.state.write();
        state.products.update(&id, |product| {
            product.record_interaction(kind, now);
            Ok(())
        })
    }

    fn soft_delete_product(&self, id: ProductId) -> RepositoryResult<Product> {
        let mut state = self.state.write();
        state.products.soft_delete(&id)
    }
}
