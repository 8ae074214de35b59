use async_trait::async_trait;

use super::errors::DataAccessError;
use crate::food::{Ingredient, IngredientDraft};
use crate::ids::IngredientId;

/// Ingredient catalog persisted by the backend.
#[async_trait]
pub trait IngredientRepositoryPort: Send + Sync {
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, DataAccessError>;

    /// Server-side name search.
    async fn search_ingredients(&self, search: &str) -> Result<Vec<Ingredient>, DataAccessError>;

    async fn add_ingredient(&self, draft: &IngredientDraft) -> Result<(), DataAccessError>;

    async fn update_ingredient(
        &self,
        id: IngredientId,
        ingredient: &Ingredient,
    ) -> Result<(), DataAccessError>;

    async fn delete_ingredients(&self, ids: &[IngredientId]) -> Result<(), DataAccessError>;
}
