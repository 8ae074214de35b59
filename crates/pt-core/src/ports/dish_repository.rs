use async_trait::async_trait;

use super::errors::DataAccessError;
use crate::food::{Dish, DishIngredientDto};
use crate::ids::DishId;

#[async_trait]
pub trait DishRepositoryPort: Send + Sync {
    async fn list_dishes(&self) -> Result<Vec<Dish>, DataAccessError>;

    async fn search_dishes(&self, search: &str) -> Result<Vec<Dish>, DataAccessError>;

    async fn add_dish(&self, dto: &DishIngredientDto) -> Result<(), DataAccessError>;

    /// Replace a dish and its full ingredient list.
    async fn update_dish(&self, id: DishId, dto: &DishIngredientDto)
        -> Result<(), DataAccessError>;

    async fn delete_dishes(&self, ids: &[DishId]) -> Result<(), DataAccessError>;
}
