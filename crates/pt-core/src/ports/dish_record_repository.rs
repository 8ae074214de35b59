use async_trait::async_trait;

use super::errors::DataAccessError;
use crate::food::{DishRecord, DishRecordIngredientDto, FoodRecordAnalysis, Page, TimeWindow};
use crate::ids::DishRecordId;

/// Consumption records, paged on the server.
///
/// 消耗记录仓储（服务端分页）。
#[async_trait]
pub trait DishRecordRepositoryPort: Send + Sync {
    async fn list_dish_records(
        &self,
        page: usize,
        size: usize,
    ) -> Result<Page<DishRecord>, DataAccessError>;

    async fn search_dish_records(
        &self,
        search: &str,
        page: usize,
        size: usize,
    ) -> Result<Page<DishRecord>, DataAccessError>;

    async fn add_dish_record(&self, dto: &DishRecordIngredientDto) -> Result<(), DataAccessError>;

    async fn update_dish_record(
        &self,
        id: DishRecordId,
        dto: &DishRecordIngredientDto,
    ) -> Result<(), DataAccessError>;

    async fn delete_dish_records(&self, ids: &[DishRecordId]) -> Result<(), DataAccessError>;

    /// Per-ingredient usage over the window.
    async fn analyze(&self, window: TimeWindow) -> Result<FoodRecordAnalysis, DataAccessError>;
}
