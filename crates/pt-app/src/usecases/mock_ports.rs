//! Mock implementations of the data-access ports for use-case tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use pt_core::food::{
    Dish, DishIngredientDto, DishRecord, DishRecordIngredientDto, FoodRecordAnalysis,
    Ingredient, IngredientDraft, Page, TimeWindow,
};
use pt_core::ports::{
    ClockPort, DataAccessError, DishRecordRepositoryPort, DishRepositoryPort,
    IngredientRepositoryPort, NotificationLevel, NotificationPort,
};
use pt_core::{DishId, DishRecordId, IngredientId};

mock! {
    pub IngredientRepo {}

    #[async_trait]
    impl IngredientRepositoryPort for IngredientRepo {
        async fn list_ingredients(&self) -> Result<Vec<Ingredient>, DataAccessError>;
        async fn search_ingredients(&self, search: &str) -> Result<Vec<Ingredient>, DataAccessError>;
        async fn add_ingredient(&self, draft: &IngredientDraft) -> Result<(), DataAccessError>;
        async fn update_ingredient(
            &self,
            id: IngredientId,
            ingredient: &Ingredient,
        ) -> Result<(), DataAccessError>;
        async fn delete_ingredients(&self, ids: &[IngredientId]) -> Result<(), DataAccessError>;
    }
}

mock! {
    pub DishRepo {}

    #[async_trait]
    impl DishRepositoryPort for DishRepo {
        async fn list_dishes(&self) -> Result<Vec<Dish>, DataAccessError>;
        async fn search_dishes(&self, search: &str) -> Result<Vec<Dish>, DataAccessError>;
        async fn add_dish(&self, dto: &DishIngredientDto) -> Result<(), DataAccessError>;
        async fn update_dish(&self, id: DishId, dto: &DishIngredientDto)
            -> Result<(), DataAccessError>;
        async fn delete_dishes(&self, ids: &[DishId]) -> Result<(), DataAccessError>;
    }
}

mock! {
    pub DishRecordRepo {}

    #[async_trait]
    impl DishRecordRepositoryPort for DishRecordRepo {
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
        async fn analyze(&self, window: TimeWindow) -> Result<FoodRecordAnalysis, DataAccessError>;
    }
}

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Notification sink that remembers everything it was shown.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<(NotificationLevel, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(NotificationLevel, String)> {
        self.seen.lock().unwrap().clone()
    }
}

impl NotificationPort for RecordingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.seen.lock().unwrap().push((level, message.to_string()));
    }
}
