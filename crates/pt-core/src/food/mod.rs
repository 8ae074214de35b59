//! Food storage domain records: ingredients, dishes, consumption records and
//! their usage analysis.

pub mod analysis;
pub mod dish;
pub mod dish_record;
pub mod ingredient;
mod timestamp;

use serde::{Deserialize, Serialize};

pub use analysis::{FoodRecordAnalysis, IngredientSummary, TimeWindow, TimeWindowError};
pub use dish::{Dish, DishDraft, DishIngredient, DishIngredientDto, IngredientQuantity};
pub use dish_record::{
    DishRecord, DishRecordDraft, DishRecordIngredient, DishRecordIngredientDto, DishRef,
};
pub use ingredient::{Ingredient, IngredientDraft};

/// One server-side page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
        }
    }
}
