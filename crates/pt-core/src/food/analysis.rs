use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ingredient::Ingredient;
use crate::ids::IngredientId;
use crate::table::{FieldValue, TableRecord};

pub const SUPPLY_DAYS: &str = "supply_days";
pub const DAILY_USAGE: &str = "daily_usage";
pub const TOTAL_USAGE: &str = "total_usage";
pub const TOTAL_COST: &str = "total_cost";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeWindowError {
    #[error("time window starts after it ends ({start} > {end})")]
    Inverted {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Inclusive analysis interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimeWindowError> {
        if start > end {
            return Err(TimeWindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// One calendar month back from `now`.
    pub fn last_month(now: DateTime<Utc>) -> Self {
        let start = now.checked_sub_months(Months::new(1)).unwrap_or(now);
        Self { start, end: now }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Per-ingredient usage over an analysis window.
///
/// 食材在统计区间内的用量汇总。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSummary {
    pub ingredient: Ingredient,
    /// Days the current stock lasts at the observed daily usage; absent when unused.
    #[serde(default)]
    pub supply_days: Option<f64>,
    #[serde(default)]
    pub daily_usage: f64,
    #[serde(default)]
    pub total_usage: f64,
    #[serde(default)]
    pub total_cost: f64,
}

impl TableRecord for IngredientSummary {
    type Id = IngredientId;

    fn id(&self) -> IngredientId {
        self.ingredient.ingredient_id
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            SUPPLY_DAYS => FieldValue::number(self.supply_days),
            DAILY_USAGE => FieldValue::Number(self.daily_usage),
            TOTAL_USAGE => FieldValue::Number(self.total_usage),
            TOTAL_COST => FieldValue::Number(self.total_cost),
            other => self.ingredient.ingredient_field(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecordAnalysis {
    #[serde(default)]
    pub ingredients_summary: Vec<IngredientSummary>,
}
