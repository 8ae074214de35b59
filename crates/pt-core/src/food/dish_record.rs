use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dish::{Dish, IngredientQuantity, DISH_NAME};
use super::ingredient::Ingredient;
use crate::ids::DishRecordId;
use crate::table::{FieldValue, TableRecord};

pub const DISH_RECORD_ID: &str = "dish_record_id";
pub const DISH_RECORD_DESC: &str = "dish_record_desc";
pub const DISH_RECORD_TIME: &str = "dish_record_time";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRecordIngredient {
    pub ingredient: Ingredient,
    #[serde(default)]
    pub dish_record_ingredient_quantity: f64,
}

/// One consumption event: a dish (or loose ingredients) used at a point in time.
///
/// 消耗记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRecord {
    pub dish_record_id: DishRecordId,
    #[serde(default)]
    pub dish_record_desc: Option<String>,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub dish_record_time: DateTime<Utc>,
    #[serde(default)]
    pub dish: Option<Dish>,
    #[serde(default)]
    pub dish_record_ingredients: Vec<DishRecordIngredient>,
}

impl DishRecord {
    pub fn dish_name(&self) -> Option<&str> {
        self.dish.as_ref().map(|dish| dish.dish_name.as_str())
    }
}

impl TableRecord for DishRecord {
    type Id = DishRecordId;

    fn id(&self) -> DishRecordId {
        self.dish_record_id
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            DISH_RECORD_ID => FieldValue::from(self.dish_record_id.inner()),
            DISH_RECORD_DESC => FieldValue::text(self.dish_record_desc.as_deref()),
            DISH_RECORD_TIME => FieldValue::Time(self.dish_record_time),
            // resolved through the nested dish
            DISH_NAME => FieldValue::text(self.dish_name()),
            _ => FieldValue::Missing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRef {
    pub dish_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRecordDraft {
    pub dish_record_desc: Option<String>,
    pub dish_record_time: DateTime<Utc>,
    pub dish: Option<DishRef>,
}

/// Create/update payload for a dish record and the ingredients it consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRecordIngredientDto {
    pub dish_record: DishRecordDraft,
    pub ingredient_id_quantity_list: Vec<IngredientQuantity>,
}

impl DishRecordIngredientDto {
    /// An empty `dish_name` records loose ingredients (`dish: null`).
    pub fn new(
        dish_record_desc: Option<String>,
        dish_record_time: DateTime<Utc>,
        dish_name: &str,
        ingredients: Vec<IngredientQuantity>,
    ) -> Self {
        let dish = (!dish_name.is_empty()).then(|| DishRef {
            dish_name: dish_name.to_string(),
        });
        Self {
            dish_record: DishRecordDraft {
                dish_record_desc,
                dish_record_time,
                dish,
            },
            ingredient_id_quantity_list: ingredients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_empty_dish_name_serializes_null_dish() {
        let time = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let dto = DishRecordIngredientDto::new(None, time, "", Vec::new());

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["dishRecord"]["dish"], serde_json::Value::Null);
        assert_eq!(value["dishRecord"]["dishRecordTime"], json!("2025-03-01T12:00:00Z"));
    }

    #[test]
    fn test_dish_name_field_reads_nested_dish() {
        let record: DishRecord = serde_json::from_value(json!({
            "dishRecordId": 9,
            "dishRecordTime": "2025-03-01T12:00:00Z",
            "dish": { "dishId": 2, "dishName": "Soup" }
        }))
        .unwrap();
        assert_eq!(record.field(DISH_NAME), FieldValue::Text("Soup"));

        let loose = DishRecord { dish: None, ..record };
        assert!(loose.field(DISH_NAME).is_missing());
    }

    #[test]
    fn test_offsetless_record_time_decodes() {
        let record: DishRecord = serde_json::from_value(json!({
            "dishRecordId": 1,
            "dishRecordTime": "2023-01-01T12:00:00",
            "dishRecordDesc": "Test Record",
            "dish": null,
            "dishRecordIngredients": []
        }))
        .unwrap();

        assert_eq!(
            record.dish_record_time,
            Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(record.dish_name(), None);
    }

    #[test]
    fn test_invalid_record_time_is_a_decode_error() {
        let err = serde_json::from_value::<DishRecord>(json!({
            "dishRecordId": 1,
            "dishRecordTime": "not a time"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }
}
