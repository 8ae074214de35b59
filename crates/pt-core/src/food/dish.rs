use serde::{Deserialize, Serialize};

use super::ingredient::Ingredient;
use crate::ids::DishId;
use crate::table::{FieldValue, TableRecord};

pub const DISH_ID: &str = "dish_id";
pub const DISH_NAME: &str = "dish_name";
pub const DISH_DESC: &str = "dish_desc";
pub const INGREDIENT_COUNT: &str = "ingredient_count";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishIngredient {
    pub ingredient: Ingredient,
    #[serde(default)]
    pub dish_ingredient_quantity: f64,
}

/// A dish composed of ingredients in fixed quantities.
///
/// 菜品：由若干食材按固定用量组成。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub dish_id: DishId,
    pub dish_name: String,
    #[serde(default)]
    pub dish_desc: Option<String>,
    #[serde(default)]
    pub dish_ingredients: Vec<DishIngredient>,
}

impl Dish {
    pub fn ingredient_names(&self) -> Vec<&str> {
        self.dish_ingredients
            .iter()
            .map(|di| di.ingredient.ingredient_name.as_str())
            .collect()
    }
}

impl TableRecord for Dish {
    type Id = DishId;

    fn id(&self) -> DishId {
        self.dish_id
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            DISH_ID => FieldValue::from(self.dish_id.inner()),
            DISH_NAME => FieldValue::Text(&self.dish_name),
            DISH_DESC => FieldValue::text(self.dish_desc.as_deref()),
            INGREDIENT_COUNT => FieldValue::Number(self.dish_ingredients.len() as f64),
            _ => FieldValue::Missing,
        }
    }
}

/// Quantity of an ingredient, referenced by name, in a write request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientQuantity {
    pub ingredient_name: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishDraft {
    pub dish_name: String,
    pub dish_desc: Option<String>,
}

/// Create/update payload for a dish and its ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishIngredientDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_id: Option<DishId>,
    pub dish: DishDraft,
    pub ingredient_id_quantity_list: Vec<IngredientQuantity>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dto_omits_missing_dish_id() {
        let dto = DishIngredientDto {
            dish_id: None,
            dish: DishDraft {
                dish_name: "Pancakes".into(),
                dish_desc: None,
            },
            ingredient_id_quantity_list: vec![IngredientQuantity {
                ingredient_name: "Flour".into(),
                quantity: 0.2,
            }],
        };

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            value,
            json!({
                "dish": { "dishName": "Pancakes", "dishDesc": null },
                "ingredientIdQuantityList": [{ "ingredientName": "Flour", "quantity": 0.2 }]
            })
        );
    }

    #[test]
    fn test_ingredient_count_field() {
        let dish: Dish = serde_json::from_value(json!({
            "dishId": 1,
            "dishName": "Toast",
            "dishIngredients": [
                { "ingredient": { "ingredientId": 1, "ingredientName": "Bread" }, "dishIngredientQuantity": 2 },
                { "ingredient": { "ingredientId": 2, "ingredientName": "Butter" }, "dishIngredientQuantity": 0.1 }
            ]
        }))
        .unwrap();

        assert_eq!(dish.field(INGREDIENT_COUNT), FieldValue::Number(2.0));
        assert_eq!(dish.ingredient_names(), vec!["Bread", "Butter"]);
    }
}
