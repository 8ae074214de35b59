use serde::{Deserialize, Serialize};

use crate::ids::IngredientId;
use crate::table::{FieldValue, TableRecord};

pub const INGREDIENT_ID: &str = "ingredient_id";
pub const INGREDIENT_NAME: &str = "ingredient_name";
pub const INGREDIENT_STORAGE: &str = "ingredient_storage";
pub const INGREDIENT_COST: &str = "ingredient_cost";
pub const INGREDIENT_DESC: &str = "ingredient_desc";

/// An ingredient in the catalog, with stock on hand and unit cost.
///
/// 食材：库存量与单价。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    #[serde(default)]
    pub ingredient_storage: f64,
    #[serde(default)]
    pub ingredient_cost: f64,
    #[serde(default)]
    pub ingredient_desc: Option<String>,
}

/// Ingredient fields submitted when creating a new ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDraft {
    pub ingredient_name: String,
    pub ingredient_storage: f64,
    pub ingredient_cost: f64,
    pub ingredient_desc: Option<String>,
}

impl Ingredient {
    /// Read a named attribute; shared with rows that embed an ingredient.
    pub(crate) fn ingredient_field(&self, name: &str) -> FieldValue<'_> {
        match name {
            INGREDIENT_ID => FieldValue::from(self.ingredient_id.inner()),
            INGREDIENT_NAME => FieldValue::Text(&self.ingredient_name),
            INGREDIENT_STORAGE => FieldValue::Number(self.ingredient_storage),
            INGREDIENT_COST => FieldValue::Number(self.ingredient_cost),
            INGREDIENT_DESC => FieldValue::text(self.ingredient_desc.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

impl TableRecord for Ingredient {
    type Id = IngredientId;

    fn id(&self) -> IngredientId {
        self.ingredient_id
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        self.ingredient_field(name)
    }
}
