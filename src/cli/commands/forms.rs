//! Add and edit commands. Edits load the row first so omitted flags keep
//! the stored values, like the edit dialogs prefilled from the selected row.

use anyhow::{bail, Context};
use chrono::Utc;
use pt_app::{SessionGate, TableScreen};
use pt_core::food::dish::DISH_NAME;
use pt_core::food::dish_record::DISH_RECORD_TIME;
use pt_core::food::ingredient::INGREDIENT_STORAGE;
use pt_core::food::{
    Dish, DishDraft, DishIngredientDto, DishRecord, DishRecordIngredientDto, Ingredient,
    IngredientDraft, IngredientQuantity,
};
use pt_core::routing::{DISHES_PATH, DISH_RECORDS_PATH, INGREDIENTS_PATH};
use pt_core::table::SortDirective;
use pt_core::{DishId, DishRecordId, IngredientId};

use super::analysis::parse_instant;
use super::require_user;
use crate::bootstrap::PantryApp;
use crate::cli::{
    EditDishArgs, EditIngredientArgs, EditRecordArgs, NewDishArgs, NewIngredientArgs,
    NewRecordArgs,
};

pub(super) async fn add_ingredient(
    gate: &SessionGate,
    app: &PantryApp,
    args: &NewIngredientArgs,
) -> anyhow::Result<()> {
    require_user(gate, app, INGREDIENTS_PATH).await?;
    let draft = IngredientDraft {
        ingredient_name: required_name(&args.name)?,
        ingredient_storage: args.storage,
        ingredient_cost: args.cost,
        ingredient_desc: description(args.desc.as_deref()),
    };
    app.ingredients
        .add(&draft)
        .await
        .context("Failed to add ingredient")?;
    println!("Ingredient {} added", draft.ingredient_name);
    Ok(())
}

pub(super) async fn edit_ingredient(
    gate: &SessionGate,
    app: &PantryApp,
    args: &EditIngredientArgs,
) -> anyhow::Result<()> {
    require_user(gate, app, INGREDIENTS_PATH).await?;
    let mut screen = TableScreen::new(SortDirective::ascending(INGREDIENT_STORAGE), app.page_size)
        .context("Invalid page size")?;
    app.ingredients
        .refresh(&mut screen)
        .await
        .context("Failed to load ingredients")?;
    screen.toggle(IngredientId::new(args.id));
    let Some(current) = screen.selected_record() else {
        bail!("No ingredient with id {}", args.id);
    };

    let ingredient = Ingredient {
        ingredient_id: current.ingredient_id,
        ingredient_name: match args.name.as_deref() {
            Some(name) => required_name(name)?,
            None => current.ingredient_name.clone(),
        },
        ingredient_storage: args.storage.unwrap_or(current.ingredient_storage),
        ingredient_cost: args.cost.unwrap_or(current.ingredient_cost),
        ingredient_desc: merged_description(args.desc.as_deref(), &current.ingredient_desc),
    };
    app.ingredients
        .update(&ingredient)
        .await
        .context("Failed to update ingredient")?;
    println!("Ingredient {} updated", ingredient.ingredient_name);
    Ok(())
}

pub(super) async fn add_dish(
    gate: &SessionGate,
    app: &PantryApp,
    args: &NewDishArgs,
) -> anyhow::Result<()> {
    require_user(gate, app, DISHES_PATH).await?;
    let dto = DishIngredientDto {
        dish_id: None,
        dish: DishDraft {
            dish_name: required_name(&args.name)?,
            dish_desc: description(args.desc.as_deref()),
        },
        ingredient_id_quantity_list: args.ingredients.clone(),
    };
    app.dishes.add(&dto).await.context("Failed to add dish")?;
    println!("Dish {} added", dto.dish.dish_name);
    Ok(())
}

pub(super) async fn edit_dish(
    gate: &SessionGate,
    app: &PantryApp,
    args: &EditDishArgs,
) -> anyhow::Result<()> {
    require_user(gate, app, DISHES_PATH).await?;
    let mut screen = TableScreen::new(SortDirective::descending(DISH_NAME), app.page_size)
        .context("Invalid page size")?;
    app.dishes
        .refresh(&mut screen)
        .await
        .context("Failed to load dishes")?;
    screen.toggle(DishId::new(args.id));
    let Some(current) = screen.selected_record() else {
        bail!("No dish with id {}", args.id);
    };

    let dto = DishIngredientDto {
        dish_id: Some(current.dish_id),
        dish: DishDraft {
            dish_name: match args.name.as_deref() {
                Some(name) => required_name(name)?,
                None => current.dish_name.clone(),
            },
            dish_desc: merged_description(args.desc.as_deref(), &current.dish_desc),
        },
        ingredient_id_quantity_list: if args.ingredients.is_empty() {
            dish_quantities(current)
        } else {
            args.ingredients.clone()
        },
    };
    app.dishes
        .update(current.dish_id, &dto)
        .await
        .context("Failed to update dish")?;
    println!("Dish {} updated", dto.dish.dish_name);
    Ok(())
}

pub(super) async fn add_dish_record(
    gate: &SessionGate,
    app: &PantryApp,
    args: &NewRecordArgs,
) -> anyhow::Result<()> {
    require_user(gate, app, DISH_RECORDS_PATH).await?;
    let dish_name = args.dish.as_deref().map(str::trim).unwrap_or("");
    if dish_name.is_empty() && args.ingredients.is_empty() {
        bail!("Nothing to record: pass --dish or at least one --ingredient");
    }
    let time = match args.time.as_deref() {
        Some(value) => parse_instant(value)?,
        None => Utc::now(),
    };
    let dto = DishRecordIngredientDto::new(
        description(args.desc.as_deref()),
        time,
        dish_name,
        args.ingredients.clone(),
    );
    app.dish_records
        .add(&dto)
        .await
        .context("Failed to add dish record")?;
    println!("Dish record added at {}", time.format("%Y-%m-%d %H:%M"));
    Ok(())
}

/// The entry is looked up on one backend page, the one the user is looking at.
pub(super) async fn edit_dish_record(
    gate: &SessionGate,
    app: &PantryApp,
    args: &EditRecordArgs,
) -> anyhow::Result<()> {
    require_user(gate, app, DISH_RECORDS_PATH).await?;
    let mut screen =
        TableScreen::server_paged(SortDirective::descending(DISH_RECORD_TIME), app.page_size)
            .context("Invalid page size")?;
    screen.set_page(args.page.saturating_sub(1));
    let search = args.search.as_deref().map(str::trim).unwrap_or("");
    app.dish_records
        .refresh(&mut screen, search)
        .await
        .context("Failed to load dish records")?;
    screen.toggle(DishRecordId::new(args.id));
    let Some(current) = screen.selected_record() else {
        bail!(
            "No dish record with id {} on page {}; pass --page to look elsewhere",
            args.id,
            args.page
        );
    };

    let time = match args.time.as_deref() {
        Some(value) => parse_instant(value)?,
        None => current.dish_record_time,
    };
    let dish_name = match args.dish.as_deref() {
        Some(name) => name.trim(),
        None => current.dish_name().unwrap_or(""),
    };
    let ingredients = if args.ingredients.is_empty() {
        record_quantities(current)
    } else {
        args.ingredients.clone()
    };
    let dto = DishRecordIngredientDto::new(
        merged_description(args.desc.as_deref(), &current.dish_record_desc),
        time,
        dish_name,
        ingredients,
    );
    let id = current.dish_record_id;
    app.dish_records
        .update(id, &dto)
        .await
        .context("Failed to update dish record")?;
    println!("Dish record {id} updated");
    Ok(())
}

fn required_name(name: &str) -> anyhow::Result<String> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Name must not be empty");
    }
    Ok(name.to_string())
}

fn description(desc: Option<&str>) -> Option<String> {
    desc.map(str::trim)
        .filter(|desc| !desc.is_empty())
        .map(str::to_string)
}

/// An omitted flag keeps the stored text; an empty one clears it.
fn merged_description(desc: Option<&str>, current: &Option<String>) -> Option<String> {
    match desc {
        Some(desc) => description(Some(desc)),
        None => current.clone(),
    }
}

fn dish_quantities(dish: &Dish) -> Vec<IngredientQuantity> {
    dish.dish_ingredients
        .iter()
        .map(|di| IngredientQuantity {
            ingredient_name: di.ingredient.ingredient_name.clone(),
            quantity: di.dish_ingredient_quantity,
        })
        .collect()
}

fn record_quantities(record: &DishRecord) -> Vec<IngredientQuantity> {
    record
        .dish_record_ingredients
        .iter()
        .map(|ri| IngredientQuantity {
            ingredient_name: ri.ingredient.ingredient_name.clone(),
            quantity: ri.dish_record_ingredient_quantity,
        })
        .collect()
}
