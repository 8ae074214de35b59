use anyhow::Context;
use pt_app::{SessionGate, TableScreen};
use pt_core::food::dish::DISH_NAME;
use pt_core::food::dish_record::DISH_RECORD_TIME;
use pt_core::food::ingredient::INGREDIENT_STORAGE;
use pt_core::food::{Dish, DishRecord};
use pt_core::routing::{DISHES_PATH, DISH_RECORDS_PATH, INGREDIENTS_PATH};
use pt_core::table::{SortDirective, TableRecord};
use pt_core::{DishId, DishRecordId, IngredientId};
use tracing::debug;

use super::require_user;
use crate::bootstrap::PantryApp;
use crate::cli::output::{number, optional, page_footer, TextTable};
use crate::cli::TableArgs;

pub(super) async fn ingredients(
    gate: &SessionGate,
    app: &PantryApp,
    args: &TableArgs,
) -> anyhow::Result<()> {
    require_user(gate, app, INGREDIENTS_PATH).await?;
    let mut screen = TableScreen::new(
        args.sort_directive(SortDirective::ascending(INGREDIENT_STORAGE)),
        args.page_size(app.page_size)?,
    )
    .context("Invalid page size")?;

    for id in &args.delete {
        screen.toggle(IngredientId::new(*id));
    }
    if !screen.selection().is_empty() {
        app.ingredients
            .delete_selected(&mut screen)
            .await
            .context("Failed to delete ingredients")?;
    }

    let search = args.search_text();
    let loaded = if search.is_empty() {
        app.ingredients.refresh(&mut screen).await
    } else {
        app.ingredients.search_into(&mut screen, search).await
    };
    loaded.context("Failed to load ingredients")?;
    screen.set_page(args.page_index());

    let mut table = TextTable::new(vec!["ID", "NAME", "STORAGE", "COST", "DESCRIPTION"]);
    for ingredient in screen.visible() {
        table.push(vec![
            ingredient.ingredient_id.to_string(),
            ingredient.ingredient_name.clone(),
            number(ingredient.ingredient_storage),
            number(ingredient.ingredient_cost),
            optional(ingredient.ingredient_desc.as_deref()),
        ]);
    }
    print_table(&table, &screen, "No ingredients found");
    Ok(())
}

pub(super) async fn dishes(
    gate: &SessionGate,
    app: &PantryApp,
    args: &TableArgs,
) -> anyhow::Result<()> {
    require_user(gate, app, DISHES_PATH).await?;
    let mut screen = TableScreen::new(
        args.sort_directive(SortDirective::descending(DISH_NAME)),
        args.page_size(app.page_size)?,
    )
    .context("Invalid page size")?;

    for id in &args.delete {
        screen.toggle(DishId::new(*id));
    }
    if !screen.selection().is_empty() {
        app.dishes
            .delete_selected(&mut screen)
            .await
            .context("Failed to delete dishes")?;
    }

    let search = args.search_text();
    let loaded = if search.is_empty() {
        app.dishes.refresh(&mut screen).await
    } else {
        app.dishes.search_into(&mut screen, search).await
    };
    loaded.context("Failed to load dishes")?;
    screen.set_page(args.page_index());

    let mut table = TextTable::new(vec!["ID", "NAME", "INGREDIENTS", "DESCRIPTION"]);
    for dish in screen.visible() {
        table.push(vec![
            dish.dish_id.to_string(),
            dish.dish_name.clone(),
            dish_ingredients(&dish),
            optional(dish.dish_desc.as_deref()),
        ]);
    }
    print_table(&table, &screen, "No dishes found");
    Ok(())
}

/// The consumption log is paged by the backend; sorting applies within the page.
pub(super) async fn dish_records(
    gate: &SessionGate,
    app: &PantryApp,
    args: &TableArgs,
) -> anyhow::Result<()> {
    require_user(gate, app, DISH_RECORDS_PATH).await?;
    let mut screen = TableScreen::server_paged(
        args.sort_directive(SortDirective::descending(DISH_RECORD_TIME)),
        args.page_size(app.page_size)?,
    )
    .context("Invalid page size")?;
    screen.set_page(args.page_index());

    let search = args.search_text();
    for id in &args.delete {
        screen.toggle(DishRecordId::new(*id));
    }
    let loaded = if screen.selection().is_empty() {
        app.dish_records.refresh(&mut screen, search).await
    } else {
        app.dish_records.delete_selected(&mut screen, search).await
    };
    loaded.context("Failed to load dish records")?;

    let mut table = TextTable::new(vec!["ID", "TIME", "DISH", "INGREDIENTS", "DESCRIPTION"]);
    for record in screen.visible() {
        table.push(vec![
            record.dish_record_id.to_string(),
            record.dish_record_time.format("%Y-%m-%d %H:%M").to_string(),
            optional(record.dish_name()),
            record_ingredients(&record),
            optional(record.dish_record_desc.as_deref()),
        ]);
    }
    print_table(&table, &screen, "No dish records found");
    Ok(())
}

fn print_table<R: TableRecord + Clone>(table: &TextTable, screen: &TableScreen<R>, empty: &str) {
    let window = screen.window();
    debug!(
        page = window.page_index(),
        size = window.page_size(),
        total = screen.total(),
        "Rendering table"
    );
    if table.is_empty() {
        // a page past the end is just empty
        if screen.total() > 0 {
            println!(
                "{empty} on page {} ({} pages)",
                window.page_index() + 1,
                screen.page_count()
            );
        } else {
            println!("{empty}");
        }
        return;
    }
    print!("{}", table.render());
    println!(
        "{}",
        page_footer(window.page_index(), screen.page_count(), screen.total())
    );
}

fn dish_ingredients(dish: &Dish) -> String {
    dish.dish_ingredients
        .iter()
        .map(|di| format!("{} x{}", di.ingredient.ingredient_name, number(di.dish_ingredient_quantity)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn record_ingredients(record: &DishRecord) -> String {
    record
        .dish_record_ingredients
        .iter()
        .map(|ri| {
            format!(
                "{} x{}",
                ri.ingredient.ingredient_name,
                number(ri.dish_record_ingredient_quantity)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
