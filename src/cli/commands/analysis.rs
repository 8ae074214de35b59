use anyhow::Context;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use pt_app::{AnalyzeFoodUsage, SessionGate, TableScreen};
use pt_core::food::{IngredientSummary, TimeWindow};
use pt_core::routing::HOME_PATH;

use super::require_user;
use crate::bootstrap::PantryApp;
use crate::cli::output::{number, TextTable};
use crate::cli::AnalysisArgs;

/// Home screen: per-ingredient usage and how long the stock lasts.
pub(super) async fn analysis(
    gate: &SessionGate,
    app: &PantryApp,
    args: &AnalysisArgs,
) -> anyhow::Result<()> {
    require_user(gate, app, HOME_PATH).await?;
    let window = requested_window(app, args)?;

    let analysis = app
        .analysis
        .execute(window)
        .await
        .context("Failed to analyze dish records")?;
    let rows = analysis.ingredients_summary;
    if rows.is_empty() {
        println!("No ingredient usage in this window");
        return Ok(());
    }

    let mut screen: TableScreen<IngredientSummary> = TableScreen::new(
        args.sort_directive(AnalyzeFoodUsage::default_sort()),
        rows.len(),
    )
    .context("Invalid page size")?;
    screen.replace_records(rows);

    let mut table = TextTable::new(vec![
        "INGREDIENT",
        "STORAGE",
        "SUPPLY DAYS",
        "DAILY USAGE",
        "TOTAL USAGE",
        "TOTAL COST",
    ]);
    for summary in screen.visible() {
        table.push(vec![
            summary.ingredient.ingredient_name.clone(),
            number(summary.ingredient.ingredient_storage),
            summary.supply_days.map_or_else(|| "-".to_string(), number),
            number(summary.daily_usage),
            number(summary.total_usage),
            number(summary.total_cost),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}

/// `None` when neither bound is given, so the use case picks its default window.
fn requested_window(app: &PantryApp, args: &AnalysisArgs) -> anyhow::Result<Option<TimeWindow>> {
    if args.from.is_none() && args.to.is_none() {
        return Ok(None);
    }
    let end = match args.to.as_deref() {
        Some(value) => parse_instant(value)?,
        None => app.analysis.default_window().end(),
    };
    let start = match args.from.as_deref() {
        Some(value) => parse_instant(value)?,
        None => TimeWindow::last_month(end).start(),
    };
    Ok(Some(TimeWindow::new(start, end)?))
}

/// RFC3339, or a bare `YYYY-MM-DD` taken as midnight UTC.
pub(super) fn parse_instant(value: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    let midnight = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .with_context(|| format!("Invalid date or timestamp: {value}"))?;
    Ok(Utc.from_utc_datetime(&midnight))
}
