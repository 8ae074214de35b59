//! Command line front-end.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use pt_core::food::IngredientQuantity;
use pt_core::table::{PageWindow, SortDirection, SortDirective};

pub mod commands;
mod output;

pub use commands::run;

#[derive(Debug, Parser)]
#[command(name = "pantry")]
#[command(about = "Pantry - food storage inventory, dishes and consumption log", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/pantry/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, add or edit ingredients in the storage
    Ingredients(IngredientsArgs),
    /// List, add or edit dishes and their ingredients
    Dishes(DishesArgs),
    /// Page through the consumption log, or add and edit entries
    Records(RecordsArgs),
    /// Summarize ingredient usage over a time window
    Analysis(AnalysisArgs),
    /// Store a credential and sign in
    Login(LoginArgs),
    /// Sign out and forget the stored credential
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Open an app location such as `/foodstorage/dishes` or `/login?callbackUrl=%2Fhome`
    Open(OpenArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct IngredientsArgs {
    #[command(subcommand)]
    pub action: Option<IngredientAction>,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Debug, Clone, Subcommand)]
pub enum IngredientAction {
    /// Add an ingredient
    Add(NewIngredientArgs),
    /// Change an ingredient; omitted fields keep their current value
    Edit(EditIngredientArgs),
}

#[derive(Debug, Clone, Args)]
pub struct NewIngredientArgs {
    #[arg(long)]
    pub name: String,

    /// Amount in stock
    #[arg(long)]
    pub storage: f64,

    /// Unit cost
    #[arg(long)]
    pub cost: f64,

    #[arg(long)]
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct EditIngredientArgs {
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub storage: Option<f64>,

    #[arg(long)]
    pub cost: Option<f64>,

    #[arg(long)]
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DishesArgs {
    #[command(subcommand)]
    pub action: Option<DishAction>,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Debug, Clone, Subcommand)]
pub enum DishAction {
    /// Add a dish
    Add(NewDishArgs),
    /// Change a dish; omitted fields keep their current value
    Edit(EditDishArgs),
}

#[derive(Debug, Clone, Args)]
pub struct NewDishArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub desc: Option<String>,

    /// Ingredient used by the dish, as NAME=QUANTITY (repeatable)
    #[arg(long = "ingredient", value_parser = parse_ingredient_quantity)]
    pub ingredients: Vec<IngredientQuantity>,
}

#[derive(Debug, Clone, Args)]
pub struct EditDishArgs {
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub desc: Option<String>,

    /// Replaces the whole ingredient list when given (repeatable)
    #[arg(long = "ingredient", value_parser = parse_ingredient_quantity)]
    pub ingredients: Vec<IngredientQuantity>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RecordsArgs {
    #[command(subcommand)]
    pub action: Option<RecordAction>,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Debug, Clone, Subcommand)]
pub enum RecordAction {
    /// Log a dish, or loose ingredients, as consumed
    Add(NewRecordArgs),
    /// Change a log entry shown on the given page
    Edit(EditRecordArgs),
}

#[derive(Debug, Clone, Args)]
pub struct NewRecordArgs {
    /// When it was consumed, RFC3339 or YYYY-MM-DD (defaults to now)
    #[arg(long)]
    pub time: Option<String>,

    /// Dish that was made; leave out to log loose ingredients
    #[arg(long)]
    pub dish: Option<String>,

    #[arg(long)]
    pub desc: Option<String>,

    /// Ingredient consumed, as NAME=QUANTITY (repeatable)
    #[arg(long = "ingredient", value_parser = parse_ingredient_quantity)]
    pub ingredients: Vec<IngredientQuantity>,
}

#[derive(Debug, Clone, Args)]
pub struct EditRecordArgs {
    pub id: i64,

    #[arg(long)]
    pub time: Option<String>,

    /// New dish name; an empty value detaches the dish
    #[arg(long)]
    pub dish: Option<String>,

    #[arg(long)]
    pub desc: Option<String>,

    /// Replaces the consumed ingredients when given (repeatable)
    #[arg(long = "ingredient", value_parser = parse_ingredient_quantity)]
    pub ingredients: Vec<IngredientQuantity>,

    /// Log page holding the entry, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct OpenArgs {
    /// Location, with or without the configured base path and query
    pub location: String,
}

/// Parse `NAME=QUANTITY`; the last `=` splits so names may contain one.
pub fn parse_ingredient_quantity(raw: &str) -> Result<IngredientQuantity, String> {
    let Some((name, quantity)) = raw.rsplit_once('=') else {
        return Err(format!("expected NAME=QUANTITY, got `{raw}`"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing ingredient name in `{raw}`"));
    }
    let quantity: f64 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity in `{raw}`"))?;
    if !quantity.is_finite() {
        return Err(format!("invalid quantity in `{raw}`"));
    }
    Ok(IngredientQuantity {
        ingredient_name: name.to_string(),
        quantity,
    })
}

#[derive(Debug, Clone, Default, Args)]
pub struct TableArgs {
    /// Column to sort by, e.g. `ingredient_name`
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page
    #[arg(long)]
    pub size: Option<usize>,

    /// Only show rows matching this text
    #[arg(long)]
    pub search: Option<String>,

    /// Delete the rows with these ids before listing
    #[arg(long, value_delimiter = ',')]
    pub delete: Vec<i64>,
}

impl TableArgs {
    /// Requested sort, or the screen default when neither flag is given.
    pub fn sort_directive(&self, default: SortDirective) -> SortDirective {
        sort_from_flags(self.sort.as_deref(), self.desc, default)
    }

    /// Zero-based page index.
    pub fn page_index(&self) -> usize {
        self.page.saturating_sub(1)
    }

    pub fn search_text(&self) -> &str {
        self.search.as_deref().map(str::trim).unwrap_or("")
    }

    /// Rows per page: `--size` must be one of the offered choices, otherwise
    /// the configured size applies.
    pub fn page_size(&self, configured: usize) -> anyhow::Result<usize> {
        match self.size {
            Some(size) if !PageWindow::PAGE_SIZE_OPTIONS.contains(&size) => bail!(
                "Unsupported page size {size}, choose one of {:?}",
                PageWindow::PAGE_SIZE_OPTIONS
            ),
            Some(size) => Ok(size),
            None => Ok(configured),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct AnalysisArgs {
    /// Window start, RFC3339 or YYYY-MM-DD (defaults to one month before --to)
    #[arg(long)]
    pub from: Option<String>,

    /// Window end, RFC3339 or YYYY-MM-DD (defaults to now)
    #[arg(long)]
    pub to: Option<String>,

    #[arg(long)]
    pub sort: Option<String>,

    #[arg(long)]
    pub desc: bool,
}

impl AnalysisArgs {
    pub fn sort_directive(&self, default: SortDirective) -> SortDirective {
        sort_from_flags(self.sort.as_deref(), self.desc, default)
    }
}

fn sort_from_flags(field: Option<&str>, desc: bool, default: SortDirective) -> SortDirective {
    if field.is_none() && !desc {
        return default;
    }
    SortDirective {
        field: field.map_or(default.field, str::to_string),
        direction: if desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    }
}

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    /// ID token issued by the identity service
    #[arg(long)]
    pub token: String,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub photo_url: Option<String>,

    /// Page to continue to after signing in
    #[arg(long)]
    pub callback: Option<String>,
}
