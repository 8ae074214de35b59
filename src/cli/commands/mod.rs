//! Command handlers. Every command runs inside one session gate lifetime.

mod analysis;
mod forms;
mod navigation;
mod session;
mod tables;

use anyhow::bail;
use pt_app::SessionGate;
use pt_core::routing::{guard_protected, ProtectedView};
use pt_core::session::SessionUser;
use tracing::{info_span, Instrument};

use super::{Command, DishAction, IngredientAction, RecordAction};
use crate::bootstrap::PantryApp;

pub async fn run(command: Command, app: &PantryApp) -> anyhow::Result<()> {
    let gate = SessionGate::start(app.identity_port(), app.notifier()).await;

    let result = async {
        match command {
            Command::Ingredients(args) => match &args.action {
                None => tables::ingredients(&gate, app, &args.table).await,
                Some(IngredientAction::Add(new)) => forms::add_ingredient(&gate, app, new).await,
                Some(IngredientAction::Edit(edit)) => forms::edit_ingredient(&gate, app, edit).await,
            },
            Command::Dishes(args) => match &args.action {
                None => tables::dishes(&gate, app, &args.table).await,
                Some(DishAction::Add(new)) => forms::add_dish(&gate, app, new).await,
                Some(DishAction::Edit(edit)) => forms::edit_dish(&gate, app, edit).await,
            },
            Command::Records(args) => match &args.action {
                None => tables::dish_records(&gate, app, &args.table).await,
                Some(RecordAction::Add(new)) => forms::add_dish_record(&gate, app, new).await,
                Some(RecordAction::Edit(edit)) => forms::edit_dish_record(&gate, app, edit).await,
            },
            Command::Analysis(args) => analysis::analysis(&gate, app, &args).await,
            Command::Login(args) => session::login(&gate, app, &args).await,
            Command::Logout => session::logout(&gate).await,
            Command::Whoami => session::whoami(&gate).await,
            Command::Open(args) => navigation::open(&gate, app, &args).await,
        }
    }
    .instrument(info_span!("cli.command"))
    .await;

    gate.stop().await;
    result
}

/// Wait for the gate to settle, then apply the protected-route guard for `path`.
async fn require_user(
    gate: &SessionGate,
    app: &PantryApp,
    path: &str,
) -> anyhow::Result<SessionUser> {
    let phase = gate.context().wait_until_resolved().await;
    match guard_protected(&phase, path) {
        ProtectedView::Content(user) => {
            if app.api_base_url.is_empty() {
                bail!("No backend configured: set [api] base_url in the config file");
            }
            Ok(user)
        }
        ProtectedView::RedirectToLogin { to } => bail!(
            "Not signed in. Run `pantry login` first (sign-in page: {})",
            app.routes.href(&to)
        ),
        ProtectedView::Progress => bail!("Session is still loading"),
    }
}
