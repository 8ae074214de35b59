use anyhow::bail;
use pt_app::SessionGate;
use pt_core::routing::{callback_from_query, guard_login, LoginView, Route};

use super::{analysis, tables};
use crate::bootstrap::PantryApp;
use crate::cli::{AnalysisArgs, OpenArgs, TableArgs};

/// Render the page behind an app location, as the router would.
pub(super) async fn open(
    gate: &SessionGate,
    app: &PantryApp,
    args: &OpenArgs,
) -> anyhow::Result<()> {
    let (path, query) = split_location(&args.location);
    let route = app.routes.resolve(path);
    let Some(route_path) = route.path() else {
        bail!("No page at {path}");
    };

    if route.is_protected() {
        return match route {
            Route::Ingredients => tables::ingredients(gate, app, &TableArgs::default()).await,
            Route::Dishes => tables::dishes(gate, app, &TableArgs::default()).await,
            Route::DishRecords => tables::dish_records(gate, app, &TableArgs::default()).await,
            _ => analysis::analysis(gate, app, &AnalysisArgs::default()).await,
        };
    }

    let phase = gate.context().wait_until_resolved().await;
    let callback = callback_from_query(query);
    match guard_login(&phase, Some(&callback)) {
        LoginView::Continue { to } => {
            println!("Already signed in, continue to {}", app.routes.href(&to));
        }
        LoginView::SignIn if route == Route::Login => {
            println!("Sign in with `pantry login --token <id token> --callback {callback}`");
        }
        LoginView::SignIn => {
            println!(
                "{} is handled by the identity service",
                app.routes.href(route_path)
            );
        }
        LoginView::Progress => bail!("Session is still loading"),
    }
    Ok(())
}

fn split_location(location: &str) -> (&str, &str) {
    location.split_once('?').unwrap_or((location, ""))
}
