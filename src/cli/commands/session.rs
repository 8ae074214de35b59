use anyhow::bail;
use pt_app::SessionGate;
use pt_core::routing::{callback_from_query, guard_login, LoginView, CALLBACK_PARAM};
use pt_core::session::{GatePhase, Session};
use pt_infra::StoredCredential;
use tracing::info;

use crate::bootstrap::PantryApp;
use crate::cli::LoginArgs;

pub(super) async fn login(
    gate: &SessionGate,
    app: &PantryApp,
    args: &LoginArgs,
) -> anyhow::Result<()> {
    let callback = args.callback.as_deref().map(normalize_callback);
    let phase = gate.context().wait_until_resolved().await;
    if let LoginView::Continue { to } = guard_login(&phase, callback.as_deref()) {
        println!("Already signed in. Continue at {}", app.routes.href(&to));
        return Ok(());
    }

    let credential = StoredCredential {
        display_name: args.name.clone(),
        email: args.email.clone(),
        photo_url: args.photo_url.clone(),
        id_token: args.token.clone(),
    };
    let session = Session::from_identity(&credential.user());
    app.identity.sign_in(credential).await?;
    let state = gate.set_session(session).await;
    info!(remember_me = state.remember_me, "Signed in");

    match guard_login(&state.phase(), callback.as_deref()) {
        LoginView::Continue { to } => {
            if let GatePhase::Authenticated(user) = state.phase() {
                println!("Signed in as {}", display_name(&user.name, &user.email));
            }
            println!("Continue at {}", app.routes.href(&to));
            Ok(())
        }
        LoginView::SignIn | LoginView::Progress => bail!("Sign-in did not produce a session"),
    }
}

pub(super) async fn logout(gate: &SessionGate) -> anyhow::Result<()> {
    match gate.context().wait_until_resolved().await {
        GatePhase::Authenticated(_) => {
            gate.sign_out().await;
            println!("Signed out");
        }
        _ => println!("Not signed in"),
    }
    Ok(())
}

pub(super) async fn whoami(gate: &SessionGate) -> anyhow::Result<()> {
    match gate.context().wait_until_resolved().await {
        GatePhase::Authenticated(user) => {
            println!("{}", display_name(&user.name, &user.email));
            if !user.email.is_empty() {
                println!("email: {}", user.email);
            }
            if !user.image.is_empty() {
                println!("image: {}", user.image);
            }
        }
        _ => println!("Not signed in"),
    }
    Ok(())
}

/// Accept either a path or a login location carrying `callbackUrl`.
fn normalize_callback(raw: &str) -> String {
    if raw.contains(CALLBACK_PARAM) {
        let query = raw.split_once('?').map_or(raw, |(_, query)| query);
        callback_from_query(query)
    } else {
        raw.to_string()
    }
}

fn display_name<'a>(name: &'a str, email: &'a str) -> &'a str {
    match (name.is_empty(), email.is_empty()) {
        (false, _) => name,
        (true, false) => email,
        (true, true) => "(unnamed user)",
    }
}
