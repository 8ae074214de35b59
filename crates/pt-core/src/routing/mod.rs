//! Route table and gate-driven render decisions.
//!
//! 路由表，以及会话闸门驱动的渲染决策。

use crate::session::{GatePhase, SessionUser};

pub const ROOT_PATH: &str = "/";
pub const HOME_PATH: &str = "/home";
pub const INGREDIENTS_PATH: &str = "/foodstorage/ingredients";
pub const DISHES_PATH: &str = "/foodstorage/dishes";
pub const DISH_RECORDS_PATH: &str = "/foodstorage/dishrecords";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const RESET_PASSWORD_PATH: &str = "/reset-password";

/// Query parameter carrying the originally requested path.
pub const CALLBACK_PARAM: &str = "callbackUrl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Home,
    Ingredients,
    Dishes,
    DishRecords,
    Login,
    Register,
    ResetPassword,
    NotFound,
}

impl Route {
    /// Everything under `/` except the sign-in family sits behind the gate.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register | Route::ResetPassword)
    }

    pub fn path(&self) -> Option<&'static str> {
        match self {
            Route::Root => Some(ROOT_PATH),
            Route::Home => Some(HOME_PATH),
            Route::Ingredients => Some(INGREDIENTS_PATH),
            Route::Dishes => Some(DISHES_PATH),
            Route::DishRecords => Some(DISH_RECORDS_PATH),
            Route::Login => Some(LOGIN_PATH),
            Route::Register => Some(REGISTER_PATH),
            Route::ResetPassword => Some(RESET_PASSWORD_PATH),
            Route::NotFound => None,
        }
    }
}

/// Routes mounted under an optional base path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteTable {
    base_path: String,
}

impl RouteTable {
    /// `base_path` is normalized to a leading `/` and no trailing `/`; empty means root.
    pub fn new(base_path: &str) -> Self {
        let trimmed = base_path.trim_matches('/');
        let base_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Full location for an in-app path.
    pub fn href(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }

    /// Match a full location (with base path, without query) to a route.
    pub fn resolve(&self, location: &str) -> Route {
        let Some(path) = location.strip_prefix(self.base_path.as_str()) else {
            return Route::NotFound;
        };
        let path = path.trim_end_matches('/');
        match path {
            "" => Route::Root,
            HOME_PATH => Route::Home,
            INGREDIENTS_PATH => Route::Ingredients,
            DISHES_PATH => Route::Dishes,
            DISH_RECORDS_PATH => Route::DishRecords,
            LOGIN_PATH => Route::Login,
            REGISTER_PATH => Route::Register,
            RESET_PASSWORD_PATH => Route::ResetPassword,
            _ => Route::NotFound,
        }
    }
}

/// What a protected route shows for the current gate phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtectedView {
    /// Non-interactive progress indicator; nothing protected mounts.
    Progress,
    /// Replace the current location with the login entry point.
    RedirectToLogin { to: String },
    Content(SessionUser),
}

/// What the login page shows for the current gate phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginView {
    Progress,
    /// Already signed in: continue to the callback destination.
    Continue { to: String },
    SignIn,
}

/// Login location that returns to `requested_path` after sign-in.
pub fn login_redirect(requested_path: &str) -> String {
    format!(
        "{}?{}={}",
        LOGIN_PATH,
        CALLBACK_PARAM,
        urlencoding::encode(requested_path)
    )
}

pub fn guard_protected(phase: &GatePhase, requested_path: &str) -> ProtectedView {
    match phase {
        GatePhase::Loading => ProtectedView::Progress,
        GatePhase::Unauthenticated => ProtectedView::RedirectToLogin {
            to: login_redirect(requested_path),
        },
        GatePhase::Authenticated(user) => ProtectedView::Content(user.clone()),
    }
}

pub fn guard_login(phase: &GatePhase, callback: Option<&str>) -> LoginView {
    match phase {
        GatePhase::Loading => LoginView::Progress,
        GatePhase::Authenticated(_) => LoginView::Continue {
            to: callback.map_or_else(|| ROOT_PATH.to_string(), sanitize_callback),
        },
        GatePhase::Unauthenticated => LoginView::SignIn,
    }
}

/// Extract the callback destination from a login query string.
///
/// Only same-origin absolute paths are honoured; anything else yields `/`.
pub fn callback_from_query(query: &str) -> String {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == CALLBACK_PARAM)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map_or_else(|| ROOT_PATH.to_string(), |decoded| sanitize_callback(&decoded))
}

// Browsers read `/\host` like `//host`, so both count as foreign.
fn sanitize_callback(path: &str) -> String {
    if path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\") {
        path.to_string()
    } else {
        ROOT_PATH.to_string()
    }
}
