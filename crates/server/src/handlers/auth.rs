//! Login form handler.

use crate::auth::credentials_match;
use crate::metrics;
use crate::state::AppState;
use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

/// Submitted login form. Absent fields are tolerated and fail the check.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /login
///
/// 303 to the protected route on a match, 308 back to the origin route otherwise.
/// No session is issued.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Redirect {
    let auth = &state.config.auth;
    if credentials_match(auth, form.email.as_deref(), form.password.as_deref()) {
        metrics::record_login("accepted");
        tracing::info!("Login accepted");
        Redirect::to(&auth.protected_route)
    } else {
        metrics::record_login("rejected");
        tracing::info!("Login rejected");
        Redirect::permanent(&auth.origin_route)
    }
}
