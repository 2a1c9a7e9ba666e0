// Pages that need no backend data: login, password recovery, password change.

use axum::extract::State;
use axum::response::Html;
use minijinja::context;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET / - Login form
pub async fn login(State(state): State<AppState>) -> ApiResult<Html<String>> {
    state.pages.render(
        "login.html",
        context! {
            title => "Sign in",
            landing_page => &state.config.session.landing_page,
        },
    )
}

/// GET /forgot-password - Recovery email form
pub async fn forgot_password(State(state): State<AppState>) -> ApiResult<Html<String>> {
    state
        .pages
        .render("forgot_password.html", context! { title => "Forgot password" })
}

/// GET /change-password - New password form
pub async fn change_password(State(state): State<AppState>) -> ApiResult<Html<String>> {
    state
        .pages
        .render("change_password.html", context! { title => "Change password" })
}
