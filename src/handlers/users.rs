//! User handlers: signup, login and logout.
//!
//! Login and logout are the privilege boundaries: both go through
//! `crate::session`, which rotates the session token in the same step as
//! the authentication change.

use crate::db;
use crate::error::{AppError, AppResult};
use crate::forms::{UserLoginForm, UserSignupForm};
use crate::middleware::auth::AuthState;
use crate::middleware::csrf::CsrfToken;
use crate::session;
use crate::state::AppState;
use crate::templates::{self, TemplateData};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use tower_sessions::Session;

/// GET /user/signup
pub async fn signup_form(
    session: Session,
    Extension(auth): Extension<AuthState>,
    Extension(csrf): Extension<CsrfToken>,
) -> AppResult<Response> {
    let data = TemplateData::new(&session, &auth, &csrf).await?;

    Ok(Html(templates::signup_page(&data, &UserSignupForm::default())).into_response())
}

/// POST /user/signup
pub async fn signup_post(
    State(state): State<AppState>,
    session: Session,
    Extension(auth): Extension<AuthState>,
    Extension(csrf): Extension<CsrfToken>,
    Form(mut form): Form<UserSignupForm>,
) -> AppResult<Response> {
    if !form.validate() {
        let data = TemplateData::new(&session, &auth, &csrf).await?;
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(templates::signup_page(&data, &form)),
        )
            .into_response());
    }

    match db::users::insert(&state.db, &form.name, &form.email, &form.password).await {
        Ok(()) => {
            session::set_flash(&session, "Your signup was successful. Please log in.").await?;
            Ok(Redirect::to("/user/login").into_response())
        }
        Err(AppError::DuplicateEmail) => {
            form.validator
                .add_field_error("email", "Email address is already in use");
            let data = TemplateData::new(&session, &auth, &csrf).await?;
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(templates::signup_page(&data, &form)),
            )
                .into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /user/login
pub async fn login_form(
    session: Session,
    Extension(auth): Extension<AuthState>,
    Extension(csrf): Extension<CsrfToken>,
) -> AppResult<Response> {
    let data = TemplateData::new(&session, &auth, &csrf).await?;

    Ok(Html(templates::login_page(&data, &UserLoginForm::default())).into_response())
}

/// POST /user/login
///
/// Bad credentials re-render the form with a non-field error and leave
/// the session token unchanged; a successful login rotates the token
/// before the user id is stored.
pub async fn login_post(
    State(state): State<AppState>,
    session: Session,
    Extension(auth): Extension<AuthState>,
    Extension(csrf): Extension<CsrfToken>,
    Form(mut form): Form<UserLoginForm>,
) -> AppResult<Response> {
    if !form.validate() {
        let data = TemplateData::new(&session, &auth, &csrf).await?;
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(templates::login_page(&data, &form)),
        )
            .into_response());
    }

    match db::users::authenticate(&state.db, &form.email, &form.password).await {
        Ok(user_id) => {
            session::login(&session, user_id).await?;
            Ok(Redirect::to("/snippet/create").into_response())
        }
        Err(AppError::InvalidCredentials) => {
            form.validator
                .add_non_field_error("Email or Password is incorrect");
            let data = TemplateData::new(&session, &auth, &csrf).await?;
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(templates::login_page(&data, &form)),
            )
                .into_response())
        }
        Err(e) => Err(e),
    }
}

/// POST /user/logout (protected)
pub async fn logout_post(session: Session) -> AppResult<Response> {
    session::logout(&session).await?;
    session::set_flash(&session, "You've been logged out successfully!").await?;

    Ok(Redirect::to("/").into_response())
}
