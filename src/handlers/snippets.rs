//! Snippet handlers: home page, viewing and (gated) creation.

use crate::db;
use crate::error::{AppError, AppResult};
use crate::forms::SnippetCreateForm;
use crate::middleware::auth::AuthState;
use crate::middleware::csrf::CsrfToken;
use crate::session;
use crate::state::AppState;
use crate::templates::{self, TemplateData};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use tower_sessions::Session;

/// GET / — the ten most recent unexpired snippets.
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Extension(auth): Extension<AuthState>,
    Extension(csrf): Extension<CsrfToken>,
) -> AppResult<Response> {
    let snippets = db::snippets::latest(&state.db, 10).await?;
    let data = TemplateData::new(&session, &auth, &csrf).await?;

    Ok(Html(templates::home_page(&data, &snippets)).into_response())
}

/// GET /snippet/view/{id}
pub async fn view(
    State(state): State<AppState>,
    session: Session,
    Extension(auth): Extension<AuthState>,
    Extension(csrf): Extension<CsrfToken>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    // Ids are positive; anything else is a 404, same as a missing row.
    if id < 1 {
        return Err(AppError::NoRecord);
    }

    let snippet = db::snippets::get(&state.db, id).await?;
    let data = TemplateData::new(&session, &auth, &csrf).await?;

    Ok(Html(templates::view_page(&data, &snippet)).into_response())
}

/// GET /snippet/create (protected)
pub async fn create_form(
    session: Session,
    Extension(auth): Extension<AuthState>,
    Extension(csrf): Extension<CsrfToken>,
) -> AppResult<Response> {
    let data = TemplateData::new(&session, &auth, &csrf).await?;

    Ok(Html(templates::create_page(&data, &SnippetCreateForm::default())).into_response())
}

/// POST /snippet/create (protected)
///
/// On validation failure the form page is re-rendered with a 422 and the
/// user's input intact; nothing is inserted.
pub async fn create_post(
    State(state): State<AppState>,
    session: Session,
    Extension(auth): Extension<AuthState>,
    Extension(csrf): Extension<CsrfToken>,
    Form(mut form): Form<SnippetCreateForm>,
) -> AppResult<Response> {
    if !form.validate() {
        let data = TemplateData::new(&session, &auth, &csrf).await?;
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(templates::create_page(&data, &form)),
        )
            .into_response());
    }

    let id = db::snippets::insert(&state.db, &form.title, &form.content, form.expires).await?;

    session::set_flash(&session, "Snippet successfully created!").await?;

    Ok(Redirect::to(&format!("/snippet/view/{id}")).into_response())
}
