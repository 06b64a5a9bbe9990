use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Html,
};
use chrono::Utc;
use tracing::error;

use crate::auth::session_credential;
use crate::errors::AppError;
use crate::html::page;
use crate::profile::{
    render_profile, render_profile_error, ProfileView, PROFILE_LOAD_FAILED, PROFILE_MISSING,
};
use crate::state::AppState;

/// GET /profile
pub async fn handle_profile_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Html<String>), AppError> {
    let credential = session_credential(&headers);
    let Some(user) = state.sessions.resolve_identity(credential.as_deref()).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            Html(page("Not Found", "<h1>404</h1>\n<p>This page could not be found.</p>\n")),
        ));
    };

    let body = match state.store.get_user(&user.id).await {
        Ok(Some(record)) => render_profile(&ProfileView::new(&record, Utc::now())),
        Ok(None) => render_profile_error(PROFILE_MISSING),
        Err(e) => {
            error!("Error loading profile for {}: {e}", user.id);
            render_profile_error(PROFILE_LOAD_FAILED)
        }
    };
    Ok((StatusCode::OK, Html(body)))
}
