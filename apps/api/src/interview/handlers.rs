//! Axum route handlers for the interview pages and lookup API.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use tracing::{debug, error};

use crate::auth::session_credential;
use crate::errors::AppError;
use crate::interview::detail::{DetailDeps, DetailState, InterviewDetail};
use crate::interview::feedback::{load_feedback_report, FeedbackOutcome, HOME_ROUTE, LOGIN_ROUTE};
use crate::interview::render::{render_detail, render_feedback, render_no_feedback};
use crate::models::interview::Interview;
use crate::state::AppState;
use crate::vapi_client::ApiResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuery {
    pub interview_id: Option<String>,
}

/// GET /interview/:id
///
/// Interview metadata plus the launch payload for the voice agent.
pub async fn handle_interview_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Html<String>) {
    let credential = session_credential(&headers);
    let deps = DetailDeps {
        sessions: &state.sessions,
        source: state.interview_source.as_ref(),
        feedback: state.store.as_ref(),
    };

    let mut detail = InterviewDetail::new(id);
    detail.load(&deps, credential.as_deref()).await;
    let view = detail.into_state();
    let status = match &view {
        DetailState::Ready(_) => StatusCode::OK,
        DetailState::NotFound => StatusCode::NOT_FOUND,
        DetailState::Loading | DetailState::Error { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Html(render_detail(&view)))
}

/// GET /interview/:id/feedback
pub async fn handle_feedback_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    debug!("Fetching feedback for interview ID: {id}");
    let credential = session_credential(&headers);

    let outcome =
        load_feedback_report(&state.sessions, state.store.as_ref(), credential.as_deref(), &id)
            .await?;

    Ok(match outcome {
        FeedbackOutcome::RedirectToLogin => Redirect::temporary(LOGIN_ROUTE).into_response(),
        FeedbackOutcome::RedirectToHome => Redirect::temporary(HOME_ROUTE).into_response(),
        FeedbackOutcome::NoFeedback { interview_id } => {
            Html(render_no_feedback(&interview_id)).into_response()
        }
        FeedbackOutcome::Report(view) => Html(render_feedback(&view)).into_response(),
    })
}

/// GET /api/vapi/generate?interviewId=<id>
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> (StatusCode, Json<ApiResponse<Interview>>) {
    let Some(id) = query.interview_id.filter(|id| !id.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failed("interviewId is required")),
        );
    };

    match state.store.get_interview(&id).await {
        Ok(Some(interview)) => (StatusCode::OK, Json(ApiResponse::ok(interview))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::failed("Interview not found")),
        ),
        Err(e) => {
            error!("Error fetching interview {id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failed("Failed to fetch interview")),
            )
        }
    }
}
