pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::interview::handlers as interview;
use crate::profile::handlers as profile;
use crate::state::AppState;
use crate::vapi_client::GENERATE_PATH;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/interview/:id", get(interview::handle_interview_page))
        .route(
            "/interview/:id/feedback",
            get(interview::handle_feedback_page),
        )
        .route("/profile", get(profile::handle_profile_page))
        // Interview API
        .route(GENERATE_PATH, get(interview::handle_get_interview))
        // Auth API
        .route("/api/auth/sign-up", post(auth::handle_sign_up))
        .route("/api/auth/sign-in", post(auth::handle_sign_in))
        .route("/api/auth/sign-out", post(auth::handle_sign_out))
        .route("/api/auth/session", get(auth::handle_session_status))
        .with_state(state)
}
