//! Axum route handlers for sign-up, sign-in, sign-out and session status.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::auth::{
    clear_session_cookie, session_cookie, session_credential, AuthError, TokenClaims,
    SESSION_DURATION_SECS,
};
use crate::errors::AppError;
use crate::models::user::{Identity, NewUser};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// The password is checked by the identity provider on the client; it is
/// accepted in the payload but never read here.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub uid: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub id_token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
}

impl AuthResponse {
    fn ok(message: &str) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.to_string(),
        })
    }

    fn failed(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: false,
            message: message.into(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user: Option<Identity>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/auth/sign-up
///
/// Records the profile of an account the client just created with the
/// identity provider.
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Json<AuthResponse> {
    if req.uid.trim().is_empty() {
        return AuthResponse::failed("Failed to create account. Please try again.");
    }

    match state.store.get_user(&req.uid).await {
        Ok(Some(_)) => return AuthResponse::failed("User already exists. Please sign in."),
        Ok(None) => {}
        Err(e) => {
            error!("Error creating user: {e}");
            return AuthResponse::failed("Failed to create account. Please try again.");
        }
    }

    let user = NewUser {
        id: req.uid,
        name: req.name,
        email: req.email,
        created_at: Utc::now(),
    };
    if let Err(e) = state.store.insert_user(user).await {
        error!("Error creating user: {e}");
        return AuthResponse::failed("Failed to create account. Please try again.");
    }

    AuthResponse::ok("Account created successfully. Please sign in.")
}

/// POST /api/auth/sign-in
///
/// Verifies the ID token, creates the user record on first sign-in (accounts
/// created through a federated provider have none yet), then sets the
/// session cookie.
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Response {
    let claims = match state.identity.verify_id_token(&req.id_token).await {
        Ok(claims) => claims,
        Err(AuthError::Invalid(reason)) => {
            warn!("Sign in rejected: {reason}");
            return (
                StatusCode::UNAUTHORIZED,
                AuthResponse::failed(format!("Invalid ID token: {reason}")),
            )
                .into_response();
        }
        Err(e) => {
            error!("Sign in error: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, AuthResponse::failed(e.to_string()))
                .into_response();
        }
    };

    match establish_session(&state, &req, &claims).await {
        Ok(cookie) => {
            info!("User {} signed in", claims.sub);
            (
                [(header::SET_COOKIE, cookie)],
                AuthResponse::ok("Signed in successfully"),
            )
                .into_response()
        }
        Err(e) => {
            error!("Sign in error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                AuthResponse::failed("Failed to log into account. Please try again."),
            )
                .into_response()
        }
    }
}

async fn establish_session(
    state: &AppState,
    req: &SignInRequest,
    claims: &TokenClaims,
) -> Result<String, AppError> {
    if state.store.get_user(&claims.sub).await?.is_none() {
        let email = if req.email.is_empty() {
            claims.email.clone().unwrap_or_default()
        } else {
            req.email.clone()
        };
        state
            .store
            .insert_user(NewUser {
                id: claims.sub.clone(),
                name: claims.name.clone().unwrap_or_default(),
                email,
                created_at: Utc::now(),
            })
            .await?;
    }

    let token = state
        .identity
        .create_session_token(&req.id_token, SESSION_DURATION_SECS)
        .await?;
    Ok(session_cookie(&token, state.config.is_production()))
}

/// POST /api/auth/sign-out
pub async fn handle_sign_out() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, clear_session_cookie())],
    )
}

/// GET /api/auth/session
pub async fn handle_session_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionStatus>, AppError> {
    let credential = session_credential(&headers);
    let user = state.sessions.resolve_identity(credential.as_deref()).await?;
    Ok(Json(SessionStatus {
        authenticated: user.is_some(),
        user,
    }))
}
