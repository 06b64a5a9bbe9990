//! Session handling: the identity-backend seam, the session cookie, and the
//! per-request identity resolver every page goes through.
//!
//! The cookie is the only trusted source of identity. A user id supplied by
//! the client is never consulted.

pub mod handlers;
pub mod jwt;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::user::Identity;
use crate::store::InterviewStore;

pub use jwt::JwtIdentityBackend;

pub const SESSION_COOKIE: &str = "session";
/// Session lifetime: one week.
pub const SESSION_DURATION_SECS: u64 = 60 * 60 * 24 * 7;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Token missing a claim, expired, tampered with, or of the wrong kind.
    #[error("invalid credential: {0}")]
    Invalid(String),

    #[error("identity backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    #[default]
    Id,
    Session,
}

/// Decoded identity claim returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub iat: u64,
    pub exp: u64,
    #[serde(default)]
    pub token_use: TokenUse,
}

/// External identity verification backend.
///
/// Carried in `AppState` as `Arc<dyn IdentityBackend>`.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Verifies a short-lived ID token obtained by the client at sign-in.
    async fn verify_id_token(&self, id_token: &str) -> Result<TokenClaims, AuthError>;

    /// Exchanges a verified ID token for a session token valid for `ttl_secs`.
    async fn create_session_token(&self, id_token: &str, ttl_secs: u64)
        -> Result<String, AuthError>;

    async fn verify_session_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Resolves the session credential of a request to an [`Identity`].
#[derive(Clone)]
pub struct SessionResolver {
    backend: Arc<dyn IdentityBackend>,
    store: Arc<dyn InterviewStore>,
}

impl SessionResolver {
    pub fn new(backend: Arc<dyn IdentityBackend>, store: Arc<dyn InterviewStore>) -> Self {
        Self { backend, store }
    }

    /// Returns `Ok(None)` when the credential is missing, invalid, or names a
    /// user that no longer exists. Only backend outages surface as errors.
    pub async fn resolve_identity(
        &self,
        credential: Option<&str>,
    ) -> Result<Option<Identity>, AppError> {
        let Some(token) = credential else {
            return Ok(None);
        };

        let claims = match self.backend.verify_session_token(token).await {
            Ok(claims) => claims,
            Err(AuthError::Invalid(reason)) => {
                debug!("Rejected session credential: {reason}");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let Some(user) = self.store.get_user(&claims.sub).await? else {
            warn!("Session references missing user {}", claims.sub);
            return Ok(None);
        };

        Ok(Some(user.to_identity()))
    }
}

/// Extracts the `session` cookie value from the request headers.
pub fn session_credential(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value storing a freshly minted session token.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Max-Age={SESSION_DURATION_SECS}; Path=/; HttpOnly; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that deletes the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRecord;
    use crate::store::memory::InMemoryStore;
    use axum::http::HeaderValue;

    fn resolver(store: Arc<InMemoryStore>) -> (SessionResolver, Arc<JwtIdentityBackend>) {
        let backend = Arc::new(JwtIdentityBackend::new("secret"));
        (SessionResolver::new(backend.clone(), store), backend)
    }

    async fn session_for(backend: &JwtIdentityBackend, uid: &str) -> String {
        let id_token = backend.issue_id_token(uid, Some("a@b.dev"), None);
        backend
            .create_session_token(&id_token, SESSION_DURATION_SECS)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_credential_resolves_to_none() {
        let store = Arc::new(InMemoryStore::new());
        let (resolver, _) = resolver(store.clone());
        assert_eq!(resolver.resolve_identity(None).await.unwrap(), None);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_garbage_credential_resolves_to_none() {
        let (resolver, _) = resolver(Arc::new(InMemoryStore::new()));
        let identity = resolver.resolve_identity(Some("not-a-token")).await.unwrap();
        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn test_id_token_is_not_accepted_as_session() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put_user(UserRecord {
                id: "u1".to_string(),
                ..UserRecord::default()
            })
            .await;
        let (resolver, backend) = resolver(store);
        let id_token = backend.issue_id_token("u1", None, None);
        assert!(resolver
            .resolve_identity(Some(&id_token))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_deleted_user_resolves_to_none() {
        let (resolver, backend) = resolver(Arc::new(InMemoryStore::new()));
        let token = session_for(&backend, "ghost").await;
        assert!(resolver.resolve_identity(Some(&token)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_valid_session_resolves_identity() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put_user(UserRecord {
                id: "u1".to_string(),
                name: Some("Ada".to_string()),
                ..UserRecord::default()
            })
            .await;
        let (resolver, backend) = resolver(store);
        let token = session_for(&backend, "u1").await;

        let identity = resolver.resolve_identity(Some(&token)).await.unwrap().unwrap();
        assert_eq!(identity.id, "u1");
        assert_eq!(identity.email, "");
        assert_eq!(identity.display_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_store_outage_is_fatal() {
        let store = Arc::new(InMemoryStore::new());
        store.fail_users(true);
        let (resolver, backend) = resolver(store);
        let token = session_for(&backend, "u1").await;
        assert!(resolver.resolve_identity(Some(&token)).await.is_err());
    }

    #[test]
    fn test_session_credential_parses_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc.def.ghi; other=1"),
        );
        assert_eq!(session_credential(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_session_credential_ignores_empty_and_lookalikes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("session_id=x; session="),
        );
        assert_eq!(session_credential(&headers), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok", false);
        assert!(cookie.starts_with("session=tok;"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("Secure"));
        assert!(session_cookie("tok", true).ends_with("; Secure"));
    }
}
