use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{AuthError, IdentityBackend, TokenClaims, TokenUse};

/// HS256 identity backend. ID tokens and session tokens are both JWTs signed
/// with the shared secret; `token_use` keeps one from standing in for the other.
pub struct JwtIdentityBackend {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtIdentityBackend {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    fn verify(&self, token: &str, expected: TokenUse) -> Result<TokenClaims, AuthError> {
        let data = decode::<TokenClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| AuthError::Invalid(e.to_string()))?;

        if data.claims.token_use != expected {
            return Err(AuthError::Invalid(format!(
                "expected {expected:?} token, got {:?}",
                data.claims.token_use
            )));
        }
        if data.claims.sub.is_empty() {
            return Err(AuthError::Invalid("token has no subject".to_string()));
        }
        Ok(data.claims)
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Unavailable(format!("failed to sign token: {e}")))
    }

    /// Mints an ID token the way the client-side identity provider would.
    #[cfg(test)]
    pub fn issue_id_token(&self, uid: &str, email: Option<&str>, name: Option<&str>) -> String {
        let now = Utc::now().timestamp() as u64;
        let claims = TokenClaims {
            sub: uid.to_string(),
            email: email.map(str::to_string),
            name: name.map(str::to_string),
            iat: now,
            exp: now + 3600,
            token_use: TokenUse::Id,
        };
        self.sign(&claims).unwrap()
    }
}

#[async_trait]
impl IdentityBackend for JwtIdentityBackend {
    async fn verify_id_token(&self, id_token: &str) -> Result<TokenClaims, AuthError> {
        self.verify(id_token, TokenUse::Id)
    }

    async fn create_session_token(
        &self,
        id_token: &str,
        ttl_secs: u64,
    ) -> Result<String, AuthError> {
        let id_claims = self.verify(id_token, TokenUse::Id)?;
        let now = Utc::now().timestamp() as u64;
        let claims = TokenClaims {
            iat: now,
            exp: now + ttl_secs,
            token_use: TokenUse::Session,
            ..id_claims
        };
        self.sign(&claims)
    }

    async fn verify_session_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.verify(token, TokenUse::Session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_token_round_trip_keeps_subject() {
        let backend = JwtIdentityBackend::new("secret");
        let id_token = backend.issue_id_token("u42", Some("x@y.z"), Some("Grace"));
        let session = backend.create_session_token(&id_token, 60).await.unwrap();

        let claims = backend.verify_session_token(&session).await.unwrap();
        assert_eq!(claims.sub, "u42");
        assert_eq!(claims.name.as_deref(), Some("Grace"));
        assert_eq!(claims.token_use, TokenUse::Session);
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_invalid() {
        let ours = JwtIdentityBackend::new("secret");
        let theirs = JwtIdentityBackend::new("other");
        let id_token = theirs.issue_id_token("u1", None, None);
        assert!(matches!(
            ours.verify_id_token(&id_token).await,
            Err(AuthError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_session_token_cannot_sign_in() {
        let backend = JwtIdentityBackend::new("secret");
        let id_token = backend.issue_id_token("u1", None, None);
        let session = backend.create_session_token(&id_token, 60).await.unwrap();
        assert!(backend.verify_id_token(&session).await.is_err());
    }

    #[tokio::test]
    async fn test_expired_session_is_invalid() {
        let backend = JwtIdentityBackend::new("secret");
        let now = Utc::now().timestamp() as u64;
        let stale = backend
            .sign(&TokenClaims {
                sub: "u1".to_string(),
                email: None,
                name: None,
                iat: now - 10_000,
                exp: now - 5_000,
                token_use: TokenUse::Session,
            })
            .unwrap();
        assert!(matches!(
            backend.verify_session_token(&stale).await,
            Err(AuthError::Invalid(_))
        ));
    }
}
