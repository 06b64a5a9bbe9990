//! HTTP client for the interview API (`GET /api/vapi/generate`).
//!
//! Lets the interview detail page run against a deployment whose interviews
//! live behind another instance of this API instead of a local database.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::interview::source::InterviewSource;
use crate::models::interview::Interview;

pub const GENERATE_PATH: &str = "/api/vapi/generate";
const DEFAULT_ERROR: &str = "Failed to fetch interview";

/// `{success, data?, error?}` envelope used by the interview endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Error)]
pub enum VapiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl From<VapiError> for AppError {
    fn from(e: VapiError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

#[derive(Clone)]
pub struct VapiClient {
    client: Client,
    base_url: String,
}

impl VapiClient {
    pub fn new(base_url: &str) -> Result<Self, VapiError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }

    pub async fn fetch_interview_by_id(
        &self,
        interview_id: &str,
    ) -> Result<Option<Interview>, VapiError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("interviewId", interview_id)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Interview API returned {status} for {interview_id}");
        interpret_response(status, &body)
    }
}

/// 404 means the interview does not exist. Any other non-2xx, or a 2xx
/// envelope without `success` and `data`, is an error carrying the body's
/// `error` message when there is one.
fn interpret_response(status: StatusCode, body: &str) -> Result<Option<Interview>, VapiError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    let parsed = serde_json::from_str::<ApiResponse<Interview>>(body);

    if !status.is_success() {
        let message = parsed
            .ok()
            .and_then(|r| r.error)
            .unwrap_or_else(|| DEFAULT_ERROR.to_string());
        warn!("Interview API error {status}: {message}");
        return Err(VapiError::Api {
            status: status.as_u16(),
            message,
        });
    }

    match parsed {
        Ok(ApiResponse {
            success: true,
            data: Some(interview),
            ..
        }) => Ok(Some(interview)),
        Ok(envelope) => {
            let message = envelope.error.unwrap_or_else(|| DEFAULT_ERROR.to_string());
            warn!("Interview API reported failure with {status}: {message}");
            Err(VapiError::Api {
                status: status.as_u16(),
                message,
            })
        }
        Err(e) => Err(VapiError::Api {
            status: status.as_u16(),
            message: format!("malformed response: {e}"),
        }),
    }
}

#[async_trait]
impl InterviewSource for VapiClient {
    async fn fetch_interview(&self, id: &str) -> Result<Option<Interview>, AppError> {
        Ok(self.fetch_interview_by_id(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_yields_interview() {
        let body = r#"{"success":true,"data":{"id":"int-1","userId":"u1","role":"SRE","type":"Behavioral","techstack":["go"],"questions":["Tell me about an outage"],"createdAt":"2024-03-15T14:30:00Z"}}"#;
        let interview = interpret_response(StatusCode::OK, body).unwrap().unwrap();
        assert_eq!(interview.id, "int-1");
        assert_eq!(interview.interview_type.as_deref(), Some("Behavioral"));
        assert_eq!(interview.tech_stack, vec!["go".to_string()]);
        assert_eq!(interview.questions.unwrap().len(), 1);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let body = r#"{"success":true,"data":{"id":"int-1","userId":"u1","role":null,"type":null,"createdAt":null}}"#;
        let interview = interpret_response(StatusCode::OK, body).unwrap().unwrap();
        assert!(interview.tech_stack.is_empty());
        assert_eq!(interview.questions, None);
    }

    #[test]
    fn test_not_found_is_absence() {
        let body = r#"{"success":false,"error":"Interview not found"}"#;
        assert!(interpret_response(StatusCode::NOT_FOUND, body).unwrap().is_none());
    }

    #[test]
    fn test_unsuccessful_envelope_is_error_not_absence() {
        let body = r#"{"success":false,"error":"quota exceeded"}"#;
        match interpret_response(StatusCode::OK, body) {
            Err(VapiError::Api { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_success_without_data_is_error() {
        match interpret_response(StatusCode::OK, r#"{"success":true}"#) {
            Err(VapiError::Api { message, .. }) => assert_eq!(message, "Failed to fetch interview"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_error_message_from_body() {
        let body = r#"{"success":false,"error":"database offline"}"#;
        match interpret_response(StatusCode::INTERNAL_SERVER_ERROR, body) {
            Err(VapiError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "database offline");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_error_without_body_uses_default_message() {
        match interpret_response(StatusCode::BAD_GATEWAY, "<html>") {
            Err(VapiError::Api { message, .. }) => assert_eq!(message, "Failed to fetch interview"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = VapiClient::new("https://interviews.example.com/").unwrap();
        assert_eq!(
            client.endpoint(),
            "https://interviews.example.com/api/vapi/generate"
        );
    }

    #[test]
    fn test_envelope_omits_absent_fields() {
        let json = serde_json::to_value(ApiResponse::<Interview>::failed("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "nope"}));
    }
}
