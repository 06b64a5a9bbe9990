use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored mock-interview configuration. Read-only to this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: String,
    /// Owner of the interview.
    pub user_id: String,
    pub role: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub interview_type: Option<String>,
    #[serde(rename = "techstack", default)]
    #[sqlx(rename = "techstack")]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub questions: Option<Vec<String>>,
    pub created_at: Option<DateTime<Utc>>,
}
