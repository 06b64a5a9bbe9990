use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: i32,
    pub comment: String,
}

/// AI-generated evaluation of one interview, scoped to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub interview_id: String,
    pub user_id: String,
    pub total_score: Option<i32>, // 0 – 100
    pub category_scores: Json<Vec<CategoryScore>>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
