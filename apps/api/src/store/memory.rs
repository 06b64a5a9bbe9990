//! In-memory `InterviewStore` used by the flow and router tests.
//!
//! Records live in `HashMap`s behind a `RwLock`. Individual lookups can be
//! made to fail to simulate a backend outage, and every call is counted so
//! tests can assert that a flow short-circuited before touching the store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::InterviewStore;
use crate::errors::AppError;
use crate::models::feedback::Feedback;
use crate::models::interview::Interview;
use crate::models::user::{NewUser, UserRecord};

#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<String, UserRecord>>,
    interviews: RwLock<HashMap<String, Interview>>,
    feedback: RwLock<Vec<Feedback>>,
    fail_users: AtomicBool,
    fail_interviews: AtomicBool,
    fail_feedback: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_user(&self, user: UserRecord) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    pub async fn put_interview(&self, interview: Interview) {
        self.interviews
            .write()
            .await
            .insert(interview.id.clone(), interview);
    }

    pub async fn put_feedback(&self, feedback: Feedback) {
        self.feedback.write().await.push(feedback);
    }

    pub fn fail_users(&self, fail: bool) {
        self.fail_users.store(fail, Ordering::SeqCst);
    }

    pub fn fail_interviews(&self, fail: bool) {
        self.fail_interviews.store(fail, Ordering::SeqCst);
    }

    pub fn fail_feedback(&self, fail: bool) {
        self.fail_feedback.store(fail, Ordering::SeqCst);
    }

    /// Total number of store calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, flag: &AtomicBool, what: &str) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if flag.load(Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "{what} backend unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl InterviewStore for InMemoryStore {
    async fn get_user(&self, uid: &str) -> Result<Option<UserRecord>, AppError> {
        self.check(&self.fail_users, "users")?;
        Ok(self.users.read().await.get(uid).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<(), AppError> {
        self.check(&self.fail_users, "users")?;
        let record = UserRecord {
            id: user.id.clone(),
            name: Some(user.name),
            email: Some(user.email),
            created_at: Some(user.created_at),
            ..UserRecord::default()
        };
        self.users.write().await.insert(user.id, record);
        Ok(())
    }

    async fn get_interview(&self, id: &str) -> Result<Option<Interview>, AppError> {
        self.check(&self.fail_interviews, "interviews")?;
        Ok(self.interviews.read().await.get(id).cloned())
    }

    async fn get_feedback(
        &self,
        interview_id: &str,
        user_id: &str,
    ) -> Result<Option<Feedback>, AppError> {
        self.check(&self.fail_feedback, "feedback")?;
        Ok(self
            .feedback
            .read()
            .await
            .iter()
            .filter(|f| f.interview_id == interview_id && f.user_id == user_id)
            // `None < Some(_)`, so undated rows lose to dated ones.
            .max_by_key(|f| f.created_at)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use sqlx::types::Json;

    use super::*;

    fn feedback(id: &str, created: Option<(i32, u32, u32)>) -> Feedback {
        Feedback {
            id: id.to_string(),
            interview_id: "int-1".to_string(),
            user_id: "u1".to_string(),
            total_score: None,
            category_scores: Json(vec![]),
            strengths: vec![],
            areas_for_improvement: vec![],
            final_assessment: None,
            created_at: created
                .map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_newest_feedback_wins() {
        let store = InMemoryStore::new();
        store.put_feedback(feedback("old", Some((2024, 1, 1)))).await;
        store.put_feedback(feedback("new", Some((2024, 6, 1)))).await;
        store.put_feedback(feedback("older", Some((2023, 12, 1)))).await;

        let found = store.get_feedback("int-1", "u1").await.unwrap().unwrap();
        assert_eq!(found.id, "new");
    }

    #[tokio::test]
    async fn test_undated_feedback_sorts_last() {
        let store = InMemoryStore::new();
        store.put_feedback(feedback("dated", Some((2024, 1, 1)))).await;
        store.put_feedback(feedback("undated", None)).await;

        let found = store.get_feedback("int-1", "u1").await.unwrap().unwrap();
        assert_eq!(found.id, "dated");
    }
}
