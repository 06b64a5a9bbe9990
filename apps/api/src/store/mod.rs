//! Repository abstraction over the document store.
//!
//! The flows only ever read interviews and feedback; the sole write is
//! creating a user record at sign-up / first sign-in. `AppState` carries an
//! `Arc<dyn InterviewStore>` so tests can substitute the in-memory backend.

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::feedback::Feedback;
use crate::models::interview::Interview;
use crate::models::user::{NewUser, UserRecord};

#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// `users[uid]`, or `None` if the record does not exist.
    async fn get_user(&self, uid: &str) -> Result<Option<UserRecord>, AppError>;

    async fn insert_user(&self, user: NewUser) -> Result<(), AppError>;

    /// `interviews[id]`, or `None` if the record does not exist.
    async fn get_interview(&self, id: &str) -> Result<Option<Interview>, AppError>;

    /// The feedback for `interview_id` written for `user_id`.
    /// Implementations must filter on both keys; at most one record is returned.
    async fn get_feedback(
        &self,
        interview_id: &str,
        user_id: &str,
    ) -> Result<Option<Feedback>, AppError>;
}
