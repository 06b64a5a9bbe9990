use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use super::InterviewStore;
use crate::errors::AppError;
use crate::models::feedback::Feedback;
use crate::models::interview::Interview;
use crate::models::user::{NewUser, UserRecord};

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewStore for PgStore {
    async fn get_user(&self, uid: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(
            sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = $1")
                .bind(uid)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_user(&self, user: NewUser) -> Result<(), AppError> {
        sqlx::query("INSERT INTO users (id, name, email, created_at) VALUES ($1, $2, $3, $4)")
            .bind(&user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.created_at)
            .execute(&self.pool)
            .await?;

        info!("Created user record {}", user.id);
        Ok(())
    }

    async fn get_interview(&self, id: &str) -> Result<Option<Interview>, AppError> {
        debug!("Fetching interview {id}");
        Ok(
            sqlx::query_as::<_, Interview>("SELECT * FROM interviews WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_feedback(
        &self,
        interview_id: &str,
        user_id: &str,
    ) -> Result<Option<Feedback>, AppError> {
        debug!("Fetching feedback for interview {interview_id}, user {user_id}");
        Ok(sqlx::query_as::<_, Feedback>(
            r#"
            SELECT *
            FROM feedback
            WHERE interview_id = $1 AND user_id = $2
            ORDER BY created_at DESC NULLS LAST
            LIMIT 1
            "#,
        )
        .bind(interview_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}
