use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::interview::Interview;
use crate::store::InterviewStore;

/// Where the interview detail page loads an interview from.
///
/// Carried in `AppState` as `Arc<dyn InterviewSource>`.
#[async_trait]
pub trait InterviewSource: Send + Sync {
    /// `Ok(None)` means the interview does not exist.
    async fn fetch_interview(&self, id: &str) -> Result<Option<Interview>, AppError>;
}

/// Reads interviews straight from the store.
pub struct StoreInterviewSource {
    store: Arc<dyn InterviewStore>,
}

impl StoreInterviewSource {
    pub fn new(store: Arc<dyn InterviewStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl InterviewSource for StoreInterviewSource {
    async fn fetch_interview(&self, id: &str) -> Result<Option<Interview>, AppError> {
        self.store.get_interview(id).await
    }
}
