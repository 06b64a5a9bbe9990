use std::sync::Arc;

use crate::auth::{IdentityBackend, SessionResolver};
use crate::config::Config;
use crate::interview::source::InterviewSource;
use crate::store::InterviewStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InterviewStore>,
    pub identity: Arc<dyn IdentityBackend>,
    /// Cookie → identity resolution, backed by `identity` and `store`.
    pub sessions: SessionResolver,
    /// Where the interview detail page loads interviews from: the store by
    /// default, or a remote interview API when `VAPI_BASE_URL` is set.
    pub interview_source: Arc<dyn InterviewSource>,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State over an in-memory store with the JWT backend keyed by the test
    /// config's secret. The backend is returned so tests can mint tokens.
    pub fn for_tests(
        store: Arc<crate::store::memory::InMemoryStore>,
    ) -> (Self, Arc<crate::auth::JwtIdentityBackend>) {
        use crate::interview::source::StoreInterviewSource;

        let config = Config::for_tests();
        let backend = Arc::new(crate::auth::JwtIdentityBackend::new(&config.session_secret));
        let state = AppState {
            store: store.clone(),
            identity: backend.clone(),
            sessions: SessionResolver::new(backend.clone(), store.clone()),
            interview_source: Arc::new(StoreInterviewSource::new(store)),
            config,
        };
        (state, backend)
    }
}
