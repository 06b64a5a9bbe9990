//! Feedback report flow. Each step short-circuits to a terminal outcome.
//!
//! Leniency is deliberately asymmetric: a failed feedback lookup reads as
//! "no feedback", while identity and interview lookup failures propagate.

use tracing::{debug, info, warn};

use crate::auth::SessionResolver;
use crate::errors::AppError;
use crate::interview::view::FeedbackView;
use crate::store::InterviewStore;

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackOutcome {
    RedirectToLogin,
    RedirectToHome,
    NoFeedback { interview_id: String },
    Report(Box<FeedbackView>),
}

pub async fn load_feedback_report(
    sessions: &SessionResolver,
    store: &dyn InterviewStore,
    credential: Option<&str>,
    interview_id: &str,
) -> Result<FeedbackOutcome, AppError> {
    let Some(user) = sessions.resolve_identity(credential).await? else {
        debug!("No user session, redirecting to login");
        return Ok(FeedbackOutcome::RedirectToLogin);
    };

    let Some(interview) = store.get_interview(interview_id).await? else {
        info!("Interview {interview_id} not found, redirecting home");
        return Ok(FeedbackOutcome::RedirectToHome);
    };

    let feedback = store
        .get_feedback(interview_id, &user.id)
        .await
        .unwrap_or_else(|e| {
            warn!("Error fetching feedback for interview {interview_id}: {e}");
            None
        });

    match feedback {
        Some(feedback) => Ok(FeedbackOutcome::Report(Box::new(FeedbackView::new(
            &interview, &feedback,
        )))),
        None => {
            info!("No feedback for interview {interview_id}, user {}", user.id);
            Ok(FeedbackOutcome::NoFeedback {
                interview_id: interview_id.to_string(),
            })
        }
    }
}
