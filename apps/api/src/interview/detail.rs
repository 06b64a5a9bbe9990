//! Interview detail flow.
//!
//! `Loading → {NotFound, Error, Ready}`. Identity is optional here: an
//! anonymous visitor still gets the interview, just without feedback and
//! with the fallback agent name.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::auth::SessionResolver;
use crate::interview::source::InterviewSource;
use crate::interview::view::{display_role, tech_icons, TechIcon};
use crate::models::interview::Interview;
use crate::models::user::Identity;
use crate::store::InterviewStore;

pub const FALLBACK_USER_NAME: &str = "User";
pub const AGENT_MODE: &str = "interview";
pub const MISSING_ID_MESSAGE: &str = "No interview ID provided";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load interview. Please try again.";

/// Everything the external voice agent needs to start the interview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentLaunch {
    pub user_name: String,
    pub user_id: Option<String>,
    pub interview_id: String,
    #[serde(rename = "type")]
    pub mode: String,
    pub questions: Vec<String>,
    pub feedback_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyView {
    pub interview: Interview,
    pub role: String,
    pub interview_type: String,
    pub tech_icons: Vec<TechIcon>,
    pub agent: AgentLaunch,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    NotFound,
    Error { message: String },
    Ready(Box<ReadyView>),
}

/// Collaborators the detail flow reads from.
pub struct DetailDeps<'a> {
    pub sessions: &'a SessionResolver,
    pub source: &'a dyn InterviewSource,
    pub feedback: &'a dyn InterviewStore,
}

pub struct InterviewDetail {
    interview_id: String,
    state: DetailState,
}

impl InterviewDetail {
    pub fn new(interview_id: impl Into<String>) -> Self {
        Self {
            interview_id: interview_id.into(),
            state: DetailState::Loading,
        }
    }

    pub fn into_state(self) -> DetailState {
        self.state
    }

    /// Runs the flow to a terminal state. Calling it again refetches.
    pub async fn load(&mut self, deps: &DetailDeps<'_>, credential: Option<&str>) -> &DetailState {
        self.state = DetailState::Loading;
        self.state = resolve(deps, credential, &self.interview_id).await;
        &self.state
    }
}

async fn resolve(deps: &DetailDeps<'_>, credential: Option<&str>, interview_id: &str) -> DetailState {
    if interview_id.trim().is_empty() {
        return DetailState::Error {
            message: MISSING_ID_MESSAGE.to_string(),
        };
    }

    // Independent: neither needs the other's result.
    let (identity, interview) = tokio::join!(
        deps.sessions.resolve_identity(credential),
        deps.source.fetch_interview(interview_id),
    );

    let identity = identity.unwrap_or_else(|e| {
        warn!("Could not resolve identity, continuing anonymously: {e}");
        None
    });

    let interview = match interview {
        Ok(Some(interview)) => interview,
        Ok(None) => {
            info!("Interview {interview_id} not found");
            return DetailState::NotFound;
        }
        Err(e) => {
            error!("Error loading interview {interview_id}: {e}");
            return DetailState::Error {
                message: LOAD_FAILED_MESSAGE.to_string(),
            };
        }
    };

    let feedback_id = match &identity {
        Some(user) => match deps.feedback.get_feedback(interview_id, &user.id).await {
            Ok(feedback) => feedback.map(|f| f.id),
            Err(e) => {
                warn!("Error loading feedback for interview {interview_id}: {e}");
                None
            }
        },
        None => None,
    };

    let agent = agent_launch(identity, &interview, feedback_id);
    DetailState::Ready(Box::new(ReadyView {
        role: display_role(&interview),
        interview_type: interview.interview_type.clone().unwrap_or_default(),
        tech_icons: tech_icons(&interview.tech_stack),
        interview,
        agent,
    }))
}

fn agent_launch(
    identity: Option<Identity>,
    interview: &Interview,
    feedback_id: Option<String>,
) -> AgentLaunch {
    let (user_name, user_id) = match identity {
        Some(user) => (
            user.display_name.filter(|name| !name.is_empty()),
            Some(user.id),
        ),
        None => (None, None),
    };

    AgentLaunch {
        user_name: user_name.unwrap_or_else(|| FALLBACK_USER_NAME.to_string()),
        user_id,
        interview_id: interview.id.clone(),
        mode: AGENT_MODE.to_string(),
        questions: interview.questions.clone().unwrap_or_default(),
        feedback_id,
    }
}
