//! Presentation normalization: every fallback literal for a missing field is
//! applied here, once, to the fetched records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::feedback::Feedback;
use crate::models::interview::Interview;

pub const DEFAULT_ROLE: &str = "Technical";
pub const MISSING_SCORE: &str = "N/A";
pub const MISSING_DATE: &str = "Date not available";
pub const MAX_TECH_ICONS: usize = 3;

/// `MMM D, YYYY h:mm A`, always rendered in UTC with English month names.
const DATE_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechIcon {
    pub tech: String,
    pub url: String,
}

/// Icons for the first three non-blank tech stack entries.
pub fn tech_icons(tech_stack: &[String]) -> Vec<TechIcon> {
    tech_stack
        .iter()
        .filter(|tech| !tech.trim().is_empty())
        .take(MAX_TECH_ICONS)
        .map(|tech| TechIcon {
            tech: tech.clone(),
            url: format!("/icons/tech/{}.svg", icon_slug(tech)),
        })
        .collect()
}

fn icon_slug(tech: &str) -> String {
    tech.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

pub fn format_feedback_date(created_at: Option<DateTime<Utc>>) -> String {
    created_at
        .map(|ts| ts.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| MISSING_DATE.to_string())
}

/// Interview role, or "Technical" when unset or empty.
pub fn display_role(interview: &Interview) -> String {
    interview
        .role
        .as_deref()
        .filter(|role| !role.is_empty())
        .unwrap_or(DEFAULT_ROLE)
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryLine {
    /// `"{position}. {name} ({score}/100)"`, 1-indexed.
    pub heading: String,
    pub comment: String,
}

/// A feedback report with every default resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackView {
    pub interview_id: String,
    pub role: String,
    pub overall_score: String,
    pub date: String,
    pub final_assessment: Option<String>,
    pub categories: Vec<CategoryLine>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
}

impl FeedbackView {
    pub fn new(interview: &Interview, feedback: &Feedback) -> Self {
        let categories = feedback
            .category_scores
            .iter()
            .enumerate()
            .map(|(index, category)| CategoryLine {
                heading: format!("{}. {} ({}/100)", index + 1, category.name, category.score),
                comment: category.comment.clone(),
            })
            .collect();

        FeedbackView {
            interview_id: interview.id.clone(),
            role: display_role(interview),
            overall_score: feedback
                .total_score
                .map(|score| score.to_string())
                .unwrap_or_else(|| MISSING_SCORE.to_string()),
            date: format_feedback_date(feedback.created_at),
            final_assessment: feedback
                .final_assessment
                .clone()
                .filter(|text| !text.is_empty()),
            categories,
            strengths: feedback.strengths.clone(),
            areas_for_improvement: feedback.areas_for_improvement.clone(),
        }
    }

    pub fn score_line(&self) -> String {
        format!("{}/100", self.overall_score)
    }

    pub fn retake_href(&self) -> String {
        format!("/interview/{}", self.interview_id)
    }
}
