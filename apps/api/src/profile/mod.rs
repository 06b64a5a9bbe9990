//! Read-only profile page for the signed-in user.

pub mod handlers;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::html::{escape, link_button, page};
use crate::models::user::UserRecord;

pub const PROFILE_LOAD_FAILED: &str = "Error loading profile. Please try again later.";
pub const PROFILE_MISSING: &str = "User profile not found";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    pub linkedin: String,
    pub github: String,
    pub twitter: String,
    pub portfolio: String,
}

/// A profile record with every missing field defaulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub institution: String,
    pub location: String,
    pub date_of_birth: String,
    #[serde(rename = "profilePictureURL")]
    pub profile_picture_url: String,
    pub email_verified: bool,
    pub social_links: SocialLinks,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileView {
    /// Missing timestamps default to `now`.
    pub fn new(user: &UserRecord, now: DateTime<Utc>) -> Self {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        ProfileView {
            id: user.id.clone(),
            name: text(&user.name),
            email: text(&user.email),
            phone_number: text(&user.phone_number),
            institution: text(&user.institution),
            location: text(&user.location),
            date_of_birth: text(&user.date_of_birth),
            profile_picture_url: text(&user.profile_picture_url),
            email_verified: user.email_verified.unwrap_or(false),
            social_links: SocialLinks {
                linkedin: text(&user.linkedin),
                github: text(&user.github),
                twitter: text(&user.twitter),
                portfolio: text(&user.portfolio),
            },
            created_at: user.created_at.unwrap_or(now),
            updated_at: user.updated_at.unwrap_or(now),
        }
    }
}

pub fn render_profile(view: &ProfileView) -> String {
    let rows = [
        ("Name", view.name.as_str()),
        ("Email", view.email.as_str()),
        ("Phone", view.phone_number.as_str()),
        ("Institution", view.institution.as_str()),
        ("Location", view.location.as_str()),
        ("Date of birth", view.date_of_birth.as_str()),
        ("LinkedIn", view.social_links.linkedin.as_str()),
        ("GitHub", view.social_links.github.as_str()),
        ("Twitter", view.social_links.twitter.as_str()),
        ("Portfolio", view.social_links.portfolio.as_str()),
    ];

    let mut body = String::from(
        "<div class=\"container\">\n<h1>My Profile</h1>\n\
         <p class=\"muted\">Manage your personal information and preferences.</p>\n\
         <dl class=\"profile\">\n",
    );
    for (label, value) in rows {
        body.push_str(&format!("<dt>{label}</dt><dd>{}</dd>\n", escape(value)));
    }
    body.push_str(&format!(
        "<dt>Email verified</dt><dd>{}</dd>\n</dl>\n</div>\n",
        if view.email_verified { "Yes" } else { "No" }
    ));
    page("My Profile", &body)
}

pub fn render_profile_error(message: &str) -> String {
    let body = format!(
        "<div class=\"container\">\n<h1>Profile</h1>\n<p class=\"error\">{}</p>\n{}\n</div>\n",
        escape(message),
        link_button("/", "Return Home", "btn-primary")
    );
    page("Profile", &body)
}
