use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The authenticated user for the current request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// A row of the `users` table. Every profile column is nullable since
/// accounts created through sign-in only carry an email and a name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub institution: Option<String>,
    pub location: Option<String>,
    pub date_of_birth: Option<String>,
    pub profile_picture_url: Option<String>,
    pub email_verified: Option<bool>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub portfolio: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn to_identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            email: self.email.clone().unwrap_or_default(),
            display_name: self.name.clone(),
        }
    }
}

/// Fields written when an account is first created.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
