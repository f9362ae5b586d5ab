//! User models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// User record as stored on the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

fn default_active() -> bool {
    true
}

/// The signed-in user as the client presents it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub username: String,
}

impl CurrentUser {
    /// Locally seeded user used until a real login flow exists
    pub fn seeded() -> Self {
        Self {
            id: 1,
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            username: "johndoe".to_string(),
        }
    }
}

impl From<ApiUser> for CurrentUser {
    fn from(user: ApiUser) -> Self {
        let name = user.full_name.unwrap_or_else(|| user.username.clone());
        Self {
            id: user.id,
            name,
            email: user.email,
            username: user.username,
        }
    }
}
