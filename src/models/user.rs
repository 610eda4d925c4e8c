//! User model: an alumni-network member account.

use serde::{Deserialize, Serialize};

use super::now_iso;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// admin | member
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

fn default_true() -> bool {
    true
}

/// Request body for creating a user; also the PUT replacement body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<u32>,
    #[serde(default)]
    pub chapter_id: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl CreateUserRequest {
    pub fn into_user(self, id: String, created_at: String) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            role: self.role.unwrap_or_else(|| "member".to_string()),
            graduation_year: self.graduation_year,
            chapter_id: self.chapter_id,
            avatar_url: self.avatar_url,
            active: self.active.unwrap_or(true),
            created_at,
            updated_at: now_iso(),
        }
    }
}
