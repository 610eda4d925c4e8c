//! Mentorship model: a mentor/mentee pairing.

use serde::{Deserialize, Serialize};

use super::now_iso;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentorship {
    pub id: String,
    pub mentor_id: String,
    pub mentee_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// requested | active | completed | cancelled
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a mentorship; also the PUT replacement body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMentorshipRequest {
    pub mentor_id: String,
    pub mentee_id: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateMentorshipRequest {
    pub fn into_mentorship(self, id: String, created_at: String) -> Mentorship {
        Mentorship {
            id,
            mentor_id: self.mentor_id,
            mentee_id: self.mentee_id,
            topic: self.topic,
            status: self.status.unwrap_or_else(|| "requested".to_string()),
            start_date: self.start_date,
            end_date: self.end_date,
            notes: self.notes,
            created_at,
            updated_at: now_iso(),
        }
    }
}
