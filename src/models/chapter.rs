//! Chapter model: a regional alumni group.

use serde::{Deserialize, Serialize};

use super::now_iso;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// pending | active | inactive
    pub status: String,
    /// Sponsoring organization, resolved ad hoc by the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_email: Option<String>,
    #[serde(default)]
    pub member_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a chapter; also the PUT replacement body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChapterRequest {
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sponsor_id: Option<String>,
    #[serde(default)]
    pub lead_name: Option<String>,
    #[serde(default)]
    pub lead_email: Option<String>,
    #[serde(default)]
    pub member_count: Option<u64>,
    #[serde(default)]
    pub founded_at: Option<String>,
}

impl CreateChapterRequest {
    pub fn into_chapter(self, id: String, created_at: String) -> Chapter {
        Chapter {
            id,
            name: self.name,
            city: self.city,
            region: self.region,
            description: self.description,
            status: self.status.unwrap_or_else(|| "pending".to_string()),
            sponsor_id: self.sponsor_id,
            lead_name: self.lead_name,
            lead_email: self.lead_email,
            member_count: self.member_count.unwrap_or(0),
            founded_at: self.founded_at,
            created_at,
            updated_at: now_iso(),
        }
    }
}
