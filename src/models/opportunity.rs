//! Opportunity model: a job, internship, or volunteer posting.

use serde::{Deserialize, Serialize};

use super::now_iso;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    /// Posting partner, resolved ad hoc by the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    /// job | internship | volunteer
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub remote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// open | closed
    pub status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating an opportunity; also the PUT replacement body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOpportunityRequest {
    pub title: String,
    #[serde(default)]
    pub partner_id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub apply_url: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateOpportunityRequest {
    pub fn into_opportunity(self, id: String, created_at: String) -> Opportunity {
        Opportunity {
            id,
            title: self.title,
            partner_id: self.partner_id,
            kind: self.kind.unwrap_or_else(|| "job".to_string()),
            location: self.location,
            remote: self.remote,
            description: self.description,
            apply_url: self.apply_url,
            deadline: self.deadline,
            status: self.status.unwrap_or_else(|| "open".to_string()),
            tags: self.tags,
            created_at,
            updated_at: now_iso(),
        }
    }
}
