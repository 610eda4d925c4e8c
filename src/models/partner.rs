//! Partner model: an organization offering opportunities to alumni.

use serde::{Deserialize, Serialize};

use super::now_iso;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// active | inactive
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a partner; also the PUT replacement body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerRequest {
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CreatePartnerRequest {
    pub fn into_partner(self, id: String, created_at: String) -> Partner {
        Partner {
            id,
            name: self.name,
            industry: self.industry,
            website: self.website,
            contact_name: self.contact_name,
            contact_email: self.contact_email,
            description: self.description,
            status: self.status.unwrap_or_else(|| "active".to_string()),
            created_at,
            updated_at: now_iso(),
        }
    }
}
