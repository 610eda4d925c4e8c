//! Application model: a submission against an opportunity.

use serde::{Deserialize, Serialize};

use super::now_iso;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    /// The opportunity applied to, resolved ad hoc by the UI.
    pub opportunity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    /// submitted | reviewed | accepted | rejected
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for submitting an application; also the PUT replacement body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub opportunity_id: String,
    #[serde(default)]
    pub applicant_id: Option<String>,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub applicant_email: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateApplicationRequest {
    pub fn into_application(self, id: String, created_at: String) -> Application {
        Application {
            id,
            opportunity_id: self.opportunity_id,
            applicant_id: self.applicant_id,
            applicant_name: self.applicant_name,
            applicant_email: self.applicant_email,
            resume_url: self.resume_url,
            cover_letter: self.cover_letter,
            status: self.status.unwrap_or_else(|| "submitted".to_string()),
            created_at,
            updated_at: now_iso(),
        }
    }
}
