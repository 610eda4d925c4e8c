//! Spotlight model: a featured alumni story.

use serde::{Deserialize, Serialize};

use super::now_iso;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spotlight {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alumni_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a spotlight; also the PUT replacement body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpotlightRequest {
    pub title: String,
    #[serde(default)]
    pub alumni_name: Option<String>,
    #[serde(default)]
    pub class_year: Option<u32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl CreateSpotlightRequest {
    pub fn into_spotlight(self, id: String, created_at: String) -> Spotlight {
        Spotlight {
            id,
            title: self.title,
            alumni_name: self.alumni_name,
            class_year: self.class_year,
            summary: self.summary,
            body: self.body,
            image_url: self.image_url,
            featured: self.featured,
            published_at: self.published_at,
            created_at,
            updated_at: now_iso(),
        }
    }
}
