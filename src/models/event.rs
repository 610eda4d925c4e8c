//! Event model matching the frontend Event interface.

use serde::{Deserialize, Serialize};

use super::now_iso;

/// Publication lifecycle of an event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

/// An alumni-network event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start of the event as an ISO-8601 string.
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub rsvp_count: u64,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating an event; also the PUT replacement body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub status: Option<EventStatus>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CreateEventRequest {
    pub fn into_event(self, id: String, created_at: String) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            location: self.location,
            category: self.category,
            tags: self.tags,
            capacity: self.capacity,
            rsvp_count: 0,
            status: self.status.unwrap_or_default(),
            image_url: self.image_url,
            created_at,
            updated_at: now_iso(),
        }
    }
}

/// Request body for bulk-deleting events by id.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchDeleteRequest {
    pub ids: Vec<String>,
}

/// Result of a bulk delete: ids that were not found are silently skipped.
#[derive(Debug, Clone, Serialize)]
pub struct BatchDeleteResult {
    pub deleted: u64,
}
