//! Q&A model: questions asked by alumni, answered by the community.

use serde::{Deserialize, Serialize};

use super::now_iso;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaQuestion {
    pub id: String,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answered_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answered_at: Option<String>,
    #[serde(default)]
    pub upvotes: u64,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for posting a question; also the PUT replacement body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQaRequest {
    pub question: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateQaRequest {
    pub fn into_question(self, id: String, created_at: String) -> QaQuestion {
        QaQuestion {
            id,
            question: self.question,
            body: self.body,
            author_id: self.author_id,
            tags: self.tags,
            answered: false,
            answer: None,
            answered_by: None,
            answered_at: None,
            upvotes: 0,
            created_at,
            updated_at: now_iso(),
        }
    }
}

/// Request body for answering a question.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerQaRequest {
    pub answer: String,
    #[serde(default)]
    pub answered_by: Option<String>,
}
