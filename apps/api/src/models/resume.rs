use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored resume. Immutable once inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `POST /rest/v1/resumes`. The owner comes from the caller's credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResume {
    pub title: String,
    pub content: String,
}

impl NewResume {
    /// Trims both fields, rejecting the payload when either ends up empty.
    pub fn normalized(&self) -> Option<NewResume> {
        let title = self.title.trim();
        let content = self.content.trim();
        if title.is_empty() || content.is_empty() {
            return None;
        }
        Some(NewResume {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}
