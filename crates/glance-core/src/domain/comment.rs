use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// Comment entity - append-only, owned by exactly one glance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: User,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment with a timestamp-derived id.
    pub fn new(author: User, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: format!("c{}", now.timestamp_millis()),
            author,
            content,
            created_at: now,
        }
    }
}
