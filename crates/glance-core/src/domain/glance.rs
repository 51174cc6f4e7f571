use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Comment, MediaKind, User};

/// What a glance carries besides its text.
///
/// The persisted layout stores this as an optional `mediaUrl`/`mediaType`
/// pair; the pair is either fully present or fully absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlanceMedia {
    Text,
    Image { url: String },
    Video { url: String },
    Audio { url: String },
}

impl GlanceMedia {
    pub fn new(kind: MediaKind, url: impl Into<String>) -> Self {
        let url = url.into();
        match kind {
            MediaKind::Image => GlanceMedia::Image { url },
            MediaKind::Video => GlanceMedia::Video { url },
            MediaKind::Audio => GlanceMedia::Audio { url },
        }
    }

    pub fn kind(&self) -> Option<MediaKind> {
        match self {
            GlanceMedia::Text => None,
            GlanceMedia::Image { .. } => Some(MediaKind::Image),
            GlanceMedia::Video { .. } => Some(MediaKind::Video),
            GlanceMedia::Audio { .. } => Some(MediaKind::Audio),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            GlanceMedia::Text => None,
            GlanceMedia::Image { url } | GlanceMedia::Video { url } | GlanceMedia::Audio { url } => {
                Some(url)
            }
        }
    }
}

/// Glance entity - a single user post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GlanceRecord", into = "GlanceRecord")]
pub struct Glance {
    pub id: String,
    pub author: User,
    pub content: String,
    pub media: GlanceMedia,
    pub created_at: DateTime<Utc>,
    pub likes: u64,
    pub shares: u64,
    pub comments: Vec<Comment>,
}

impl Glance {
    /// Create a new glance with a timestamp-derived id and zeroed counters.
    pub fn new(author: User, content: String, media: GlanceMedia) -> Self {
        let now = Utc::now();
        Self {
            id: format!("g{}", now.timestamp_millis()),
            author,
            content,
            media,
            created_at: now,
            likes: 0,
            shares: 0,
            comments: Vec::new(),
        }
    }
}

/// Persisted shape of a glance.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GlanceRecord {
    id: String,
    author: User,
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media_type: Option<MediaKind>,
    created_at: DateTime<Utc>,
    likes: u64,
    #[serde(default)]
    shares: Option<u64>,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl TryFrom<GlanceRecord> for Glance {
    type Error = String;

    fn try_from(record: GlanceRecord) -> Result<Self, Self::Error> {
        let media = match (record.media_type, record.media_url) {
            (None, None) => GlanceMedia::Text,
            (Some(kind), Some(url)) => GlanceMedia::new(kind, url),
            (Some(_), None) => {
                return Err(format!("glance {} has mediaType without mediaUrl", record.id));
            }
            (None, Some(_)) => {
                return Err(format!("glance {} has mediaUrl without mediaType", record.id));
            }
        };

        Ok(Self {
            id: record.id,
            author: record.author,
            content: record.content,
            media,
            created_at: record.created_at,
            likes: record.likes,
            shares: record.shares.unwrap_or(0),
            comments: record.comments,
        })
    }
}

impl From<Glance> for GlanceRecord {
    fn from(glance: Glance) -> Self {
        let media_type = glance.media.kind();
        let media_url = glance.media.url().map(str::to_string);
        Self {
            id: glance.id,
            author: glance.author,
            content: glance.content,
            media_url,
            media_type,
            created_at: glance.created_at,
            likes: glance.likes,
            shares: Some(glance.shares),
            comments: glance.comments,
        }
    }
}
