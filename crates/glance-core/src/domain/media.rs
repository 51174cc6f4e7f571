use base64::Engine;
use serde::{Deserialize, Serialize};

/// Kind of media a glance can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    /// Resolve the kind from a MIME type such as `image/png`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let top = mime.split('/').next()?.trim().to_ascii_lowercase();
        match top.as_str() {
            "image" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            "audio" => Some(MediaKind::Audio),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file picked by the user for a media glance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// `None` when the MIME type is not image, video or audio.
    pub fn kind(&self) -> Option<MediaKind> {
        MediaKind::from_mime(&self.mime)
    }

    /// Encode as `data:<mime>;base64,<payload>`.
    pub fn to_data_uri(&self) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime, payload)
    }
}

/// A finished audio recording, ready for review and upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    pub bytes: Vec<u8>,
    pub mime: String,
    /// Locally addressable location for playback before upload.
    pub local_url: String,
}

impl Recording {
    pub fn into_media_file(self) -> MediaFile {
        let extension = extension_for_mime(&self.mime).unwrap_or("weba");
        MediaFile::new(format!("audio.{extension}"), self.mime, self.bytes)
    }
}

const MIME_TABLE: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("weba", "audio/webm"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("m4a", "audio/mp4"),
    ("txt", "text/plain"),
    ("pdf", "application/pdf"),
];

/// MIME type for a file name, by extension.
pub fn mime_for_extension(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    MIME_TABLE
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
        .unwrap_or("application/octet-stream")
}

/// Preferred file extension for a MIME type.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime {
        "audio/x-wav" => Some("wav"),
        _ => MIME_TABLE
            .iter()
            .find(|(_, m)| *m == mime)
            .map(|(ext, _)| *ext),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(MediaKind::from_mime("image/png"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_mime("video/mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_mime("audio/webm"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::from_mime("application/pdf"), None);
        assert_eq!(MediaKind::from_mime(""), None);
    }

    #[test]
    fn test_data_uri() {
        let file = MediaFile::new("a.png", "image/png", b"hi".to_vec());
        assert_eq!(file.to_data_uri(), "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_mime_lookup() {
        assert_eq!(mime_for_extension("photo.JPG"), "image/jpeg");
        assert_eq!(mime_for_extension("notes"), "application/octet-stream");
        assert_eq!(extension_for_mime("audio/wav"), Some("wav"));
        assert_eq!(extension_for_mime("audio/webm"), Some("weba"));
        assert_eq!(extension_for_mime("video/webm"), Some("webm"));
        assert_eq!(mime_for_extension("take.weba"), "audio/webm");
    }
}
