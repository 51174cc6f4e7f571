//! Media files on local disk.

use std::path::PathBuf;

use glance_core::domain::extension_for_mime;

pub struct MediaStorage {
    dir: PathBuf,
}

impl MediaStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Write `bytes` under a fresh name and return that name.
    pub async fn save(&self, mime: &str, bytes: &[u8]) -> std::io::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let extension: &str = match extension_for_mime(mime) {
            Some(ext) => ext,
            None => mime
                .split('/')
                .nth(1)
                .filter(|s| is_safe_name(s))
                .unwrap_or("bin"),
        };
        let name = format!("{}.{}", uuid::Uuid::new_v4().simple(), extension);

        tokio::fs::write(self.dir.join(&name), bytes).await?;
        tracing::debug!(%name, bytes = bytes.len(), "Media stored");
        Ok(name)
    }

    /// Contents of a stored file, `None` for unknown or unsafe names.
    pub async fn load(&self, name: &str) -> std::io::Result<Option<Vec<u8>>> {
        if !is_safe_name(name) || name.starts_with('.') {
            return Ok(None);
        }
        match tokio::fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path().join("media"));

        let name = storage.save("image/png", b"png").await.unwrap();

        assert!(name.ends_with(".png"));
        assert_eq!(storage.load(&name).await.unwrap(), Some(b"png".to_vec()));
    }

    #[tokio::test]
    async fn test_unsafe_names_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path().to_path_buf());

        assert_eq!(storage.load("../secret").await.unwrap(), None);
        assert_eq!(storage.load(".hidden").await.unwrap(), None);
        assert_eq!(storage.load("missing.png").await.unwrap(), None);
    }
}
