//! Host file-save primitive

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

/// Hands an in-memory buffer to the host environment under a suggested
/// file name. The contract is fire-and-forget: once `save` returns `Ok`
/// the core assumes delivery and drops the buffer.
///
/// The name is a suggestion only. Keys from different folders can share a
/// last segment, so implementations must not let a later save clobber an
/// earlier one delivered under the same name.
#[async_trait]
pub trait FileSaver: Send + Sync {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), String>;
}

/// Saves buffers as files inside one target directory.
///
/// Colliding names get a numeric suffix before the extension, the way
/// browser download folders do: `file.txt`, `file (1).txt`, ...
pub struct DiskSaver {
    dir: PathBuf,
}

impl DiskSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    async fn unique_destination(&self, file_name: &str) -> PathBuf {
        let destination = self.dir.join(file_name);
        if !path_exists(&destination).await {
            return destination;
        }
        let (stem, ext) = match file_name.rfind('.') {
            Some(pos) if pos > 0 => file_name.split_at(pos),
            _ => (file_name, ""),
        };
        let mut n = 1u32;
        loop {
            let candidate = self.dir.join(format!("{} ({}){}", stem, n, ext));
            if !path_exists(&candidate).await {
                return candidate;
            }
            n += 1;
        }
    }
}

async fn path_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

#[async_trait]
impl FileSaver for DiskSaver {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), String> {
        // Suggested names are single path segments by construction.
        if file_name.is_empty() || file_name.contains('/') || file_name.contains('\\') {
            return Err(format!("invalid file name: {:?}", file_name));
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| format!("Failed to create directory: {}", e))?;

        let destination = self.unique_destination(file_name).await;
        let mut file = tokio::fs::File::create(&destination)
            .await
            .map_err(|e| format!("Failed to create file: {}", e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| format!("Failed to write file: {}", e))?;
        file.flush()
            .await
            .map_err(|e| format!("Failed to flush file: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DiskSaver, FileSaver};

    #[tokio::test]
    async fn disk_saver_writes_into_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DiskSaver::new(dir.path().join("downloads"));

        saver.save("a.txt", b"hello").await.unwrap();

        let written = std::fs::read(dir.path().join("downloads").join("a.txt")).unwrap();
        assert_eq!(written, b"hello");
    }

    #[tokio::test]
    async fn disk_saver_suffixes_colliding_names() {
        // Keys like a/file.txt and b/file.txt both suggest "file.txt".
        let dir = tempfile::tempdir().unwrap();
        let saver = DiskSaver::new(dir.path());

        saver.save("file.txt", b"first").await.unwrap();
        saver.save("file.txt", b"second").await.unwrap();
        saver.save("file.txt", b"third").await.unwrap();
        saver.save("README", b"plain").await.unwrap();
        saver.save("README", b"again").await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("file.txt")).unwrap(), b"first");
        assert_eq!(
            std::fs::read(dir.path().join("file (1).txt")).unwrap(),
            b"second"
        );
        assert_eq!(
            std::fs::read(dir.path().join("file (2).txt")).unwrap(),
            b"third"
        );
        assert_eq!(
            std::fs::read(dir.path().join("README (1)")).unwrap(),
            b"again"
        );
    }

    #[tokio::test]
    async fn disk_saver_rejects_path_separators() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DiskSaver::new(dir.path());

        assert!(saver.save("../escape.txt", b"x").await.is_err());
        assert!(saver.save("", b"x").await.is_err());
    }
}
