use crate::core::Storage;
use crate::utils::error::{LookupError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Catalogue, page and saved selection on the local disk, relative to one
/// base directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

/// io::Error 本身不帶路徑，補上檔名方便使用者排查
fn with_path(path: &Path, e: std::io::Error) -> LookupError {
    LookupError::IoError(std::io::Error::new(
        e.kind(),
        format!("{}: {}", path.display(), e),
    ))
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.full_path(path);
        fs::read(&full_path).await.map_err(|e| with_path(&full_path, e))
    }

    /// Writes next to the target and renames over it, so a browser never
    /// sees a half-written page.
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| with_path(parent, e))?;
        }

        let mut partial = full_path.clone().into_os_string();
        partial.push(".partial");
        let partial = PathBuf::from(partial);

        fs::write(&partial, data)
            .await
            .map_err(|e| with_path(&partial, e))?;
        fs::rename(&partial, &full_path)
            .await
            .map_err(|e| with_path(&full_path, e))?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        fs::try_exists(self.full_path(path)).await.unwrap_or(false)
    }
}
