use crate::domain::ports::PodStore;
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Pod descriptors on the local filesystem, one directory per version
/// under `base_path`.
#[derive(Debug, Clone)]
pub struct FsPodStore {
    base_path: PathBuf,
}

impl FsPodStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn version_dir(&self, version: &str) -> Result<PathBuf> {
        validate_component(version)?;
        Ok(self.base_path.join(version))
    }
}

/// Version and file names come from the URL; they must stay single path
/// components.
fn validate_component(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(DirectoryError::InvalidPathError {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl PodStore for FsPodStore {
    async fn version_exists(&self, version: &str) -> bool {
        let Ok(dir) = self.version_dir(version) else {
            return false;
        };
        tokio::fs::metadata(&dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }

    async fn list_pod_files(&self, version: &str) -> Result<Vec<String>> {
        let dir = self.version_dir(version)?;
        if !self.version_exists(version).await {
            return Err(DirectoryError::VersionNotFound {
                version: version.to_string(),
            });
        }

        let mut entries = tokio::fs::read_dir(&dir).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            if !file_type.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if Path::new(name).extension().and_then(|ext| ext.to_str()) == Some("json") {
                files.push(name.to_string());
            }
        }
        files.sort();
        Ok(files)
    }

    async fn read_pod_file(&self, version: &str, file: &str) -> Result<Vec<u8>> {
        validate_component(file)?;
        let path = self.version_dir(version)?.join(file);
        let data = tokio::fs::read(&path).await?;
        Ok(data)
    }
}
