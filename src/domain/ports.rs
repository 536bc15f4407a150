use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of pod descriptors for one or more versions.
///
/// `list_pod_files` must surface a missing version directory as
/// `DirectoryError::VersionNotFound`, distinct from an empty-but-valid
/// collection.
#[async_trait]
pub trait PodStore: Send + Sync {
    async fn version_exists(&self, version: &str) -> bool;
    async fn list_pod_files(&self, version: &str) -> Result<Vec<String>>;
    async fn read_pod_file(&self, version: &str, file: &str) -> Result<Vec<u8>>;
}
