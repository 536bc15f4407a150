use crate::core::aggregator;
use crate::domain::model::Pod;
use crate::domain::ports::PodStore;
use crate::utils::error::Result;
use futures_util::future::join_all;

/// Load every pod descriptor for one version.
///
/// All files are fetched concurrently and the batch completes only once
/// every fetch has settled. A file that cannot be read or parsed is
/// logged and dropped; it never aborts the batch. A missing version
/// directory propagates as `VersionNotFound`. The surviving pods come
/// back sorted by name.
pub async fn load_version<S: PodStore + ?Sized>(store: &S, version: &str) -> Result<Vec<Pod>> {
    let files = store.list_pod_files(version).await?;

    tracing::debug!("Loading {} pod files for version {}", files.len(), version);

    let fetches = files.into_iter().map(|file| async move {
        match store.read_pod_file(version, &file).await {
            Ok(bytes) => match serde_json::from_slice::<Pod>(&bytes) {
                Ok(pod) => Some(pod),
                Err(err) => {
                    tracing::warn!("Could not parse {}/{}: {}", version, file, err);
                    None
                }
            },
            Err(err) => {
                tracing::warn!("Could not load {}/{}: {}", version, file, err);
                None
            }
        }
    });

    let mut pods: Vec<Pod> = join_all(fetches).await.into_iter().flatten().collect();
    aggregator::sort_pods(&mut pods);

    tracing::info!("Loaded {} pods for version {}", pods.len(), version);
    Ok(pods)
}
