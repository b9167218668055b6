use futures_util::{Stream, TryStreamExt};
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};

use crate::{api::error, constants::ASSETS_URL_PREFIX};

/// Local directory holding uploaded assets.
#[derive(Debug, Clone)]
pub struct AssetStorage {
    root: PathBuf,
    max_file_size: usize,
}

impl AssetStorage {
    /// Creates the root directory if it does not exist yet.
    pub async fn init(
        root: impl Into<PathBuf>,
        max_file_size: usize,
    ) -> Result<Self, error::SystemError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        log::info!("Asset storage ready at {}", root.display());
        Ok(Self { root, max_file_size })
    }

    pub fn url_for(name: &str) -> String {
        format!("{ASSETS_URL_PREFIX}/{name}")
    }

    /// Maps an asset URL produced by [`AssetStorage::url_for`] back to its name.
    pub fn name_from_url(url: &str) -> Option<&str> {
        url.strip_prefix(ASSETS_URL_PREFIX)?.strip_prefix('/').filter(|name| is_valid_name(name))
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, error::SystemError> {
        if !is_valid_name(name) {
            return Err(error::SystemError::bad_request("Invalid asset name"));
        }
        Ok(self.root.join(name))
    }

    /// Streams `chunks` into a new file called `name`.
    ///
    /// The file must not exist yet. The partial file is removed on any failure,
    /// including when the returned future is dropped before it completes.
    pub async fn write_stream<S, B, E>(
        &self,
        name: &str,
        mut chunks: S,
    ) -> Result<PathBuf, error::SystemError>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: std::fmt::Display,
    {
        let path = self.path_for(name)?;
        let mut file = fs::OpenOptions::new().write(true).create_new(true).open(&path).await?;
        let pending = PendingAsset::new(path);

        let mut written = 0usize;
        while let Some(chunk) = chunks
            .try_next()
            .await
            .map_err(|e| error::SystemError::upload(format!("failure reading upload: {e}")))?
        {
            let chunk = chunk.as_ref();
            written += chunk.len();
            if written > self.max_file_size {
                return Err(error::SystemError::payload_too_large(format!(
                    "File size exceeds maximum allowed size of {} bytes",
                    self.max_file_size
                )));
            }
            file.write_all(chunk).await?;
        }
        file.flush().await?;
        file.sync_all().await?;

        let path = pending.commit();
        log::info!("Stored asset {} ({written} bytes)", path.display());
        Ok(path)
    }

    pub async fn read(&self, name: &str) -> Result<Vec<u8>, error::SystemError> {
        let path = self.path_for(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(error::SystemError::not_found("Asset not found"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort removal; failures are logged, never returned.
    pub async fn remove(&self, name: &str) {
        match self.path_for(name) {
            Ok(path) => self.remove_path(&path).await,
            Err(_) => log::warn!("Refusing to remove invalid asset name {name:?}"),
        }
    }

    async fn remove_path(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            log::warn!("Failed to remove asset {}: {e}", path.display());
        }
    }
}

/// Deletes a file on drop unless [`PendingAsset::commit`] was called.
struct PendingAsset {
    path: Option<PathBuf>,
}

impl PendingAsset {
    fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    fn commit(mut self) -> PathBuf {
        self.path.take().unwrap_or_default()
    }
}

impl Drop for PendingAsset {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        match std::fs::remove_file(&path) {
            Ok(()) => log::info!("Discarded partial asset {}", path.display()),
            Err(e) => log::warn!("Failed to remove partial asset {}: {e}", path.display()),
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}
