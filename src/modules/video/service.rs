use futures_util::Stream;
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::asset::{random_asset_name, AssetStorage, ThumbnailType};
use crate::modules::video::{
    model::{CreateVideoModel, InsertVideo},
    repository::VideoRepository,
    schema::VideoEntity,
};

#[derive(Clone)]
pub struct VideoService {
    repo: Arc<dyn VideoRepository + Send + Sync>,
    storage: AssetStorage,
}

impl VideoService {
    pub fn with_dependencies(
        repo: Arc<dyn VideoRepository + Send + Sync>,
        storage: AssetStorage,
    ) -> Self {
        info!("VideoService initialized with dependencies");
        VideoService { repo, storage }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        video: CreateVideoModel,
    ) -> Result<VideoEntity, error::SystemError> {
        let new_video =
            InsertVideo { title: video.title, description: video.description, user_id };
        let video = self.repo.create(&new_video).await?;
        info!("Video {} created by user {}", video.id, user_id);
        Ok(video)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VideoEntity, error::SystemError> {
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Video not found"))
    }

    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<VideoEntity>, error::SystemError> {
        self.repo.find_by_user(&user_id).await
    }

    /// Loads the video and checks that `user_id` owns it.
    pub async fn get_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<VideoEntity, error::SystemError> {
        let video = self.get_by_id(id).await?;
        if video.user_id != user_id {
            warn!("User {user_id} is not the owner of video {id}");
            return Err(error::SystemError::unauthorized("User not authorized"));
        }
        Ok(video)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), error::SystemError> {
        let video = self.get_owned(id, user_id).await?;

        if !self.repo.delete(&id).await? {
            return Err(error::SystemError::not_found("Video not found"));
        }

        if let Some(name) = video.thumbnail_url.as_deref().and_then(AssetStorage::name_from_url) {
            self.storage.remove(name).await;
        }
        info!("Video {id} deleted by user {user_id}");
        Ok(())
    }

    /// Writes the thumbnail to the asset root, then points the record at it.
    ///
    /// The file lands on disk before the record references it. If the record
    /// update fails the new file is removed again.
    pub async fn upload_thumbnail<S, B, E>(
        &self,
        mut video: VideoEntity,
        kind: ThumbnailType,
        chunks: S,
    ) -> Result<VideoEntity, error::SystemError>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: std::fmt::Display,
    {
        let name = random_asset_name(kind.extension());
        self.storage.write_stream(&name, chunks).await?;

        video.thumbnail_url = Some(AssetStorage::url_for(&name));

        match self.repo.update(&video).await {
            Ok(updated) => {
                info!("Thumbnail {name} attached to video {}", updated.id);
                Ok(updated)
            }
            Err(e) => {
                warn!("Removing thumbnail {name} after failed update of video {}", video.id);
                self.storage.remove(&name).await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::InMemoryVideoRepository;
    use futures_util::stream;
    use tempfile::TempDir;

    async fn service(assets: &TempDir) -> (Arc<InMemoryVideoRepository>, VideoService) {
        let repo = Arc::new(InMemoryVideoRepository::default());
        let storage = AssetStorage::init(assets.path(), 1024).await.unwrap();
        (repo.clone(), VideoService::with_dependencies(repo, storage))
    }

    fn png_chunks() -> impl Stream<Item = Result<&'static [u8], std::io::Error>> + Unpin {
        stream::iter(vec![Ok(&b"\x89PNG"[..]), Ok(&b"-body"[..])])
    }

    #[actix_web::test]
    async fn get_owned_rejects_other_users() {
        let assets = TempDir::new().unwrap();
        let (repo, service) = service(&assets).await;
        let video = repo.insert(Uuid::now_v7(), "Boots");

        let result = service.get_owned(video.id, Uuid::now_v7()).await;
        assert!(matches!(result, Err(error::SystemError::Unauthorized(_))));

        let result = service.get_owned(Uuid::now_v7(), video.user_id).await;
        assert!(matches!(result, Err(error::SystemError::NotFound(_))));
    }

    #[actix_web::test]
    async fn delete_removes_thumbnail_asset() {
        let assets = TempDir::new().unwrap();
        let (repo, service) = service(&assets).await;
        let video = repo.insert(Uuid::now_v7(), "Boots");

        let video =
            service.upload_thumbnail(video, ThumbnailType::Png, png_chunks()).await.unwrap();
        let url = video.thumbnail_url.clone().unwrap();
        let name = AssetStorage::name_from_url(&url).unwrap();
        assert!(assets.path().join(name).exists());

        service.delete(video.id, video.user_id).await.unwrap();

        assert!(repo.get(&video.id).is_none());
        assert!(!assets.path().join(name).exists());
    }

    #[actix_web::test]
    async fn create_assigns_owner_without_thumbnail() {
        let assets = TempDir::new().unwrap();
        let (_, service) = service(&assets).await;
        let owner = Uuid::now_v7();

        let video = service
            .create(owner, CreateVideoModel { title: "Boots".into(), description: "".into() })
            .await
            .unwrap();

        assert_eq!(video.user_id, owner);
        assert_eq!(video.thumbnail_url, None);
        assert_eq!(service.list_for_user(owner).await.unwrap(), vec![video]);
    }
}
