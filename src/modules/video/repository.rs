use uuid::Uuid;

use crate::{
    api::error,
    modules::video::{model::InsertVideo, schema::VideoEntity},
};

#[async_trait::async_trait]
pub trait VideoRepository {
    async fn create(&self, video: &InsertVideo) -> Result<VideoEntity, error::SystemError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<VideoEntity>, error::SystemError>;
    /// Videos owned by `user_id`, newest first.
    async fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<VideoEntity>, error::SystemError>;
    /// Persists every mutable column of `video` and returns the stored row.
    async fn update(&self, video: &VideoEntity) -> Result<VideoEntity, error::SystemError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;
}
