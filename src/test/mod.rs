//! Shared fixtures for unit and handler tests.

use std::{
    collections::HashMap,
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};
use uuid::Uuid;

use crate::{
    api::error,
    constants::Env,
    modules::{
        user::{model::InsertUser, repository::UserRepository, schema::UserEntity},
        video::{model::InsertVideo, repository::VideoRepository, schema::VideoEntity},
    },
    utils::Claims,
};

pub const BOUNDARY: &str = "tubely-test-boundary";

pub fn test_env(assets_root: &Path) -> Env {
    Env {
        jwt_secret: "handler-test-secret".to_string(),
        access_token_expiration: 3600,
        database_url: "postgres://unused".to_string(),
        assets_root: assets_root.to_path_buf(),
        max_upload_size: 1024 * 1024,
        frontend_url: "http://localhost:5173".to_string(),
        ip: "127.0.0.1".to_string(),
        port: 0,
    }
}

pub fn bearer(env: &Env, user_id: &Uuid) -> (&'static str, String) {
    let token = Claims::new(user_id, 60).encode(env.jwt_secret.as_bytes()).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

/// One multipart part: field name, declared content type, bytes.
pub fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, content_type, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"upload.bin\"\r\n")
                .as_bytes(),
        );
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> (&'static str, String) {
    ("Content-Type", format!("multipart/form-data; boundary={BOUNDARY}"))
}

/// Video store backed by a map. Updates can be made to fail on demand.
#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: Mutex<HashMap<Uuid, VideoEntity>>,
    fail_updates: AtomicBool,
}

impl InMemoryVideoRepository {
    pub fn insert(&self, user_id: Uuid, title: &str) -> VideoEntity {
        let now = chrono::Utc::now();
        let video = VideoEntity {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            title: title.to_string(),
            description: String::new(),
            user_id,
            thumbnail_url: None,
            video_url: None,
        };
        self.videos.lock().unwrap().insert(video.id, video.clone());
        video
    }

    pub fn get(&self, id: &Uuid) -> Option<VideoEntity> {
        self.videos.lock().unwrap().get(id).cloned()
    }

    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn create(&self, video: &InsertVideo) -> Result<VideoEntity, error::SystemError> {
        let mut entity = self.insert(video.user_id, &video.title);
        entity.description = video.description.clone();
        self.videos.lock().unwrap().insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<VideoEntity>, error::SystemError> {
        Ok(self.get(id))
    }

    async fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<VideoEntity>, error::SystemError> {
        let mut videos: Vec<_> = self
            .videos
            .lock()
            .unwrap()
            .values()
            .filter(|video| video.user_id == *user_id)
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(videos)
    }

    async fn update(&self, video: &VideoEntity) -> Result<VideoEntity, error::SystemError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(error::SystemError::DatabaseError("connection refused".into()));
        }

        let mut videos = self.videos.lock().unwrap();
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| error::SystemError::not_found("Video not found"))?;
        *stored = VideoEntity { updated_at: chrono::Utc::now(), ..video.clone() };
        Ok(stored.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        Ok(self.videos.lock().unwrap().remove(id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, UserEntity>>,
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|user| user.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|existing| existing.email == user.email) {
            return Err(error::SystemError::Conflict(None));
        }

        let now = chrono::Utc::now();
        let entity = UserEntity {
            id: Uuid::now_v7(),
            email: user.email.clone(),
            hash_password: user.hash_password.clone(),
            created_at: now,
            updated_at: now,
        };
        let id = entity.id;
        users.insert(id, entity);
        Ok(id)
    }
}
