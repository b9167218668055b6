use actix_multipart::{Multipart, MultipartError};
use actix_web::{delete, get, post, web};
use futures_util::TryStreamExt;
use uuid::Uuid;

use crate::{
    api::{error, success},
    constants::THUMBNAIL_FIELD,
    middlewares::AuthUser,
    modules::{
        asset::ThumbnailType,
        video::{model::CreateVideoModel, schema::VideoEntity, service::VideoService},
    },
    utils::ValidatedJson,
};

#[post("")]
pub async fn create_video(
    video_service: web::Data<VideoService>,
    user: AuthUser,
    body: ValidatedJson<CreateVideoModel>,
) -> Result<success::Success<VideoEntity>, error::Error> {
    let video = video_service.create(user.id, body.0).await?;
    Ok(success::Success::created(video))
}

#[get("")]
pub async fn list_videos(
    video_service: web::Data<VideoService>,
    user: AuthUser,
) -> Result<success::Success<Vec<VideoEntity>>, error::Error> {
    let videos = video_service.list_for_user(user.id).await?;
    Ok(success::Success::ok(videos))
}

#[get("/{video_id}")]
pub async fn get_video(
    video_id: web::Path<Uuid>,
    _user: AuthUser,
    video_service: web::Data<VideoService>,
) -> Result<success::Success<VideoEntity>, error::Error> {
    let video = video_service.get_by_id(video_id.into_inner()).await?;
    Ok(success::Success::ok(video))
}

#[delete("/{video_id}")]
pub async fn delete_video(
    video_id: web::Path<Uuid>,
    user: AuthUser,
    video_service: web::Data<VideoService>,
) -> Result<success::Success<()>, error::Error> {
    video_service.delete(video_id.into_inner(), user.id).await?;
    Ok(success::Success::no_content())
}

/// Stores the `thumbnail` multipart field and points the video at it.
///
/// Ownership is checked before any of the body is read.
#[post("/thumbnail_upload/{video_id}")]
pub async fn upload_thumbnail(
    video_id: web::Path<Uuid>,
    user: AuthUser,
    video_service: web::Data<VideoService>,
    mut payload: Multipart,
) -> Result<success::Success<VideoEntity>, error::Error> {
    let video_id = video_id.into_inner();
    log::info!("uploading thumbnail for video {video_id} by user {}", user.id);

    let video = video_service.get_owned(video_id, user.id).await.map_err(fetch_error)?;

    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let name = field.content_disposition().and_then(|cd| cd.get_name());
        if name != Some(THUMBNAIL_FIELD) {
            while field.try_next().await.map_err(multipart_error)?.is_some() {}
            continue;
        }

        let kind =
            ThumbnailType::from_content_type(field.content_type().map(|mime| mime.essence_str()))?;
        let video = video_service.upload_thumbnail(video, kind, field).await?;
        return Ok(success::Success::ok(video));
    }

    Err(error::SystemError::upload("failure in getting file: no thumbnail field").into())
}

/// A missing video is a server-side failure on the upload route.
fn fetch_error(err: error::SystemError) -> error::SystemError {
    match err {
        error::SystemError::NotFound(_) => {
            error::SystemError::DatabaseError("Error Fetching Video".into())
        }
        other => other,
    }
}

fn multipart_error(err: MultipartError) -> error::SystemError {
    error::SystemError::upload(format!("failure in parsing multipart body: {err}"))
}
