use crate::modules::video::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/videos")
            .service(create_video)
            .service(list_videos)
            .service(get_video)
            .service(delete_video),
    )
    .service(upload_thumbnail);
}
