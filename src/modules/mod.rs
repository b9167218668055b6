use actix_web::web;

use crate::utils::path_config;

pub mod asset;
pub mod video;
pub mod user {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

/// Registers every route. Services and `Env` are supplied as app data by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(path_config())
        .service(health_check)
        .service(
            web::scope("/api")
                .configure(user::route::configure)
                .configure(video::route::configure),
        )
        .configure(asset::route::configure);
}
