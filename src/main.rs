use actix_cors::Cors;
use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use crate::{
    configs::connect_database,
    constants::Env,
    modules::{
        asset::AssetStorage,
        user::{repository_pg::UserRepositoryPg, service::UserService},
        video::{repository_pg::VideoRepositoryPg, service::VideoService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let env = Arc::new(Env::load().map_err(|e| std::io::Error::other(e.to_string()))?);
    log::info!("Environment variables loaded");

    let db_pool = connect_database(&env.database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("Database connection error: {e}")))?;

    let storage = AssetStorage::init(&env.assets_root, env.max_upload_size)
        .await
        .map_err(|e| std::io::Error::other(format!("Asset storage error: {e}")))?;

    let user_service = UserService::with_dependencies(
        Arc::new(UserRepositoryPg::new(db_pool.clone())),
        env.clone(),
    );
    let video_service = VideoService::with_dependencies(
        Arc::new(VideoRepositoryPg::new(db_pool.clone())),
        storage.clone(),
    );

    let bind = (env.ip.clone(), env.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&env.frontend_url)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::from(env.clone()))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(video_service.clone()))
            .configure(modules::configure)
    })
    .bind(bind)?
    .workers(2)
    .run()
    .await
}
