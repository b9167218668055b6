use actix_web::web::ServiceConfig;

use crate::modules::asset::handle::serve_asset;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(serve_asset);
}
