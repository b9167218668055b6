use actix_web::{get, web, HttpResponse};

use crate::api::error;
use crate::modules::asset::storage::AssetStorage;

#[get("/assets/{name}")]
pub async fn serve_asset(
    storage: web::Data<AssetStorage>,
    name: web::Path<String>,
) -> Result<HttpResponse, error::Error> {
    let bytes = storage.read(&name).await?;
    let content_type = mime_guess::from_path(name.as_str()).first_or_octet_stream();

    Ok(HttpResponse::Ok().content_type(content_type.to_string()).body(bytes))
}
