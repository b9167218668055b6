use std::{path::PathBuf, str::FromStr};

use crate::api::error;

/// Issuer stamped into every access token and required on validation.
pub const TOKEN_ISSUER: &str = "tubely-access";

/// Multipart field carrying the thumbnail image.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Public URL prefix under which stored assets are served.
pub const ASSETS_URL_PREFIX: &str = "/assets";

/// Process configuration. Built once in `main` and shared read-only.
#[derive(Debug, Clone)]
pub struct Env {
    pub jwt_secret: String,
    pub access_token_expiration: u64,
    pub database_url: String,
    pub assets_root: PathBuf,
    pub max_upload_size: usize,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
}

impl Env {
    pub fn load() -> Result<Self, error::SystemError> {
        let jwt_secret = required("JWT_SECRET")?;
        let database_url = required("DATABASE_URL")?;

        let access_token_expiration = parsed("ACCESS_TOKEN_EXPIRATION", 3600)?;
        let max_upload_size = parsed("MAX_UPLOAD_SIZE", 10 << 20)?;

        let assets_root =
            PathBuf::from(std::env::var("ASSETS_ROOT").unwrap_or_else(|_| "./assets".to_string()));
        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parsed("PORT", 8091)?;

        Ok(Env {
            jwt_secret,
            access_token_expiration,
            database_url,
            assets_root,
            max_upload_size,
            frontend_url,
            ip,
            port,
        })
    }
}

fn required(key: &str) -> Result<String, error::SystemError> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(error::SystemError::config(format!(
            "{key} must be set in .env file or environment variable"
        ))),
    }
}

fn parsed<T: FromStr>(key: &str, default: T) -> Result<T, error::SystemError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| error::SystemError::config(format!("{key} has an invalid value: {raw}"))),
        Err(_) => Ok(default),
    }
}
