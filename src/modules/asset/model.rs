use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};

use crate::api::error;

/// Image formats accepted as video thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailType {
    Png,
    Jpg,
    Jpeg,
}

impl ThumbnailType {
    /// Parses a declared `Content-Type`, ignoring parameters and case.
    pub fn from_content_type(content_type: Option<&str>) -> Result<Self, error::SystemError> {
        let Some(raw) = content_type else {
            return Err(error::SystemError::bad_request("Missing thumbnail content type"));
        };

        let essence = raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Ok(Self::Png),
            "image/jpg" => Ok(Self::Jpg),
            "image/jpeg" => Ok(Self::Jpeg),
            _ => Err(error::SystemError::bad_request(format!(
                "Invalid media type '{essence}', expected image/png or image/jpeg"
            ))),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
        }
    }
}

/// 32 bytes from the OS CSPRNG, URL-safe base64 without padding.
pub fn random_asset_name(extension: &str) -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    format!("{}.{}", URL_SAFE_NO_PAD.encode(bytes), extension)
}
