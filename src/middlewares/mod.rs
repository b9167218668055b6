use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::{
    api::error,
    constants::Env,
    utils::{bearer_token, validate_token},
};

/// Caller identity resolved from the `Authorization: Bearer` header.
///
/// Extraction runs in handler-argument order, so placing it after a
/// `web::Path` argument lets a malformed id fail first.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

impl FromRequest for AuthUser {
    type Error = error::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, error::Error> {
    let env = req.app_data::<web::Data<Env>>().ok_or_else(|| {
        log::error!("Env is not registered as app data");
        error::Error::InternalServer
    })?;

    let token = bearer_token(req.headers()).map_err(|e| {
        log::debug!("rejecting request without bearer token: {e}");
        error::Error::unauthorized("Couldn't find JWT")
    })?;

    let id = validate_token(token, &env.jwt_secret).map_err(|e| {
        log::debug!("rejecting bearer token: {e}");
        error::Error::unauthorized("Couldn't validate JWT")
    })?;

    Ok(AuthUser { id })
}
