use actix_web::{get, post, web};

use crate::{
    api::{error, success},
    middlewares::AuthUser,
    modules::user::{model, service::UserService},
    utils::ValidatedJson,
};

#[get("/me")]
pub async fn get_profile(
    user_service: web::Data<UserService>,
    user: AuthUser,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.get_by_id(user.id).await?;
    Ok(success::Success::ok(user))
}

#[post("/signup")]
pub async fn sign_up(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::SignUpModel>,
) -> Result<success::Success<model::SignUpResponse>, error::Error> {
    let user_id = user_service.sign_up(user_data.0).await?;
    Ok(success::Success::created(model::SignUpResponse { id: user_id }))
}

#[post("/signin")]
pub async fn sign_in(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::SignInModel>,
) -> Result<success::Success<model::SignInResponse>, error::Error> {
    let access_token = user_service.sign_in(user_data.0).await?;
    Ok(success::Success::ok(model::SignInResponse { access_token }))
}
