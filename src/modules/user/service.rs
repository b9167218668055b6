use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::constants::Env;
use crate::modules::user::model::{SignInModel, SignUpModel, UserResponse};
use crate::modules::user::{model::InsertUser, repository::UserRepository};
use crate::utils::{hash_password, verify_password, Claims};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
    env: Arc<Env>,
}

impl UserService {
    pub fn with_dependencies(repo: Arc<dyn UserRepository + Send + Sync>, env: Arc<Env>) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, env }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UserResponse, error::SystemError> {
        self.repo
            .find_by_id(&id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| error::SystemError::not_found("User not found"))
    }

    pub async fn sign_up(&self, user: SignUpModel) -> Result<Uuid, error::SystemError> {
        let hash_password = hash_password(&user.password)?;

        let new_user = InsertUser { email: user.email.trim().to_lowercase(), hash_password };

        let user_id = self.repo.create(&new_user).await?;
        info!("User {user_id} signed up");
        Ok(user_id)
    }

    pub async fn sign_in(&self, user: SignInModel) -> Result<String, error::SystemError> {
        let user_entity = self
            .repo
            .find_by_email(user.email.trim())
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Incorrect email or password"))?;

        let valid = verify_password(&user_entity.hash_password, &user.password)?;
        if !valid {
            return Err(error::SystemError::unauthorized("Incorrect email or password"));
        }

        Claims::new(&user_entity.id, self.env.access_token_expiration)
            .encode(self.env.jwt_secret.as_bytes())
    }
}
