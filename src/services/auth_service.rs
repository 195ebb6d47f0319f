use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{password, JwtService},
    errors::{AppError, AppResult, AuthError},
    models::{
        domain::User,
        dto::{
            request::{LoginRequest, RegisterRequest},
            response::{AuthResponse, UserResponse},
        },
    },
    repositories::UserRepository,
};

pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>, jwt_service: JwtService) -> Self {
        Self {
            user_repository,
            jwt_service,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserResponse> {
        request.validate()?;

        if self
            .user_repository
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "User with username '{}' already exists",
                request.username
            )));
        }

        let password_hash = password::hash_password(&request.password)?;
        let user = self
            .user_repository
            .create(User::new(&request.username, &password_hash))
            .await?;

        log::info!("Registered user '{}'", user.username);
        Ok(UserResponse::from(&user))
    }

    /// Unknown username and wrong password produce the same error, so the
    /// response does not reveal which usernames exist.
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = self
            .user_repository
            .find_by_username(&request.username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.jwt_service.create_token(&user)?;

        Ok(AuthResponse {
            token,
            user: UserResponse::from(&user),
        })
    }
}
