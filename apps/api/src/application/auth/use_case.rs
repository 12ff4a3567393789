use super::dto::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::application::{non_empty, validation_error};
use crate::domain::shared::errors::DomainError;
use crate::domain::user::{
    entity::{NewUser, ProfileUpdate, User},
    repository::UserRepository,
    value_objects::Email,
};
use std::sync::Arc;
use validator::Validate;

pub struct AuthUseCase {
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl AuthUseCase {
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        if request.name.trim().is_empty()
            || request.email.trim().is_empty()
            || request.password.is_empty()
            || request.password_confirm.is_empty()
        {
            return Err(DomainError::ValidationError(
                "Please provide all required fields".into(),
            ));
        }
        if request.password != request.password_confirm {
            return Err(DomainError::ValidationError("Passwords do not match".into()));
        }

        let request = RegisterRequest {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            ..request
        };
        request.validate().map_err(validation_error)?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(DomainError::ValidationError("Email is already in use".into()));
        }

        let password_hash = bcrypt::hash(&request.password, self.bcrypt_cost).map_err(|e| {
            DomainError::InfrastructureError(format!("Password hashing failed: {}", e))
        })?;

        let user = self
            .users
            .create(&NewUser {
                name: request.name,
                email: request.email,
                password_hash,
            })
            .await?;
        tracing::info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<User, DomainError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(DomainError::ValidationError(
                "Please provide email and password".into(),
            ));
        }
        // A malformed address cannot belong to any account.
        let email = Email::new(&request.email).map_err(|_| DomainError::Unauthorized)?;

        let user = self
            .users
            .find_by_email(&email.value)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        let valid = bcrypt::verify(&request.password, &user.password_hash).map_err(|e| {
            DomainError::InfrastructureError(format!("Password verification failed: {}", e))
        })?;
        if !valid {
            tracing::debug!(user_id = %user.id, "login rejected: wrong password");
            return Err(DomainError::Unauthorized);
        }
        Ok(user)
    }

    /// Resolve an authenticated actor id to its account.
    pub async fn current_user(&self, actor: uuid::Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(actor)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".into()))
    }

    pub async fn update_profile(
        &self,
        actor: uuid::Uuid,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let request = UpdateProfileRequest {
            name: non_empty(request.name),
            ..request
        };
        request.validate().map_err(validation_error)?;

        let update = ProfileUpdate {
            name: request.name,
            bio: request.bio,
            avatar: non_empty(request.avatar),
        };
        self.users
            .update_profile(actor, &update)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".into()))
    }
}
