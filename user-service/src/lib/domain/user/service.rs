use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and verification
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn require_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.authenticator.hash_password(command.password.as_str())?;

        let user = self
            .repository
            .create(NewUser {
                email: command.email,
                password_hash,
                first_name: command.first_name,
                last_name: command.last_name,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.require_user(id).await
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let user = self.require_user(id).await?;

        let first_name = command.first_name.unwrap_or(user.first_name);
        let last_name = command.last_name.unwrap_or(user.last_name);

        let updated_user = self
            .repository
            .update_profile(id, &first_name, &last_name)
            .await?;

        tracing::info!(user_id = %updated_user.id, "User profile updated");

        Ok(updated_user)
    }

    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError> {
        let user = self.require_user(id).await?;

        if !self
            .authenticator
            .verify_password(&command.current_password, &user.password_hash)?
        {
            tracing::warn!(user_id = %id, "Password change rejected: current password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        let password_hash = self
            .authenticator
            .hash_password(command.new_password.as_str())?;
        self.repository.update_password(id, &password_hash).await?;

        tracing::info!(user_id = %id, "User password changed");

        Ok(())
    }
}
