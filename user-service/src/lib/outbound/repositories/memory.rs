use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Used when no database URL is configured. Contents are lost on restart.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        // Checked under the write lock so concurrent registrations cannot both succeed
        if users.values().any(|user| user.email == new_user.email) {
            return Err(UserError::EmailAlreadyExists(new_user.email.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: UserId(self.next_id.fetch_add(1, Ordering::Relaxed)),
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        first_name: &PersonName,
        last_name: &PersonName,
    ) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        user.first_name = first_name.clone();
        user.last_name = last_name.clone();
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();

        Ok(())
    }
}
