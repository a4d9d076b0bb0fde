//! Account registration and login.

use std::sync::Arc;

use tracing::debug;

use matchhub_core::error::AppError;
use matchhub_core::result::AppResult;
use matchhub_entity::user::{NewUser, User};
use matchhub_entity::UserStore;

use crate::password::hasher::PasswordHasher;

/// Credential checks for registration and login.
///
/// Produces the authenticated [`User`] on success; session promotion and
/// presence side-effects are the realtime layer's concern.
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl AccountService {
    /// Create a new account service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
        }
    }

    /// Register a new user.
    ///
    /// Fails with a validation error on empty fields and an already-exists
    /// error when the user name is taken.
    pub async fn register(
        &self,
        full_name: &str,
        user_name: &str,
        password: &str,
    ) -> AppResult<User> {
        if full_name.is_empty() || user_name.is_empty() || password.is_empty() {
            return Err(AppError::validation(
                "Full name, user name and password are required",
            ));
        }

        if self.users.find_by_user_name(user_name).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "User with user name {user_name} already exists"
            )));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create(&NewUser {
                user_name: user_name.to_string(),
                full_name: full_name.to_string(),
                password_hash,
            })
            .await?;

        debug!(user_name = %user.user_name, "Registered new user");
        Ok(user)
    }

    /// Verify login credentials.
    ///
    /// An unknown user name and a wrong password produce the same error so
    /// the response does not leak which half was wrong.
    pub async fn login(&self, user_name: &str, password: &str) -> AppResult<User> {
        let user = match self.users.find_by_user_name(user_name).await? {
            Some(user) => user,
            None => return Err(AppError::not_authenticated("User or Password is incorrect")),
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::not_authenticated("User or Password is incorrect"));
        }

        debug!(user_name = %user.user_name, "Login credentials verified");
        Ok(user)
    }
}
