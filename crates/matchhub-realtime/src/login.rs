//! Registration and login flows, including their presence side-effects.
//!
//! Both paths share the same tail: upsert the gamer presence record
//! under the current session id, promote the session to authenticated,
//! acknowledge the caller, then announce the new gamer to everyone else.

use std::sync::Arc;

use tracing::{info, warn};

use matchhub_auth::AccountService;
use matchhub_core::result::AppResult;
use matchhub_entity::user::User;

use crate::connection::ConnectionHandle;
use crate::message::{events, Envelope};
use crate::presence::GamerDirectory;
use crate::session::SessionRegistry;

/// Drives register/login requests against the account service and applies
/// the session and presence side-effects of a successful authentication.
pub struct LoginService {
    registry: Arc<SessionRegistry>,
    directory: Arc<GamerDirectory>,
    accounts: Arc<AccountService>,
}

impl LoginService {
    /// Create a new login service.
    pub fn new(
        registry: Arc<SessionRegistry>,
        directory: Arc<GamerDirectory>,
        accounts: Arc<AccountService>,
    ) -> Self {
        Self {
            registry,
            directory,
            accounts,
        }
    }

    /// Register a new user, then log the session in.
    pub async fn register(
        &self,
        handle: &Arc<ConnectionHandle>,
        full_name: &str,
        user_name: &str,
        password: &str,
    ) -> AppResult<()> {
        let user = self.accounts.register(full_name, user_name, password).await?;
        self.finish_authentication(handle, &user, events::REGISTER)
            .await
    }

    /// Log an existing user in.
    pub async fn login(
        &self,
        handle: &Arc<ConnectionHandle>,
        user_name: &str,
        password: &str,
    ) -> AppResult<()> {
        let user = self.accounts.login(user_name, password).await?;
        self.finish_authentication(handle, &user, events::LOGIN).await
    }

    /// Shared authentication tail for register and login.
    async fn finish_authentication(
        &self,
        handle: &Arc<ConnectionHandle>,
        user: &User,
        event: &str,
    ) -> AppResult<()> {
        self.directory
            .register_presence(&user.user_name, &user.full_name, &handle.session_id)
            .await?;

        self.registry
            .mark_authenticated(&handle.session_id, &user.user_name);

        info!(
            session_id = %handle.session_id,
            user_name = %user.user_name,
            "Session authenticated"
        );

        handle.send(&Envelope::success(event));

        // Announce the new gamer to everyone else. The caller's login
        // already succeeded, so a failed lookup only suppresses the
        // broadcast.
        match self.directory.profile_for(&handle.session_id).await {
            Ok(Some(gamer)) => {
                self.registry.broadcast_except(
                    &handle.session_id,
                    &Envelope::with_result(events::GAMER_JOINED, &gamer),
                );
            }
            Ok(None) => {}
            Err(e) => {
                warn!(
                    session_id = %handle.session_id,
                    error = %e,
                    "Skipping gamerJoined broadcast"
                );
            }
        }

        Ok(())
    }
}
