use thiserror::Error;
use tracing::info;

use crate::session::state::SessionState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("username must not be empty")]
    EmptyUsername,
}

/// Marks a user as signed in. There is no credential check of any kind.
pub struct AuthStub;

impl AuthStub {
    pub fn login(
        session: &mut SessionState,
        username: &str,
        _password: &str,
    ) -> Result<(), AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }
        info!(user = username, "logged in");
        session.set_user(username.to_string());
        Ok(())
    }

    pub fn logout(session: &mut SessionState) {
        if let Some(ref user) = session.user {
            info!(user = user.as_str(), "logged out");
        }
        session.clear_user();
    }
}
