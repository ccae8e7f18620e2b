//! Who is signed in.

use crate::StoreError;
use maison_commerce::user::{Role, User};

/// The signed-in user, if any. Not persisted: the session cookie is the
/// source of truth and `me` is re-fetched on load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    user: Option<User>,
    /// Whether the initial `me` lookup has completed.
    resolved: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Whether the session lookup has finished, so guards can tell
    /// "signed out" from "not known yet".
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Record the result of the session lookup or a login.
    pub fn set_user(&mut self, user: Option<User>) {
        if let Some(u) = &user {
            tracing::debug!(user_id = %u.id, role = u.role.as_str(), "session user set");
        }
        self.user = user;
        self.resolved = true;
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.resolved = true;
    }

    /// Guard for account pages.
    pub fn require_user(&self) -> Result<&User, StoreError> {
        self.user.as_ref().ok_or(StoreError::SignInRequired)
    }

    /// Guard for the admin dashboard.
    pub fn require_role(&self, role: Role) -> Result<&User, StoreError> {
        let user = self.require_user()?;
        if user.role.has_permission(role) {
            Ok(user)
        } else {
            Err(StoreError::Forbidden)
        }
    }
}
