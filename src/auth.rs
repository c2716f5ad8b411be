//! Access gate: viewer status and its transitions
//!
//! One tri-state value (`Unauthenticated` / `Guest` / `Authenticated`) plus
//! the "has seen entry screen" flag, mutated only through the named
//! transitions. Authenticated and Guest are mutually exclusive by
//! construction; the flag goes false -> true within a session and resets
//! only on logout.

use std::sync::Mutex;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Viewer's access level. Guest grants read access without a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerStatus {
    Unauthenticated,
    Guest,
    Authenticated,
}

/// Signed-in account, present only while `Authenticated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
}

#[derive(Debug)]
struct GateState {
    status: ViewerStatus,
    has_seen_entry_screen: bool,
    account: Option<Account>,
}

/// Owns the viewer status. Screens read through the accessors; only the
/// transition methods write.
pub struct AccessGate {
    state: Mutex<GateState>,
}

impl AccessGate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState {
                status: ViewerStatus::Unauthenticated,
                has_seen_entry_screen: false,
                account: None,
            }),
        }
    }

    pub fn current_status(&self) -> ViewerStatus {
        self.state.lock().unwrap().status
    }

    pub fn has_seen_entry_screen(&self) -> bool {
        self.state.lock().unwrap().has_seen_entry_screen
    }

    pub fn account(&self) -> Option<Account> {
        self.state.lock().unwrap().account.clone()
    }

    /// Profile is a full-session screen; guests get the login prompt instead.
    pub fn can_view_profile(&self) -> bool {
        self.current_status() == ViewerStatus::Authenticated
    }

    /// Authenticate with email and password.
    ///
    /// Credential validation is delegated to the auth backend in a real
    /// deployment; here a well-formed, non-empty pair is accepted.
    pub fn login(&self, credentials: &Credentials) -> Result<ViewerStatus, AuthError> {
        if credentials.email.trim().is_empty()
            || !credentials.email.contains('@')
            || credentials.password.is_empty()
        {
            return Err(AuthError::InvalidCredentials);
        }

        let mut state = self.state.lock().unwrap();
        state.status = ViewerStatus::Authenticated;
        state.has_seen_entry_screen = true;
        state.account = Some(Account {
            id: "1".to_string(),
            email: credentials.email.clone(),
            name: "Demo User".to_string(),
        });
        info!("[Auth] Logged in as {}", credentials.email);
        Ok(state.status)
    }

    /// Register a new account; authenticates on success like `login`.
    pub fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<ViewerStatus, AuthError> {
        if email.trim().is_empty() || !email.contains('@') || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let mut state = self.state.lock().unwrap();
        state.status = ViewerStatus::Authenticated;
        state.has_seen_entry_screen = true;
        state.account = Some(Account {
            id: "1".to_string(),
            email: email.to_string(),
            name: name.to_string(),
        });
        info!("[Auth] Signed up as {}", email);
        Ok(state.status)
    }

    /// Browse without a session. Marks the entry screen as seen.
    pub fn continue_as_guest(&self) -> ViewerStatus {
        let mut state = self.state.lock().unwrap();
        state.status = ViewerStatus::Guest;
        state.has_seen_entry_screen = true;
        state.account = None;
        info!("[Auth] Continuing as guest");
        state.status
    }

    /// Drop the session and force the entry screen on next launch.
    pub fn logout(&self) -> ViewerStatus {
        let mut state = self.state.lock().unwrap();
        state.status = ViewerStatus::Unauthenticated;
        state.has_seen_entry_screen = false;
        state.account = None;
        info!("[Auth] Logged out");
        state.status
    }

    /// Grant guest access for an incoming deep link, but only when the
    /// viewer has never been through the entry screen. Never touches an
    /// existing session; calling it again is a no-op.
    pub fn auto_elevate_if_unseen(&self) -> ViewerStatus {
        let mut state = self.state.lock().unwrap();
        if state.status == ViewerStatus::Unauthenticated && !state.has_seen_entry_screen {
            state.status = ViewerStatus::Guest;
            state.has_seen_entry_screen = true;
            info!("[Auth] Auto-elevated to guest for deep link");
        }
        state.status
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_initial_state() {
        let gate = AccessGate::new();
        assert_eq!(gate.current_status(), ViewerStatus::Unauthenticated);
        assert!(!gate.has_seen_entry_screen());
        assert!(gate.account().is_none());
    }

    #[test]
    fn test_login_success() {
        let gate = AccessGate::new();
        let status = gate.login(&creds("demo@example.com", "hunter2")).unwrap();
        assert_eq!(status, ViewerStatus::Authenticated);
        assert!(gate.has_seen_entry_screen());
        assert_eq!(gate.account().unwrap().email, "demo@example.com");
        assert!(gate.can_view_profile());
    }

    #[test]
    fn test_login_invalid_credentials() {
        let gate = AccessGate::new();
        assert_eq!(
            gate.login(&creds("", "pw")),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            gate.login(&creds("not-an-email", "pw")),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            gate.login(&creds("demo@example.com", "")),
            Err(AuthError::InvalidCredentials)
        );
        // Failed login leaves the gate untouched
        assert_eq!(gate.current_status(), ViewerStatus::Unauthenticated);
        assert!(!gate.has_seen_entry_screen());
    }

    #[test]
    fn test_guest_mode() {
        let gate = AccessGate::new();
        assert_eq!(gate.continue_as_guest(), ViewerStatus::Guest);
        assert!(gate.has_seen_entry_screen());
        assert!(!gate.can_view_profile());
    }

    #[test]
    fn test_logout_resets_entry_screen() {
        let gate = AccessGate::new();
        gate.login(&creds("demo@example.com", "pw")).unwrap();
        assert_eq!(gate.logout(), ViewerStatus::Unauthenticated);
        assert!(!gate.has_seen_entry_screen());
        assert!(gate.account().is_none());
    }

    #[test]
    fn test_auto_elevate_idempotent() {
        let gate = AccessGate::new();
        assert_eq!(gate.auto_elevate_if_unseen(), ViewerStatus::Guest);
        // Second call is a no-op with the same result
        assert_eq!(gate.auto_elevate_if_unseen(), ViewerStatus::Guest);
        assert!(gate.has_seen_entry_screen());
    }

    #[test]
    fn test_auto_elevate_never_touches_session() {
        let gate = AccessGate::new();
        gate.login(&creds("demo@example.com", "pw")).unwrap();
        assert_eq!(gate.auto_elevate_if_unseen(), ViewerStatus::Authenticated);

        // Logged out but the viewer has seen the entry screen reset, so the
        // next deep link may elevate again
        gate.logout();
        assert_eq!(gate.auto_elevate_if_unseen(), ViewerStatus::Guest);
    }

    #[test]
    fn test_signup_authenticates() {
        let gate = AccessGate::new();
        let status = gate.signup("new@example.com", "pw", "New User").unwrap();
        assert_eq!(status, ViewerStatus::Authenticated);
        assert_eq!(gate.account().unwrap().name, "New User");
    }
}
