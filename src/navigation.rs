//! Navigation surface boundary
//!
//! The screen router is an external collaborator: the app core hands it a
//! named route plus params and gets back success or failure. Screen names
//! mirror the navigator tree (UsersStack nested under the bottom tabs).

use serde_json::{json, Value};
use thiserror::Error;

/// A named in-app destination with its params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    UsersList,
    UserDetails { user_id: String },
    AddEditUser { user_id: Option<String> },
    Profile,
}

impl Route {
    /// Fully-qualified screen name as the router expects it.
    pub fn screen(&self) -> &'static str {
        match self {
            Route::UsersList => "UsersStack.UsersList",
            Route::UserDetails { .. } => "UsersStack.UserDetails",
            Route::AddEditUser { .. } => "UsersStack.AddEditUser",
            Route::Profile => "Profile",
        }
    }

    /// Route params as a JSON object (empty object when the screen takes none).
    pub fn params(&self) -> Value {
        match self {
            Route::UsersList | Route::Profile => json!({}),
            Route::UserDetails { user_id } => json!({ "userId": user_id }),
            Route::AddEditUser { user_id } => match user_id {
                Some(id) => json!({ "userId": id }),
                None => json!({}),
            },
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    /// The surface is mounted but cannot accept routes yet.
    #[error("navigation surface not ready")]
    NotReady,
    /// The surface refused the route after reporting ready.
    #[error("navigation rejected: {0}")]
    Rejected(String),
}

/// The screen router collaborator.
///
/// Implementations switch the visible screen; the app core never renders.
pub trait NavigationSurface: Send + Sync {
    /// Whether the surface currently accepts routes.
    fn is_ready(&self) -> bool;

    /// Switch to the given route. Must not panic on rejection.
    fn navigate(&self, route: &Route) -> Result<(), NavigationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_names() {
        assert_eq!(Route::UsersList.screen(), "UsersStack.UsersList");
        assert_eq!(
            Route::UserDetails { user_id: "42".into() }.screen(),
            "UsersStack.UserDetails"
        );
        assert_eq!(
            Route::AddEditUser { user_id: None }.screen(),
            "UsersStack.AddEditUser"
        );
        assert_eq!(Route::Profile.screen(), "Profile");
    }

    #[test]
    fn test_params() {
        let route = Route::UserDetails { user_id: "7".into() };
        assert_eq!(route.params(), json!({ "userId": "7" }));
        assert_eq!(Route::Profile.params(), json!({}));
        assert_eq!(
            Route::AddEditUser { user_id: Some("3".into()) }.params(),
            json!({ "userId": "3" })
        );
    }
}
