//! Users Management app core
//!
//! Library behind the users-directory app: a remote CRUD API client, the
//! guest/authenticated access gate, and the deep-link resolution state
//! machine that routes incoming user-profile links to the right screen
//! even when the navigation surface is not up yet.

pub mod api;
pub mod auth;
pub mod deeplink;
pub mod navigation;
pub mod settings;
pub mod share_link;
pub mod users;

pub use api::{ApiClient, ApiError, GetUsersParams, NewUser, User};
pub use auth::{AccessGate, AuthError, Credentials, ViewerStatus};
pub use deeplink::{DeepLinkDispatcher, LinkIntent, ReadinessMonitor, ReadinessState};
pub use navigation::{NavigationError, NavigationSurface, Route};
pub use users::UserDirectory;
