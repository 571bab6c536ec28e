//! SmartAds Session — the session/identity store and sub-user
//! directory.
//!
//! [`SessionService`] owns the account roster and the current-account
//! pointer, persists every mutation to a snapshot store, and runs each
//! network-backed operation remote-first with a local fallback.

pub mod config;
pub mod error;
pub mod password;
pub mod service;

pub use config::{SeedAdmin, SessionConfig};
pub use error::SessionError;
pub use service::SessionService;
