//! SmartAds Remote — HTTP client for the backend API.
//!
//! Implements [`smartads_core::remote::RemoteAuthority`] over the
//! backend's REST endpoints. All transport-class failures map to
//! [`RemoteError`](smartads_core::remote::RemoteError) variants the
//! session service treats as "fall back to the local roster".

mod client;
mod config;
mod wire;

pub use client::HttpRemoteAuthority;
pub use config::RemoteConfig;
