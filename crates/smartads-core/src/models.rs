//! Domain models for SmartAds.
//!
//! These are the core types shared across all crates.

pub mod account;
pub mod feature;

pub use account::{Account, AccountId, AuthProvider, GoogleIdentity, NewAccount, NewSubUser, SubUserUpdate};
pub use feature::{ALL_FEATURES, Feature, FeatureId, full_catalog};
