//! SmartAds Core — domain models, validation rules, and the trait
//! seams shared by the session service, the HTTP remote client, and
//! the snapshot stores.

pub mod error;
pub mod models;
pub mod outcome;
pub mod remote;
pub mod store;
pub mod validate;

pub use error::{SmartadsError, SmartadsResult};
pub use outcome::{Outcome, Source};
