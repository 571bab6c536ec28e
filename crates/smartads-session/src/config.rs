//! Session service configuration.

use smartads_core::validate::EmailPolicy;

/// Bootstrap head account seeded when no snapshot exists.
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub email: String,
    /// Raw password; hashed at construction, never stored.
    pub password: String,
    pub name: String,
    pub organization: String,
}

impl Default for SeedAdmin {
    fn default() -> Self {
        Self {
            email: "admin@smartads.com".into(),
            password: "Admin@123".into(),
            name: "Admin User".into(),
            organization: "SmartAds HQ".into(),
        }
    }
}

/// Configuration for the session service.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Which email rule applies at this call site.
    pub email_policy: EmailPolicy,
    /// Optional pepper prepended to passwords before Argon2id hashing.
    pub pepper: Option<String>,
    /// Organization label for accounts whose organization is unknown
    /// (e.g. merged from a backend login response).
    pub organization_label: String,
    /// Seeded head admin; `None` starts with an empty roster.
    pub seed_admin: Option<SeedAdmin>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            email_policy: EmailPolicy::Generic,
            pepper: None,
            organization_label: "SmartAds HQ".into(),
            seed_admin: Some(SeedAdmin::default()),
        }
    }
}
