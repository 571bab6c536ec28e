//! Shared validation rules for emails and passwords.
//!
//! Two email policies exist because the product uses two divergent
//! rules at different call sites: a generic any-TLD check and a
//! stricter enumerated allow-list. Which one applies is configuration.

/// TLD allow-list used by the strict email policy.
pub const STRICT_TLDS: &[&str] = &["com", "edu", "pk", "net", "org", "gov", "edu.pk", "com.pk"];

/// Special characters that satisfy the password symbol class.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Email acceptance policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EmailPolicy {
    /// Any alphabetic TLD of two or more letters.
    #[default]
    Generic,
    /// Additionally require the domain to end in one of the listed TLDs.
    AllowedTlds(Vec<String>),
}

impl EmailPolicy {
    /// The enumerated-TLD variant with the product's stock list.
    pub fn strict() -> Self {
        EmailPolicy::AllowedTlds(STRICT_TLDS.iter().map(|t| (*t).to_string()).collect())
    }
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

/// Validate an email address under the given policy.
///
/// Local part: `[A-Za-z0-9._-]+`. Domain: alphanumeric/dot/hyphen with
/// at least one dot and an alphabetic TLD of two or more letters.
pub fn validate_email(email: &str, policy: &EmailPolicy) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(is_local_char) {
        return false;
    }
    if domain.contains('@') || !domain.chars().all(is_domain_char) {
        return false;
    }
    let Some((name, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if name.is_empty() || tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    match policy {
        EmailPolicy::Generic => true,
        EmailPolicy::AllowedTlds(tlds) => {
            let domain = domain.to_lowercase();
            tlds.iter().any(|t| domain.ends_with(&format!(".{t}")))
        }
    }
}

/// Per-class password strength report.
///
/// Each class is reported independently so the UI can progressively
/// disclose what is still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordReport {
    /// Length >= 8.
    pub min_length: bool,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub has_special: bool,
}

impl PasswordReport {
    pub fn is_valid(&self) -> bool {
        self.min_length && self.has_upper && self.has_lower && self.has_digit && self.has_special
    }

    /// Names of the checks that failed, for field-attributable errors.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if !self.min_length {
            out.push("8+ characters");
        }
        if !self.has_upper {
            out.push("an uppercase letter");
        }
        if !self.has_lower {
            out.push("a lowercase letter");
        }
        if !self.has_digit {
            out.push("a number");
        }
        if !self.has_special {
            out.push("a special character");
        }
        out
    }
}

/// Evaluate password strength.
pub fn check_password(password: &str) -> PasswordReport {
    PasswordReport {
        min_length: password.chars().count() >= 8,
        has_upper: password.chars().any(|c| c.is_ascii_uppercase()),
        has_lower: password.chars().any(|c| c.is_ascii_lowercase()),
        has_digit: password.chars().any(|c| c.is_ascii_digit()),
        has_special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
    }
}
