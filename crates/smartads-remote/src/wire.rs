//! Wire DTOs for the backend REST contracts.
//!
//! Field names follow the backend's camelCase JSON. Responses share
//! the `{success, ..., error}` envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartads_core::models::{AccountId, FeatureId};

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireIdentity {
    pub id: AccountId,
    pub email: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdentityResponse {
    #[serde(default)]
    pub success: bool,
    pub user: Option<WireIdentity>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignupRequest<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub role: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleSignupRequest<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub google_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddSubUserRequest<'a> {
    pub head_user_id: AccountId,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub allowed_features: &'a [FeatureId],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSubUserCreated {
    pub id: AccountId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddSubUserResponse {
    #[serde(default)]
    pub success: bool,
    pub sub_user: Option<WireSubUserCreated>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SimpleResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSubUser {
    pub id: AccountId,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub allowed_features: Vec<FeatureId>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListSubUsersResponse {
    #[serde(default)]
    pub success: bool,
    pub sub_users: Option<Vec<WireSubUser>>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_user_request_uses_backend_field_names() {
        let req = AddSubUserRequest {
            head_user_id: 1,
            name: "Sam",
            email: "sam@x.com",
            password: "Abcdef1!",
            allowed_features: &[FeatureId::Logo, FeatureId::Poster],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["headUserId"], 1);
        assert_eq!(json["allowedFeatures"][0], "logo");
        assert_eq!(json["allowedFeatures"][1], "poster");
    }

    #[test]
    fn identity_response_parses_success_envelope() {
        let body = r#"{"success":true,"user":{"id":9,"email":"a@b.com","fullName":"A B","role":"head"}}"#;
        let resp: IdentityResponse = serde_json::from_str(body).unwrap();
        assert!(resp.success);
        let user = resp.user.unwrap();
        assert_eq!(user.id, 9);
        assert_eq!(user.full_name, "A B");
    }

    #[test]
    fn identity_response_parses_error_envelope() {
        let body = r#"{"success":false,"error":"Invalid credentials"}"#;
        let resp: IdentityResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.success);
        assert!(resp.user.is_none());
        assert_eq!(resp.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn list_response_tolerates_missing_features() {
        let body = r#"{"success":true,"subUsers":[{"id":3,"email":"sam@x.com","createdAt":null}]}"#;
        let resp: ListSubUsersResponse = serde_json::from_str(body).unwrap();
        let subs = resp.sub_users.unwrap();
        assert_eq!(subs[0].id, 3);
        assert!(subs[0].allowed_features.is_empty());
        assert!(subs[0].created_at.is_none());
    }

    #[test]
    fn google_signup_request_skips_absent_picture() {
        let req = GoogleSignupRequest {
            email: "g@x.com",
            name: "G",
            google_id: "104",
            picture: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["googleId"], "104");
        assert!(json.get("picture").is_none());
    }
}
