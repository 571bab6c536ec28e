//! Integration tests for the HTTP client against a mock backend.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use smartads_core::models::{FeatureId, SubUserUpdate};
use smartads_core::remote::{
    AddSubUserInput, GoogleExchangeInput, RemoteAuthority, RemoteError, SignupInput,
};
use smartads_remote::{HttpRemoteAuthority, RemoteConfig};

async fn mock_login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == "admin@smartads.com" && body["password"] == "Admin@123" {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "user": {"id": 1, "email": "admin@smartads.com", "fullName": "Admin User", "role": "head"}
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "error": "Invalid credentials"})),
        )
    }
}

async fn mock_signup(Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == "taken@x.com" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"success": false, "error": "Email already registered"})),
        );
    }
    assert_eq!(body["password"], body["confirmPassword"]);
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn mock_google_signup(Json(body): Json<Value>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "user": {"id": 7, "email": body["email"], "fullName": body["name"], "role": "head"}
        })),
    )
}

async fn mock_add_sub_user(Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == "taken@x.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Email already exists"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "subUser": {"id": 42, "createdAt": "2025-06-01T10:00:00Z"}
        })),
    )
}

async fn mock_update_sub_user(Path(id): Path<u64>, Json(_): Json<Value>) -> impl IntoResponse {
    if id == 99 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Email already exists"})),
        );
    }
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn mock_delete_sub_user(Path(_id): Path<u64>) -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn mock_list_sub_users(Path(head_id): Path<u64>) -> impl IntoResponse {
    assert_eq!(head_id, 1);
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "subUsers": [
                {"id": 2, "name": "Sam", "email": "sam@x.com", "allowedFeatures": ["logo"], "createdAt": "2025-06-01T10:00:00Z"}
            ]
        })),
    )
}

/// Spin up the mock backend and return a client pointed at it.
async fn client_against_mock() -> HttpRemoteAuthority {
    let app = Router::new()
        .route("/api/login", post(mock_login))
        .route("/api/signup", post(mock_signup))
        .route("/api/google-signup", post(mock_google_signup))
        .route("/api/add-subuser", post(mock_add_sub_user))
        .route("/api/update-subuser/{id}", put(mock_update_sub_user))
        .route("/api/delete-subuser/{id}", delete(mock_delete_sub_user))
        .route("/api/get-subusers/{id}", get(mock_list_sub_users));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HttpRemoteAuthority::new(&RemoteConfig {
        base_url: format!("http://{addr}"),
        timeout_ms: 2_000,
    })
    .unwrap()
}

#[tokio::test]
async fn login_success_returns_identity() {
    let client = client_against_mock().await;

    let identity = client.login("admin@smartads.com", "Admin@123").await.unwrap();
    assert_eq!(identity.id, 1);
    assert_eq!(identity.full_name, "Admin User");
    assert_eq!(identity.role, "head");
}

#[tokio::test]
async fn login_rejection_is_a_business_error() {
    let client = client_against_mock().await;

    let err = client.login("admin@smartads.com", "wrong").await.unwrap_err();
    match err {
        RemoteError::Rejected(msg) => assert_eq!(msg, "Invalid credentials"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn signup_sends_matching_confirmation() {
    let client = client_against_mock().await;

    client
        .signup(SignupInput {
            full_name: "Bilal".into(),
            email: "bilal@example.com".into(),
            password: "Sqr1bble!".into(),
            role: "head".into(),
        })
        .await
        .unwrap();

    let err = client
        .signup(SignupInput {
            full_name: "Bilal".into(),
            email: "taken@x.com".into(),
            password: "Sqr1bble!".into(),
            role: "head".into(),
        })
        .await
        .unwrap_err();
    assert!(err.is_rejection());
}

#[tokio::test]
async fn google_exchange_returns_backend_identity() {
    let client = client_against_mock().await;

    let identity = client
        .google_exchange(GoogleExchangeInput {
            email: "g@gmail.com".into(),
            name: "G User".into(),
            google_id: "104857".into(),
            picture: None,
        })
        .await
        .unwrap();

    assert_eq!(identity.id, 7);
    assert_eq!(identity.email, "g@gmail.com");
    assert_eq!(identity.full_name, "G User");
}

#[tokio::test]
async fn add_sub_user_returns_created_record() {
    let client = client_against_mock().await;

    let created = client
        .add_sub_user(AddSubUserInput {
            head_user_id: 1,
            name: "Sam".into(),
            email: "sam@x.com".into(),
            password: "Abcdef1!".into(),
            allowed_features: vec![FeatureId::Logo],
        })
        .await
        .unwrap();

    assert_eq!(created.id, 42);
}

#[tokio::test]
async fn add_sub_user_duplicate_is_rejected() {
    let client = client_against_mock().await;

    let err = client
        .add_sub_user(AddSubUserInput {
            head_user_id: 1,
            name: "Sam".into(),
            email: "taken@x.com".into(),
            password: "Abcdef1!".into(),
            allowed_features: vec![FeatureId::Logo],
        })
        .await
        .unwrap_err();

    assert!(err.is_rejection());
}

#[tokio::test]
async fn update_forwards_backend_rejection() {
    let client = client_against_mock().await;

    let ok = client
        .update_sub_user(
            2,
            &SubUserUpdate {
                name: Some("Sammy".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(ok.is_ok());

    let err = client
        .update_sub_user(
            99,
            &SubUserUpdate {
                email: Some("taken@x.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_rejection());
}

#[tokio::test]
async fn delete_and_list_round_trip() {
    let client = client_against_mock().await;

    client.delete_sub_user(2).await.unwrap();

    let subs = client.list_sub_users(1).await.unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].email, "sam@x.com");
    assert_eq!(subs[0].allowed_features, vec![FeatureId::Logo]);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Nothing listens on this port.
    let client = HttpRemoteAuthority::new(&RemoteConfig {
        base_url: "http://127.0.0.1:9".into(),
        timeout_ms: 500,
    })
    .unwrap();

    let err = client.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)));
}
