//! HTTP implementation of the remote authority.

use std::time::Duration;

use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use smartads_core::models::{AccountId, SubUserUpdate};
use smartads_core::remote::{
    AddSubUserInput, GoogleExchangeInput, RemoteAuthority, RemoteError, RemoteIdentity,
    RemoteResult, RemoteSubUser, SignupInput, SubUserCreated,
};
use tracing::debug;

use crate::config::RemoteConfig;
use crate::wire::{
    AddSubUserRequest, AddSubUserResponse, GoogleSignupRequest, IdentityResponse, LoginRequest,
    ListSubUsersResponse, SignupRequest, SimpleResponse,
};

/// Backend API client.
pub struct HttpRemoteAuthority {
    http_client: HttpClient,
    base_url: String,
}

impl HttpRemoteAuthority {
    /// Build a client from the given configuration.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Decode a response envelope, mapping backend business errors to
    /// [`RemoteError::Rejected`] and everything else to the
    /// transport-class variants.
    async fn decode<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| RemoteError::InvalidResponse(e.to_string()));
        }

        // Non-2xx with a readable {error} body is a backend decision,
        // not a transport fault.
        if status == StatusCode::BAD_REQUEST
            || status == StatusCode::UNAUTHORIZED
            || status == StatusCode::CONFLICT
            || status == StatusCode::NOT_FOUND
        {
            if let Ok(body) = response.json::<SimpleResponse>().await {
                if let Some(error) = body.error {
                    return Err(RemoteError::Rejected(error));
                }
            }
        }

        Err(RemoteError::UnexpectedStatus(status.as_u16()))
    }

    fn identity_from(response: IdentityResponse) -> RemoteResult<RemoteIdentity> {
        if !response.success {
            return Err(RemoteError::Rejected(
                response.error.unwrap_or_else(|| "request failed".into()),
            ));
        }
        let user = response
            .user
            .ok_or_else(|| RemoteError::InvalidResponse("missing user in success body".into()))?;
        Ok(RemoteIdentity {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        })
    }
}

impl RemoteAuthority for HttpRemoteAuthority {
    async fn login(&self, email: &str, password: &str) -> RemoteResult<RemoteIdentity> {
        let response = self
            .http_client
            .post(self.url("/api/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        debug!(status = %response.status(), "login response");
        Self::identity_from(Self::decode::<IdentityResponse>(response).await?)
    }

    async fn signup(&self, input: SignupInput) -> RemoteResult<()> {
        let response = self
            .http_client
            .post(self.url("/api/signup"))
            .json(&SignupRequest {
                full_name: &input.full_name,
                email: &input.email,
                password: &input.password,
                confirm_password: &input.password,
                role: &input.role,
            })
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let body = Self::decode::<SimpleResponse>(response).await?;
        if !body.success {
            return Err(RemoteError::Rejected(
                body.error.unwrap_or_else(|| "signup failed".into()),
            ));
        }
        Ok(())
    }

    async fn google_exchange(&self, input: GoogleExchangeInput) -> RemoteResult<RemoteIdentity> {
        let response = self
            .http_client
            .post(self.url("/api/google-signup"))
            .json(&GoogleSignupRequest {
                email: &input.email,
                name: &input.name,
                google_id: &input.google_id,
                picture: input.picture.as_deref(),
            })
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Self::identity_from(Self::decode::<IdentityResponse>(response).await?)
    }

    async fn add_sub_user(&self, input: AddSubUserInput) -> RemoteResult<SubUserCreated> {
        let response = self
            .http_client
            .post(self.url("/api/add-subuser"))
            .json(&AddSubUserRequest {
                head_user_id: input.head_user_id,
                name: &input.name,
                email: &input.email,
                password: &input.password,
                allowed_features: &input.allowed_features,
            })
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let body = Self::decode::<AddSubUserResponse>(response).await?;
        if !body.success {
            return Err(RemoteError::Rejected(
                body.error.unwrap_or_else(|| "failed to add sub-user".into()),
            ));
        }
        let created = body.sub_user.ok_or_else(|| {
            RemoteError::InvalidResponse("missing subUser in success body".into())
        })?;
        Ok(SubUserCreated {
            id: created.id,
            created_at: created.created_at,
        })
    }

    async fn update_sub_user(&self, id: AccountId, updates: &SubUserUpdate) -> RemoteResult<()> {
        let response = self
            .http_client
            .put(self.url(&format!("/api/update-subuser/{id}")))
            .json(updates)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let body = Self::decode::<SimpleResponse>(response).await?;
        if !body.success {
            return Err(RemoteError::Rejected(
                body.error.unwrap_or_else(|| "failed to update sub-user".into()),
            ));
        }
        Ok(())
    }

    async fn delete_sub_user(&self, id: AccountId) -> RemoteResult<()> {
        let response = self
            .http_client
            .delete(self.url(&format!("/api/delete-subuser/{id}")))
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let body = Self::decode::<SimpleResponse>(response).await?;
        if !body.success {
            return Err(RemoteError::Rejected(
                body.error.unwrap_or_else(|| "failed to delete sub-user".into()),
            ));
        }
        Ok(())
    }

    async fn list_sub_users(&self, head_user_id: AccountId) -> RemoteResult<Vec<RemoteSubUser>> {
        let response = self
            .http_client
            .get(self.url(&format!("/api/get-subusers/{head_user_id}")))
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let body = Self::decode::<ListSubUsersResponse>(response).await?;
        if !body.success {
            return Err(RemoteError::Rejected(
                body.error.unwrap_or_else(|| "failed to list sub-users".into()),
            ));
        }

        Ok(body
            .sub_users
            .unwrap_or_default()
            .into_iter()
            .map(|s| RemoteSubUser {
                id: s.id,
                name: s.name,
                email: s.email,
                allowed_features: s.allowed_features,
                created_at: s.created_at,
            })
            .collect())
    }
}
