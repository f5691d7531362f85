use async_trait::async_trait;
use once_cell::unsync::OnceCell;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::models::{
    ErrorResponse, LoginRequest, SignupRequest, Tag, UpdateUserTagsRequest, UserRecord,
};
use shared::services::{ServiceError, TagService};

use crate::config::FrontendConfig;

thread_local! {
    static SHARED_CLIENT: OnceCell<RentalsClient> = const { OnceCell::new() };
}

/// Lightweight API client for the marketplace endpoints the tag prompt
/// needs.
#[derive(Clone, Debug)]
pub struct RentalsClient {
    base_url: String,
    client: Client,
}

impl RentalsClient {
    /// Create a new API client with the provided base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| Self::new(FrontendConfig::new().api_base_url()))
                .clone()
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn user_tags_url(&self, user_id: &str) -> String {
        self.api_url(&format!("users/{user_id}/tags"))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        let response = request
            .send()
            .await
            .map_err(|err| ServiceError::Transport(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error = response.json::<ErrorResponse>().await.unwrap_or_else(|_| {
            ErrorResponse::new(status.canonical_reason().unwrap_or("request failed"))
        });
        Err(ServiceError::Rejected {
            status: status.as_u16(),
            error,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ServiceError> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|err| ServiceError::Decode(err.to_string()))
    }

    /// Retrieve the signed-in user.
    pub async fn get_profile(&self) -> Result<UserRecord, ServiceError> {
        self.fetch_json(self.client.get(self.api_url("auth/me")))
            .await
    }

    /// Authenticate with email/password credentials.
    pub async fn login(&self, payload: &LoginRequest) -> Result<UserRecord, ServiceError> {
        self.fetch_json(self.client.post(self.api_url("auth/login")).json(payload))
            .await
    }

    /// Create an account and sign in.
    pub async fn signup(&self, payload: &SignupRequest) -> Result<UserRecord, ServiceError> {
        self.fetch_json(self.client.post(self.api_url("auth/signup")).json(payload))
            .await
    }
}

#[async_trait(?Send)]
impl TagService for RentalsClient {
    async fn get_all_tags(&self) -> Result<Vec<Tag>, ServiceError> {
        self.fetch_json(self.client.get(self.api_url("tags"))).await
    }

    async fn get_user_tags(&self, user_id: &str) -> Result<Vec<Tag>, ServiceError> {
        self.fetch_json(self.client.get(self.user_tags_url(user_id)))
            .await
    }

    async fn update_user_tags(
        &self,
        user_id: &str,
        tag_ids: &[String],
    ) -> Result<(), ServiceError> {
        let body = UpdateUserTagsRequest {
            tag_ids: tag_ids.to_vec(),
        };
        self.send(self.client.put(self.user_tags_url(user_id)).json(&body))
            .await?;
        Ok(())
    }

    async fn remove_user_tag(&self, user_id: &str, tag_id: &str) -> Result<(), ServiceError> {
        let url = format!("{}/{tag_id}", self.user_tags_url(user_id));
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
