//! Collector service client
//!
//! HTTP client for the backend collector service: registration checks and
//! collection management on behalf of a registered user. Collection routes
//! authenticate with the bearer token issued at registration.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};
use crate::config::CollectorConfig;
use crate::models::{
    CheckUserRequest, CheckUserResponse, Collection, CreateCollectionRequest, ErrorResponse,
    RegisterRequest, RegisterResponse, RenameCollectionRequest,
};
use crate::state::AuthToken;
use crate::utils::errors::{CollectorError, CollectorResult, OupheError, Result};

/// Operations the bot invokes on the collector service
#[async_trait]
pub trait CollectorApi: Send + Sync {
    /// Look up an existing registration; `success == false` when unknown
    async fn check_user(&self, request: &CheckUserRequest) -> CollectorResult<CheckUserResponse>;

    /// Register a new user and obtain their token
    async fn register_user(&self, request: &RegisterRequest) -> CollectorResult<RegisterResponse>;

    async fn list_collections(&self, token: &AuthToken) -> CollectorResult<Vec<Collection>>;

    async fn create_collection(&self, token: &AuthToken, name: &str) -> CollectorResult<Collection>;

    async fn rename_collection(&self, token: &AuthToken, collection_id: &str, new_name: &str) -> CollectorResult<()>;

    async fn delete_collection(&self, token: &AuthToken, collection_id: &str) -> CollectorResult<()>;
}

/// reqwest-backed collector client
#[derive(Debug, Clone)]
pub struct HttpCollectorClient {
    client: Client,
    base_url: String,
}

impl HttpCollectorClient {
    /// Create a new client for the configured collector
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent("CollectorOuphe-Bot/1.0")
            .build()
            .map_err(OupheError::Http)?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn collection_url(&self, collection_id: &str) -> String {
        self.url(&format!("/collections/{}", urlencoding::encode(collection_id)))
    }

    async fn send(&self, request: RequestBuilder) -> CollectorResult<Response> {
        request.send().await.map_err(|e| {
            error!(error = %e, "Failed to send request to collector service");
            CollectorError::from_transport(e)
        })
    }

    /// Turn a non-success response into a status error carrying its message
    async fn error_from(response: Response) -> CollectorError {
        let status = response.status().as_u16();
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => String::new(),
        };
        error!(status = status, message = %message, "Collector service returned an error");
        CollectorError::Status { status, message }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> CollectorResult<T> {
        response.json::<T>().await.map_err(|e| {
            error!(error = %e, "Failed to decode collector response");
            CollectorError::InvalidResponse(e.to_string())
        })
    }

    async fn expect_json<T: DeserializeOwned>(response: Response, expected: StatusCode) -> CollectorResult<T> {
        if response.status() != expected {
            return Err(Self::error_from(response).await);
        }
        Self::decode(response).await
    }

    async fn expect_success(response: Response) -> CollectorResult<()> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl CollectorApi for HttpCollectorClient {
    async fn check_user(&self, request: &CheckUserRequest) -> CollectorResult<CheckUserResponse> {
        debug!(telegram_id = request.telegram_id, "Checking user in collector service");

        let response = self.send(self.client.post(self.url("/login")).json(request)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(CheckUserResponse { token: String::new(), success: false });
        }
        Self::expect_json(response, StatusCode::OK).await
    }

    async fn register_user(&self, request: &RegisterRequest) -> CollectorResult<RegisterResponse> {
        info!(telegram_id = request.telegram_id, "Registering user in collector service");

        let response = self.send(self.client.post(self.url("/register")).json(request)).await?;
        Self::expect_json(response, StatusCode::CREATED).await
    }

    async fn list_collections(&self, token: &AuthToken) -> CollectorResult<Vec<Collection>> {
        debug!("Listing user's collections");

        let request = self.client.get(self.url("/collections")).bearer_auth(token.as_str());
        let response = self.send(request).await?;
        let collections: Option<Vec<Collection>> = Self::expect_json(response, StatusCode::OK).await?;
        Ok(collections.unwrap_or_default())
    }

    async fn create_collection(&self, token: &AuthToken, name: &str) -> CollectorResult<Collection> {
        debug!(name = name, "Creating collection");

        let body = CreateCollectionRequest { name: name.to_string() };
        let request = self.client
            .post(self.url("/collections"))
            .bearer_auth(token.as_str())
            .json(&body);
        let response = self.send(request).await?;
        Self::expect_json(response, StatusCode::CREATED).await
    }

    async fn rename_collection(&self, token: &AuthToken, collection_id: &str, new_name: &str) -> CollectorResult<()> {
        debug!(collection_id = collection_id, new_name = new_name, "Renaming collection");

        let body = RenameCollectionRequest { name: new_name.to_string() };
        let request = self.client
            .patch(self.collection_url(collection_id))
            .bearer_auth(token.as_str())
            .json(&body);
        let response = self.send(request).await?;
        Self::expect_success(response).await
    }

    async fn delete_collection(&self, token: &AuthToken, collection_id: &str) -> CollectorResult<()> {
        debug!(collection_id = collection_id, "Deleting collection");

        let request = self.client
            .delete(self.collection_url(collection_id))
            .bearer_auth(token.as_str());
        let response = self.send(request).await?;
        Self::expect_success(response).await
    }
}
