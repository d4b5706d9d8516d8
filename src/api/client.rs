//! Chatbot REST API Client
//!
//! HTTP client for communicating with the chatbot backend.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use super::backend::Backend;
use super::dto::*;
use super::error::{ClientError, ClientResult};
use crate::config::ApiConfig;
use crate::session::Session;

/// Header carrying a per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Chatbot backend REST client
///
/// Reads the bearer token from the shared [`Session`] on every request,
/// so a login through one view is seen by all others.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: &ApiConfig, session: Session) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Backend base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(request_id = %request_id, method = %method, path, "Backend request");

        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(REQUEST_ID_HEADER, request_id);

        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.request(Method::GET, path), path).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).json(body), path)
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> ClientResult<T> {
        let response = builder.send().await.map_err(|e| {
            let err = ClientError::from_transport(e);
            tracing::warn!(path, error = %err, "Backend unreachable");
            err
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::from_transport)?;

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(|e| {
                tracing::warn!(path, error = %e, "Malformed backend response");
                ClientError::Decode(e.to_string())
            });
        }

        let detail = serde_json::from_slice::<ErrorPayload>(&body)
            .ok()
            .and_then(ErrorPayload::into_message);

        tracing::warn!(
            path,
            status = status.as_u16(),
            detail = detail.as_deref().unwrap_or("-"),
            "Backend returned error"
        );

        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn signup(&self, request: &SignupRequest) -> ClientResult<SignupResponse> {
        self.post("/auth/signup", request).await
    }

    async fn login(&self, credentials: &Credentials) -> ClientResult<TokenResponse> {
        self.post("/auth/login", credentials).await
    }

    async fn current_user(&self) -> ClientResult<UserProfile> {
        self.get("/auth/me").await
    }

    async fn add_mood(&self, entry: &NewMoodEntry) -> ClientResult<MoodCreated> {
        self.post("/mood", entry).await
    }

    async fn mood_history(&self) -> ClientResult<Vec<MoodEntry>> {
        self.get("/mood/history").await
    }

    async fn mood_trend(&self) -> ClientResult<Vec<TrendPoint>> {
        self.get("/analytics/mood-trend").await
    }

    async fn mood_summary(&self) -> ClientResult<MoodSummary> {
        self.get("/analytics/mood-summary").await
    }

    async fn chat_words(&self) -> ClientResult<Vec<ChatWord>> {
        self.get("/analytics/chat-words").await
    }

    async fn chat_history(&self) -> ClientResult<Vec<ChatExchange>> {
        self.get("/chat/history").await
    }

    async fn send_chat(&self, request: &ChatRequest) -> ClientResult<ChatExchange> {
        self.post("/chat", request).await
    }
}
