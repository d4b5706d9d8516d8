//! HTTP API Client
//!
//! Functions for communicating with the companion service REST API.

use chrono::{DateTime, NaiveDateTime, Utc};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

const API_URL_KEY: &str = "mindful_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

    normalize_base(stored.as_deref().unwrap_or(DEFAULT_API_BASE))
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(API_URL_KEY, &normalize_base(url));
    }
}

fn normalize_base(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        url.to_string()
    }
}

// ============ Request / Response Types ============

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMoodEntry {
    pub mood_text: String,
    pub mood_score: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoodEntry {
    pub id: i64,
    pub mood_text: String,
    pub mood_score: i64,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatExchange {
    #[serde(default)]
    pub message: String,
    pub response: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub average_score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct MoodSummary {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl MoodSummary {
    pub fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }

    /// Pie slices in legend order
    pub fn slices(&self) -> [(&'static str, u64); 3] {
        [
            ("Positive", self.positive),
            ("Negative", self.negative),
            ("Neutral", self.neutral),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatWord {
    pub word: String,
    pub count: u64,
}

/// A failed call: the HTTP status when a response arrived, and whatever
/// message the server put in the body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: Option<String>,
}

impl ApiError {
    fn network(e: impl std::fmt::Display) -> Self {
        Self {
            status: None,
            message: Some(format!("Network error: {}", e)),
        }
    }

    /// Message to show a user, falling back to `fallback`
    pub fn display(&self, fallback: &str) -> String {
        match (self.status, &self.message) {
            (Some(_), Some(message)) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.status, &self.message) {
            (Some(status), Some(message)) => write!(f, "{} ({})", message, status),
            (Some(status), None) => write!(f, "HTTP {}", status),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("Unknown error"),
        }
    }
}

/// Pull a readable message out of an error body: a `detail` string, the
/// `msg` fields of a validation list, or a `message` field.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join(", "));
            }
        }
        _ => {}
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Server timestamps may lack an offset; those are UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Render a server timestamp in the browser's local time
pub fn display_time(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.with_timezone(&chrono::Local).format("%b %d, %Y %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

// ============ API Functions ============

fn with_token(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError {
            status: Some(status),
            message: error_message(&body),
        });
    }

    response.json().await.map_err(|e| ApiError {
        status: None,
        message: Some(format!("Parse error: {}", e)),
    })
}

async fn get<T: DeserializeOwned>(path: &str, token: Option<&str>) -> Result<T, ApiError> {
    let url = format!("{}{}", get_api_base(), path);

    let response = with_token(Request::get(&url), token)
        .send()
        .await
        .map_err(ApiError::network)?;

    read(response).await
}

async fn post<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    token: Option<&str>,
) -> Result<T, ApiError> {
    let url = format!("{}{}", get_api_base(), path);

    let response = with_token(Request::post(&url), token)
        .json(body)
        .map_err(|e| ApiError {
            status: None,
            message: Some(format!("Request build error: {}", e)),
        })?
        .send()
        .await
        .map_err(ApiError::network)?;

    read(response).await
}

/// Create an account
pub async fn signup(request: &SignupRequest) -> Result<SignupResponse, ApiError> {
    post("/auth/signup", request, None).await
}

/// Exchange credentials for a bearer token
pub async fn login(credentials: &Credentials) -> Result<TokenResponse, ApiError> {
    post("/auth/login", credentials, None).await
}

/// Profile of the token's owner
pub async fn fetch_profile(token: &str) -> Result<UserProfile, ApiError> {
    get("/auth/me", Some(token)).await
}

pub async fn add_mood(entry: &NewMoodEntry, token: &str) -> Result<Value, ApiError> {
    post("/mood", entry, Some(token)).await
}

/// Mood entries, newest first
pub async fn fetch_mood_history(token: &str) -> Result<Vec<MoodEntry>, ApiError> {
    get("/mood/history", Some(token)).await
}

pub async fn fetch_mood_trend(token: &str) -> Result<Vec<TrendPoint>, ApiError> {
    get("/analytics/mood-trend", Some(token)).await
}

pub async fn fetch_mood_summary(token: &str) -> Result<MoodSummary, ApiError> {
    get("/analytics/mood-summary", Some(token)).await
}

pub async fn fetch_chat_words(token: &str) -> Result<Vec<ChatWord>, ApiError> {
    get("/analytics/chat-words", Some(token)).await
}

pub async fn fetch_chat_history(token: &str) -> Result<Vec<ChatExchange>, ApiError> {
    get("/chat/history", Some(token)).await
}

pub async fn send_chat(message: &str, token: &str) -> Result<ChatExchange, ApiError> {
    #[derive(Serialize)]
    struct ChatRequest<'a> {
        message: &'a str,
    }

    post("/chat", &ChatRequest { message }, Some(token)).await
}
