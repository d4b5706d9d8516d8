//! Data Transfer Objects
//!
//! Request and response types for the chatbot backend endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================
// AUTH DTOs
// ============================================

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Signup request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Successful signup response
///
/// The server normally answers with a confirmation and the new user id.
/// Some deployments also log the user in and include a token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Profile of the authenticated user (`GET /auth/me`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

// ============================================
// MOOD DTOs
// ============================================

/// Mood entry submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMoodEntry {
    pub mood_text: String,
    pub mood_score: i64,
}

/// Acknowledgement for a stored mood entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MoodCreated {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub mood_id: Option<i64>,
}

/// A stored mood entry, as listed by `GET /mood/history`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    pub id: i64,
    pub mood_text: String,
    pub mood_score: i64,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
}

// ============================================
// CHAT DTOs
// ============================================

/// Chat message submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

/// One stored user message and the bot's reply to it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatExchange {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub message: String,
    pub response: String,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub timestamp: Option<DateTime<Utc>>,
}

// ============================================
// ANALYTICS DTOs
// ============================================

/// Daily average mood score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub date: String,
    pub average_score: f64,
}

/// Mood entries bucketed by sentiment
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodSummary {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl MoodSummary {
    pub fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }

    /// Labelled slices in display order
    pub fn slices(&self) -> [(&'static str, u64); 3] {
        [
            ("Positive", self.positive),
            ("Negative", self.negative),
            ("Neutral", self.neutral),
        ]
    }
}

/// Word frequency across the user's chat messages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatWord {
    pub word: String,
    pub count: u64,
}

// ============================================
// ERROR DTOs
// ============================================

/// Error body returned by the backend
///
/// `detail` is either a plain string or a list of validation errors
/// shaped like `{"msg": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorPayload {
    /// Human-readable message carried by the payload, if any
    pub fn into_message(self) -> Option<String> {
        match self.detail {
            Some(Value::String(text)) if !text.is_empty() => return Some(text),
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
        self.message.filter(|m| !m.is_empty())
    }
}

/// Server timestamps are ISO-8601, with or without a UTC offset.
/// Naive values are UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw))),
            None => Ok(None),
        }
    }
}
