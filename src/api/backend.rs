use async_trait::async_trait;

use super::dto::*;
use super::error::ClientResult;

/// Operations the views need from the chatbot backend
///
/// [`ApiClient`](super::ApiClient) is the HTTP implementation. Views only
/// see this trait, so they can be driven by an in-process double.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn signup(&self, request: &SignupRequest) -> ClientResult<SignupResponse>;

    async fn login(&self, credentials: &Credentials) -> ClientResult<TokenResponse>;

    async fn current_user(&self) -> ClientResult<UserProfile>;

    async fn add_mood(&self, entry: &NewMoodEntry) -> ClientResult<MoodCreated>;

    /// Newest first, as ordered by the server
    async fn mood_history(&self) -> ClientResult<Vec<MoodEntry>>;

    async fn mood_trend(&self) -> ClientResult<Vec<TrendPoint>>;

    async fn mood_summary(&self) -> ClientResult<MoodSummary>;

    async fn chat_words(&self) -> ClientResult<Vec<ChatWord>>;

    /// Oldest first
    async fn chat_history(&self) -> ClientResult<Vec<ChatExchange>>;

    async fn send_chat(&self, request: &ChatRequest) -> ClientResult<ChatExchange>;
}
