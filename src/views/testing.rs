//! In-process backend double for view tests

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::{Arc, Mutex};

use crate::api::*;
use crate::session::Session;
use crate::views::ViewContext;

/// Canned reply: a value, or an error status with optional detail
pub(crate) type Reply<T> = Result<T, (u16, Option<String>)>;

pub(crate) struct StubBackend {
    session: Session,
    pub signup: Mutex<Reply<SignupResponse>>,
    pub login: Mutex<Reply<TokenResponse>>,
    pub me: Mutex<Reply<UserProfile>>,
    pub add_mood: Mutex<Reply<MoodCreated>>,
    pub mood_history: Mutex<Reply<Vec<MoodEntry>>>,
    pub trend: Mutex<Reply<Vec<TrendPoint>>>,
    pub summary: Mutex<Reply<MoodSummary>>,
    pub words: Mutex<Reply<Vec<ChatWord>>>,
    pub chat_history: Mutex<Reply<Vec<ChatExchange>>>,
    pub chat: Mutex<Reply<ChatExchange>>,
    /// Endpoint name and the bearer token seen, per call
    calls: Mutex<Vec<(&'static str, Option<String>)>>,
}

impl StubBackend {
    pub fn new(session: Session) -> Self {
        fn missing<T>() -> Reply<T> {
            Err((404, Some("Not Found".to_string())))
        }

        Self {
            session,
            signup: Mutex::new(missing()),
            login: Mutex::new(missing()),
            me: Mutex::new(missing()),
            add_mood: Mutex::new(missing()),
            mood_history: Mutex::new(missing()),
            trend: Mutex::new(missing()),
            summary: Mutex::new(missing()),
            words: Mutex::new(missing()),
            chat_history: Mutex::new(missing()),
            chat: Mutex::new(missing()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set<T>(slot: &Mutex<Reply<T>>, reply: Reply<T>) {
        *slot.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(|(name, _)| *name).collect()
    }

    pub fn tokens_seen(&self) -> Vec<Option<String>> {
        self.calls.lock().unwrap().iter().map(|(_, token)| token.clone()).collect()
    }

    fn reply<T: Clone>(&self, name: &'static str, slot: &Mutex<Reply<T>>) -> ClientResult<T> {
        self.calls.lock().unwrap().push((name, self.session.token()));
        slot.lock()
            .unwrap()
            .clone()
            .map_err(|(status, detail)| ClientError::Api { status, detail })
    }
}

#[async_trait]
impl Backend for StubBackend {
    async fn signup(&self, _request: &SignupRequest) -> ClientResult<SignupResponse> {
        self.reply("signup", &self.signup)
    }

    async fn login(&self, _credentials: &Credentials) -> ClientResult<TokenResponse> {
        self.reply("login", &self.login)
    }

    async fn current_user(&self) -> ClientResult<UserProfile> {
        self.reply("me", &self.me)
    }

    async fn add_mood(&self, _entry: &NewMoodEntry) -> ClientResult<MoodCreated> {
        self.reply("add_mood", &self.add_mood)
    }

    async fn mood_history(&self) -> ClientResult<Vec<MoodEntry>> {
        self.reply("mood_history", &self.mood_history)
    }

    async fn mood_trend(&self) -> ClientResult<Vec<TrendPoint>> {
        self.reply("mood_trend", &self.trend)
    }

    async fn mood_summary(&self) -> ClientResult<MoodSummary> {
        self.reply("mood_summary", &self.summary)
    }

    async fn chat_words(&self) -> ClientResult<Vec<ChatWord>> {
        self.reply("chat_words", &self.words)
    }

    async fn chat_history(&self) -> ClientResult<Vec<ChatExchange>> {
        self.reply("chat_history", &self.chat_history)
    }

    async fn send_chat(&self, _request: &ChatRequest) -> ClientResult<ChatExchange> {
        self.reply("chat", &self.chat)
    }
}

/// Stub plus a context wired to it, optionally already logged in
pub(crate) fn stub_context(token: Option<&str>) -> (Arc<StubBackend>, ViewContext) {
    let session = Session::in_memory();
    if let Some(token) = token {
        session.set(token).unwrap();
    }
    let stub = Arc::new(StubBackend::new(session.clone()));
    let context = ViewContext::new(stub.clone(), session);
    (stub, context)
}

pub(crate) fn mood_entry(id: i64, text: &str, score: i64) -> MoodEntry {
    MoodEntry {
        id,
        mood_text: text.to_string(),
        mood_score: score,
        timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    }
}
