use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use mindful::api::{ApiClient, Backend, ChatRequest, ClientError, Credentials, SignupRequest};
use mindful::config::ApiConfig;
use mindful::session::{FileTokenStore, Session};
use mindful::views::dashboard::PROFILE_FAILED;
use mindful::views::{
    AnalyticsView, AuthOutcome, AuthView, ChatView, DashboardState, DashboardView, MoodView,
    Route, SendOutcome, Sender, SubmitOutcome, ViewContext,
};

const TOKEN: &str = "stub-token";

#[derive(Clone, Default)]
struct Stub {
    auth_headers: Arc<Mutex<Vec<Option<String>>>>,
    moods: Arc<Mutex<Vec<Value>>>,
    chats: Arc<Mutex<Vec<Value>>>,
    profile_down: Arc<AtomicBool>,
}

impl Stub {
    fn record(&self, headers: &HeaderMap) -> bool {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let ok = auth.as_deref() == Some(format!("Bearer {}", TOKEN).as_str());
        self.auth_headers.lock().unwrap().push(auth);
        ok
    }

    fn headers_seen(&self) -> Vec<Option<String>> {
        self.auth_headers.lock().unwrap().clone()
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Could not validate credentials" })),
    )
        .into_response()
}

async fn signup(Json(body): Json<Value>) -> Response {
    if body["name"].as_str().unwrap_or_default().is_empty() {
        let detail = json!([
            { "loc": ["body", "name"], "msg": "field required", "type": "value_error.missing" },
            { "loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error.email" }
        ]);
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": detail })))
            .into_response();
    }
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Email already registered" })),
        )
            .into_response();
    }
    Json(json!({ "message": "User created successfully", "user_id": 1 })).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == "sam@example.com" && body["password"] == "hunter2" {
        Json(json!({ "access_token": TOKEN, "token_type": "bearer" })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "bad" }))).into_response()
    }
}

async fn me(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    if !stub.record(&headers) {
        return unauthorized();
    }
    if stub.profile_down.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "Internal Server Error" })),
        )
            .into_response();
    }
    Json(json!({ "id": 1, "name": "Sam", "email": "sam@example.com" })).into_response()
}

async fn add_mood(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !stub.record(&headers) {
        return unauthorized();
    }
    let mut moods = stub.moods.lock().unwrap();
    let id = moods.len() as i64 + 1;
    moods.insert(
        0,
        json!({
            "id": id,
            "mood_text": body["mood_text"],
            "mood_score": body["mood_score"],
            "timestamp": format!("2024-05-0{}T09:30:00.123456", id),
        }),
    );
    Json(json!({ "message": "Mood added", "mood_id": id })).into_response()
}

async fn mood_history(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    if !stub.record(&headers) {
        return unauthorized();
    }
    Json(Value::Array(stub.moods.lock().unwrap().clone())).into_response()
}

async fn mood_trend(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    if !stub.record(&headers) {
        return unauthorized();
    }
    Json(json!([
        { "date": "2024-05-01", "average_score": 4.5 },
        { "date": "2024-05-02", "average_score": 7.0 }
    ]))
    .into_response()
}

async fn mood_summary(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    if !stub.record(&headers) {
        return unauthorized();
    }
    Json(json!({ "positive": 2, "negative": 1, "neutral": 1 })).into_response()
}

async fn chat_history(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    if !stub.record(&headers) {
        return unauthorized();
    }
    Json(Value::Array(stub.chats.lock().unwrap().clone())).into_response()
}

async fn chat(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !stub.record(&headers) {
        return unauthorized();
    }
    let exchange = json!({
        "id": stub.chats.lock().unwrap().len() + 1,
        "message": body["message"],
        "response": "hello",
        "timestamp": "2024-05-02 18:00:00",
    });
    stub.chats.lock().unwrap().push(exchange.clone());
    Json(exchange).into_response()
}

/// Serve the stub on an ephemeral port and return its base URL
async fn spawn_stub() -> (Stub, String) {
    let stub = Stub::default();
    let router = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/mood", post(add_mood))
        .route("/mood/history", get(mood_history))
        .route("/analytics/mood-trend", get(mood_trend))
        .route("/analytics/mood-summary", get(mood_summary))
        .route("/chat/history", get(chat_history))
        .route("/chat", post(chat))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (stub, format!("http://{}", addr))
}

fn context_for(base_url: &str, session: Session) -> ViewContext {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
    };
    let client = ApiClient::new(&config, session.clone()).unwrap();
    ViewContext::new(Arc::new(client), session)
}

async fn logged_in() -> (Stub, ViewContext) {
    let (stub, url) = spawn_stub().await;
    let context = context_for(&url, Session::in_memory());
    let outcome = AuthView::new(context.clone())
        .login(&Credentials::new("sam@example.com", "hunter2"))
        .await;
    assert!(matches!(outcome, AuthOutcome::Redirect { to: Route::Dashboard, .. }));
    (stub, context)
}

#[tokio::test]
async fn test_login_then_dashboard_sends_bearer() {
    let (stub, context) = logged_in().await;

    let state = DashboardView::new(context.clone()).load().await;

    assert_eq!(state.greeting().as_deref(), Some("Welcome, Sam!"));
    assert_eq!(context.session.token().as_deref(), Some(TOKEN));
    assert_eq!(stub.headers_seen(), vec![Some(format!("Bearer {}", TOKEN))]);
}

#[tokio::test]
async fn test_login_rejected_shows_detail() {
    let (_stub, url) = spawn_stub().await;
    let context = context_for(&url, Session::in_memory());

    let outcome = AuthView::new(context.clone())
        .login(&Credentials::new("sam@example.com", "wrong"))
        .await;

    assert_eq!(outcome, AuthOutcome::Failed { message: "bad".into() });
    assert!(!context.session.is_authenticated());
}

#[tokio::test]
async fn test_signup_errors_surface_server_text() {
    let (_stub, url) = spawn_stub().await;
    let context = context_for(&url, Session::in_memory());
    let view = AuthView::new(context);

    let duplicate = view
        .signup(&SignupRequest {
            name: "Sam".into(),
            email: "taken@example.com".into(),
            password: "hunter2".into(),
        })
        .await;
    assert_eq!(duplicate, AuthOutcome::Failed { message: "Email already registered".into() });

    let invalid = view
        .signup(&SignupRequest {
            name: String::new(),
            email: "nope".into(),
            password: "hunter2".into(),
        })
        .await;
    assert_eq!(
        invalid,
        AuthOutcome::Failed {
            message: "field required, value is not a valid email address".into()
        }
    );
}

#[tokio::test]
async fn test_signup_redirects_to_login_with_notice() {
    let (_stub, url) = spawn_stub().await;
    let context = context_for(&url, Session::in_memory());

    let outcome = AuthView::new(context)
        .signup(&SignupRequest {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            password: "hunter2".into(),
        })
        .await;

    assert_eq!(
        outcome,
        AuthOutcome::Redirect {
            to: Route::Login,
            notice: Some("User created successfully".into()),
        }
    );
}

#[tokio::test]
async fn test_stale_token_redirects_and_is_forgotten() {
    let (stub, url) = spawn_stub().await;
    let session = Session::in_memory();
    session.set("expired").unwrap();
    let context = context_for(&url, session);

    let state = DashboardView::new(context.clone()).load().await;

    assert_eq!(state, DashboardState::Redirect(Route::Login));
    assert!(!context.session.is_authenticated());
    assert_eq!(stub.headers_seen(), vec![Some("Bearer expired".to_string())]);
}

#[tokio::test]
async fn test_login_not_confirmed_when_profile_fails() {
    let (stub, url) = spawn_stub().await;
    stub.profile_down.store(true, Ordering::SeqCst);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token");
    let session = Session::new(Arc::new(FileTokenStore::new(&path))).unwrap();
    let context = context_for(&url, session);

    let outcome = AuthView::new(context.clone())
        .login(&Credentials::new("sam@example.com", "hunter2"))
        .await;
    assert!(matches!(outcome, AuthOutcome::Redirect { to: Route::Dashboard, .. }));
    assert!(path.exists());

    let report = DashboardView::new(context.clone()).load().await.login_report();

    assert_eq!(report, Err(PROFILE_FAILED));
    assert!(!context.session.is_authenticated());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_client_reports_status_and_detail() {
    let (_stub, url) = spawn_stub().await;
    let context = context_for(&url, Session::in_memory());

    let err = context.backend.current_user().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.server_message(), Some("Could not validate credentials"));
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let context = context_for(&url, Session::in_memory());
    let err = context
        .backend
        .login(&Credentials::new("sam@example.com", "hunter2"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Unavailable(_)), "got {:?}", err);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_mood_roundtrip_through_server() {
    let (_stub, context) = logged_in().await;
    let mut view = MoodView::new(context);

    view.refresh().await;
    assert!(view.entries().is_empty());
    assert_eq!(view.error(), None);

    assert_eq!(view.submit("tired", 4).await, SubmitOutcome::Submitted);
    assert_eq!(view.submit("better", 8).await, SubmitOutcome::Submitted);

    let texts: Vec<&str> = view.entries().iter().map(|e| e.mood_text.as_str()).collect();
    assert_eq!(texts, vec!["better", "tired"]);
    assert_eq!(view.entries()[1].timestamp.to_rfc3339(), "2024-05-01T09:30:00.123456+00:00");
}

#[tokio::test]
async fn test_analytics_without_word_endpoint() {
    let (_stub, context) = logged_in().await;
    let mut view = AnalyticsView::new(context);

    view.refresh().await;

    assert_eq!(view.error(), None);
    assert_eq!(view.trend().len(), 2);
    assert_eq!(view.summary().map(|s| s.total()), Some(4));
    assert!(view.top_words().is_empty());
}

#[tokio::test]
async fn test_chat_send_and_reload() {
    let (_stub, context) = logged_in().await;

    let mut view = ChatView::new(context.clone());
    view.load_history().await;
    assert!(view.transcript().is_empty());

    assert_eq!(view.send("hi").await, SendOutcome::Sent);
    let lines = view.transcript().lines();
    assert_eq!((lines[0].sender, lines[0].text.as_str()), (Sender::User, "hi"));
    assert_eq!((lines[1].sender, lines[1].text.as_str()), (Sender::Bot, "hello"));

    let mut reloaded = ChatView::new(context);
    reloaded.load_history().await;
    let texts = |v: &ChatView| -> Vec<(Sender, String)> {
        v.transcript().lines().iter().map(|l| (l.sender, l.text.clone())).collect()
    };
    assert_eq!(texts(&reloaded), texts(&view));
}

#[tokio::test]
async fn test_raw_chat_reply_parses_naive_timestamp() {
    let (_stub, context) = logged_in().await;

    let reply = context
        .backend
        .send_chat(&ChatRequest { message: "hi".into() })
        .await
        .unwrap();

    assert_eq!(reply.response, "hello");
    assert_eq!(
        reply.timestamp.map(|t| t.to_rfc3339()).as_deref(),
        Some("2024-05-02T18:00:00+00:00")
    );
}

#[tokio::test]
async fn test_token_file_survives_restart() {
    let (_stub, url) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token");

    let session = Session::new(Arc::new(FileTokenStore::new(&path))).unwrap();
    AuthView::new(context_for(&url, session))
        .login(&Credentials::new("sam@example.com", "hunter2"))
        .await;

    let restored = Session::new(Arc::new(FileTokenStore::new(&path))).unwrap();
    let state = DashboardView::new(context_for(&url, restored.clone())).load().await;

    assert!(matches!(state, DashboardState::Welcome(_)));
    AuthView::new(context_for(&url, restored)).logout().unwrap();
    assert!(!path.exists() || std::fs::read_to_string(&path).unwrap().trim().is_empty());
}
