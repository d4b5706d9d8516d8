//! # Mindful
//!
//! Client for a mental-health companion service: account access, mood
//! journaling, mood analytics and a conversation with a support bot.
//!
//! The server does all of the persistence and analysis. This crate holds the
//! session token, calls the REST endpoints and turns each response into the
//! state a screen renders.
//!
//! ## Modules
//!
//! - [`api`]: typed HTTP client for the backend
//! - [`session`]: bearer token holder and its persistent store
//! - [`views`]: per-screen controllers (auth, dashboard, mood, analytics, chat)
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mindful::api::{ApiClient, Credentials};
//! use mindful::config::Config;
//! use mindful::session::{FileTokenStore, Session};
//! use mindful::views::{AuthView, DashboardView, ViewContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!
//!     let store = FileTokenStore::new(&config.session.token_file);
//!     let session = Session::new(Arc::new(store))?;
//!     let client = ApiClient::new(&config.api, session.clone())?;
//!     let context = ViewContext::new(Arc::new(client), session);
//!
//!     AuthView::new(context.clone())
//!         .login(&Credentials::new("sam@example.com", "hunter2"))
//!         .await;
//!
//!     if let Some(greeting) = DashboardView::new(context).load().await.greeting() {
//!         println!("{}", greeting);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
pub mod views;

// Re-export top-level types for convenience
pub use api::{ApiClient, Backend, ClientError, ClientResult};

pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionError, TokenStore};

pub use views::{
    AnalyticsView, AuthOutcome, AuthView, ChatView, DashboardState, DashboardView, MoodView,
    Route, SendOutcome, SubmitOutcome, ViewContext,
};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, SessionConfig};
