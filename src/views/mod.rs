//! Views
//!
//! Screen-level controllers. Each view owns the state one screen renders
//! and maps exactly one backend call per user action onto it.
//!
//! - [`AuthView`]: login, signup and logout
//! - [`DashboardView`]: guarded landing page for a logged-in user
//! - [`MoodView`]: mood entry form and history list
//! - [`AnalyticsView`]: precomputed trend and summary series
//! - [`ChatView`]: transcript with the bot
//!
//! Failures never escape a view: they become the message the screen shows.

pub mod analytics;
pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod mood;
mod route;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use crate::api::{Backend, ClientError};
use crate::session::Session;

pub use analytics::AnalyticsView;
pub use auth::{AuthOutcome, AuthView};
pub use chat::{ChatMessage, ChatView, SendOutcome, Sender, Transcript};
pub use dashboard::{DashboardState, DashboardView};
pub use mood::{MoodView, SubmitOutcome};
pub use route::Route;

/// Shared context handed to every view
///
/// Carries the backend and the session token, the only state views share.
#[derive(Clone)]
pub struct ViewContext {
    pub backend: Arc<dyn Backend>,
    pub session: Session,
}

impl ViewContext {
    pub fn new(backend: Arc<dyn Backend>, session: Session) -> Self {
        Self { backend, session }
    }

    /// Drop the token when the server rejected it
    pub(crate) fn forget_rejected_token(&self, error: &ClientError) {
        if !error.is_auth_failure() {
            return;
        }
        tracing::info!(status = ?error.status(), "Token rejected, clearing session");
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "Could not clear session token");
        }
    }
}
