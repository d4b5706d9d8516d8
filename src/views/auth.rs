//! Login, signup and logout

use super::{Route, ViewContext};
use crate::api::{Credentials, SignupRequest};
use crate::session::SessionError;

pub const LOGIN_FAILED: &str = "Login failed";
pub const SIGNUP_FAILED: &str = "Signup failed. Try again.";
pub const SIGNUP_OK: &str = "Signup successful! Redirecting to login...";

/// What the auth form should do after a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Navigate, optionally showing a confirmation first
    Redirect { to: Route, notice: Option<String> },
    /// Stay on the form and show `message`
    Failed { message: String },
}

/// Controller behind the login and signup forms
pub struct AuthView {
    context: ViewContext,
}

impl AuthView {
    pub fn new(context: ViewContext) -> Self {
        Self { context }
    }

    /// Submit credentials; on success the token is stored and the user is
    /// sent to the dashboard
    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        match self.context.backend.login(credentials).await {
            Ok(response) => {
                if let Err(e) = self.context.session.set(&response.access_token) {
                    tracing::error!(error = %e, "Could not persist session token");
                    return AuthOutcome::Failed { message: e.to_string() };
                }
                if !self.context.session.is_authenticated() {
                    return AuthOutcome::Failed { message: LOGIN_FAILED.to_string() };
                }

                tracing::info!(email = %credentials.email, "Logged in");
                AuthOutcome::Redirect { to: Route::Dashboard, notice: None }
            }
            Err(e) => {
                tracing::info!(email = %credentials.email, error = %e, "Login rejected");
                AuthOutcome::Failed { message: e.display_message(LOGIN_FAILED) }
            }
        }
    }

    /// Create an account. The server usually answers without a token, in
    /// which case the user is sent to the login form.
    pub async fn signup(&self, request: &SignupRequest) -> AuthOutcome {
        match self.context.backend.signup(request).await {
            Ok(response) => {
                tracing::info!(
                    email = %request.email,
                    user_id = ?response.user_id,
                    "Account created"
                );

                if let Some(token) = response.access_token.as_deref() {
                    if let Err(e) = self.context.session.set(token) {
                        tracing::error!(error = %e, "Could not persist session token");
                        return AuthOutcome::Failed { message: e.to_string() };
                    }
                }

                let logged_in = response.access_token.is_some();
                let to = if logged_in && self.context.session.is_authenticated() {
                    Route::Dashboard
                } else {
                    Route::Login
                };

                AuthOutcome::Redirect {
                    to,
                    notice: Some(response.message.unwrap_or_else(|| SIGNUP_OK.to_string())),
                }
            }
            Err(e) => {
                tracing::info!(email = %request.email, error = %e, "Signup rejected");
                AuthOutcome::Failed { message: e.display_message(SIGNUP_FAILED) }
            }
        }
    }

    /// Forget the token and return to the login form
    pub fn logout(&self) -> Result<Route, SessionError> {
        self.context.session.clear()?;
        Ok(Route::Login)
    }
}
