//! Guarded landing page

use super::{Route, ViewContext};
use crate::api::UserProfile;

pub const PROFILE_FAILED: &str = "Could not load your profile. Please log in again.";

/// What the dashboard shows after loading
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Welcome(UserProfile),
    Redirect(Route),
}

impl DashboardState {
    pub fn greeting(&self) -> Option<String> {
        match self {
            DashboardState::Welcome(user) => Some(format!("Welcome, {}!", user.name)),
            DashboardState::Redirect(_) => None,
        }
    }

    /// Confirmation for a fresh login. A redirect means the profile check
    /// already dropped the token, so the login did not stick.
    pub fn login_report(&self) -> Result<String, &'static str> {
        self.greeting().ok_or(PROFILE_FAILED)
    }
}

pub struct DashboardView {
    context: ViewContext,
}

impl DashboardView {
    pub fn new(context: ViewContext) -> Self {
        Self { context }
    }

    /// Fetch the profile. Any failure counts as "not logged in": the stale
    /// token is dropped and the user is sent to the login form.
    pub async fn load(&self) -> DashboardState {
        if !self.context.session.is_authenticated() {
            return DashboardState::Redirect(Route::Login);
        }

        match self.context.backend.current_user().await {
            Ok(user) => DashboardState::Welcome(user),
            Err(e) => {
                tracing::info!(error = %e, "Profile fetch failed, treating session as expired");
                if let Err(e) = self.context.session.clear() {
                    tracing::warn!(error = %e, "Could not clear session token");
                }
                DashboardState::Redirect(Route::Login)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Credentials, TokenResponse};
    use crate::views::testing::{stub_context, StubBackend};
    use crate::views::{AuthOutcome, AuthView};

    fn profile() -> UserProfile {
        UserProfile { id: 1, name: "Sam".into(), email: "sam@example.com".into() }
    }

    #[tokio::test]
    async fn test_welcome_with_valid_token() {
        let (stub, context) = stub_context(Some("T"));
        StubBackend::set(&stub.me, Ok(profile()));

        let state = DashboardView::new(context).load().await;

        assert_eq!(state.greeting().as_deref(), Some("Welcome, Sam!"));
        assert_eq!(stub.tokens_seen(), vec![Some("T".to_string())]);
    }

    #[tokio::test]
    async fn test_redirect_without_token_skips_fetch() {
        let (stub, context) = stub_context(None);

        let state = DashboardView::new(context).load().await;

        assert_eq!(state, DashboardState::Redirect(Route::Login));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_token_is_cleared() {
        let (stub, context) = stub_context(Some("expired"));
        StubBackend::set(&stub.me, Err((401, Some("Could not validate credentials".into()))));

        let state = DashboardView::new(context.clone()).load().await;

        assert_eq!(state, DashboardState::Redirect(Route::Login));
        assert!(!context.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_report_after_profile_failure() {
        let (stub, context) = stub_context(None);
        StubBackend::set(
            &stub.login,
            Ok(TokenResponse { access_token: "T".into(), token_type: None }),
        );
        StubBackend::set(&stub.me, Err((500, None)));

        let outcome = AuthView::new(context.clone())
            .login(&Credentials::new("a@b.c", "pw"))
            .await;
        assert!(matches!(outcome, AuthOutcome::Redirect { to: Route::Dashboard, .. }));

        let report = DashboardView::new(context.clone()).load().await.login_report();

        assert_eq!(report, Err(PROFILE_FAILED));
        assert!(!context.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_report_greets() {
        let (stub, context) = stub_context(Some("T"));
        StubBackend::set(&stub.me, Ok(profile()));

        let report = DashboardView::new(context).load().await.login_report();
        assert_eq!(report.as_deref(), Ok("Welcome, Sam!"));
    }

    #[tokio::test]
    async fn test_logout_then_dashboard_redirects() {
        let (stub, context) = stub_context(Some("T"));
        StubBackend::set(&stub.me, Ok(profile()));

        AuthView::new(context.clone()).logout().unwrap();
        let state = DashboardView::new(context).load().await;

        assert_eq!(state, DashboardState::Redirect(Route::Login));
        assert!(stub.calls().is_empty());
    }
}
