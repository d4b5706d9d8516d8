/// Navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Signup,
    Dashboard,
    Mood,
    Analytics,
    Chat,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::Signup,
        Route::Login,
        Route::Dashboard,
        Route::Mood,
        Route::Analytics,
        Route::Chat,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
            Route::Mood => "/mood",
            Route::Analytics => "/analytics",
            Route::Chat => "/chat",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::Signup => "Signup",
            Route::Dashboard => "Dashboard",
            Route::Mood => "Mood",
            Route::Analytics => "Analytics",
            Route::Chat => "Chat",
        }
    }

    /// Whether the screen needs a session token to show anything
    pub fn requires_session(self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Mood | Route::Analytics | Route::Chat
        )
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
