//! Pages
//!
//! Top-level page components for each route.

pub mod analytics;
pub mod chat;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod mood;
pub mod signup;

pub use analytics::Analytics;
pub use chat::Chat;
pub use dashboard::Dashboard;
pub use home::Home;
pub use login::Login;
pub use mood::Mood;
pub use signup::Signup;
