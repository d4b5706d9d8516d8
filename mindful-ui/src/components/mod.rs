//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod chart;
pub mod loading;
pub mod message;
pub mod nav;
pub mod toast;

pub use chart::{SummaryPie, TrendChart};
pub use loading::{InlineLoading, ListSkeleton, Loading};
pub use message::{ChatLine, MessageBubble, Sender};
pub use nav::Nav;
pub use toast::{ErrorText, Toast};
