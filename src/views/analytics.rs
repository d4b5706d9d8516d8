//! Mood analytics
//!
//! Both series are computed by the server; this view only holds them.

use super::ViewContext;
use crate::api::{ChatWord, MoodSummary, TrendPoint};

pub const NO_TREND: &str = "No mood data available yet.";
pub const NO_SUMMARY: &str = "No mood summary available yet.";
pub const ANALYTICS_FAILED: &str = "Could not load analytics";

/// Y axis bounds for the trend chart
pub const SCORE_AXIS: (f64, f64) = (0.0, 10.0);

pub struct AnalyticsView {
    context: ViewContext,
    trend: Vec<TrendPoint>,
    summary: Option<MoodSummary>,
    top_words: Vec<ChatWord>,
    error: Option<String>,
}

impl AnalyticsView {
    pub fn new(context: ViewContext) -> Self {
        Self {
            context,
            trend: Vec::new(),
            summary: None,
            top_words: Vec::new(),
            error: None,
        }
    }

    /// Daily averages, oldest first
    pub fn trend(&self) -> &[TrendPoint] {
        &self.trend
    }

    pub fn summary(&self) -> Option<&MoodSummary> {
        self.summary.as_ref()
    }

    pub fn top_words(&self) -> &[ChatWord] {
        &self.top_words
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch both series, plus the optional word list. Does nothing while
    /// logged out.
    pub async fn refresh(&mut self) {
        if !self.context.session.is_authenticated() {
            return;
        }

        let backend = &self.context.backend;
        match tokio::try_join!(backend.mood_trend(), backend.mood_summary()) {
            Ok((trend, summary)) => {
                self.trend = trend;
                self.summary = Some(summary);
                self.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching analytics");
                self.context.forget_rejected_token(&e);
                self.error = Some(ANALYTICS_FAILED.to_string());
            }
        }

        if !self.context.session.is_authenticated() {
            return;
        }
        match backend.chat_words().await {
            Ok(words) => self.top_words = words,
            Err(e) => tracing::debug!(error = %e, "Chat word frequencies unavailable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{stub_context, StubBackend};

    fn trend() -> Vec<TrendPoint> {
        vec![
            TrendPoint { date: "2024-05-01".into(), average_score: 6.5 },
            TrendPoint { date: "2024-05-02".into(), average_score: 7.0 },
        ]
    }

    #[tokio::test]
    async fn test_refresh_loads_both_series() {
        let (stub, context) = stub_context(Some("T"));
        StubBackend::set(&stub.trend, Ok(trend()));
        StubBackend::set(&stub.summary, Ok(MoodSummary { positive: 3, negative: 1, neutral: 2 }));
        StubBackend::set(&stub.words, Ok(vec![ChatWord { word: "sleep".into(), count: 4 }]));

        let mut view = AnalyticsView::new(context);
        view.refresh().await;

        assert_eq!(view.trend().len(), 2);
        assert_eq!(view.summary().map(|s| s.total()), Some(6));
        assert_eq!(view.top_words()[0].word, "sleep");
        assert_eq!(view.error(), None);
    }

    #[tokio::test]
    async fn test_nothing_fetched_without_token() {
        let (stub, context) = stub_context(None);

        let mut view = AnalyticsView::new(context);
        view.refresh().await;

        assert!(stub.calls().is_empty());
        assert!(view.summary().is_none());
    }

    #[tokio::test]
    async fn test_word_list_failure_keeps_charts() {
        let (stub, context) = stub_context(Some("T"));
        StubBackend::set(&stub.trend, Ok(trend()));
        StubBackend::set(&stub.summary, Ok(MoodSummary::default()));

        let mut view = AnalyticsView::new(context);
        view.refresh().await;

        assert_eq!(view.trend().len(), 2);
        assert!(view.top_words().is_empty());
        assert_eq!(view.error(), None);
    }

    #[tokio::test]
    async fn test_series_failure() {
        let (stub, context) = stub_context(Some("T"));
        StubBackend::set(&stub.trend, Ok(trend()));
        StubBackend::set(&stub.summary, Err((401, None)));

        let mut view = AnalyticsView::new(context.clone());
        view.refresh().await;

        assert_eq!(view.error(), Some(ANALYTICS_FAILED));
        assert!(view.trend().is_empty());
        assert!(!context.session.is_authenticated());
        assert_eq!(stub.calls(), vec!["mood_trend", "mood_summary"]);
    }
}
