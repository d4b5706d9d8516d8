//! Mood entry form and history

use std::ops::RangeInclusive;

use super::ViewContext;
use crate::api::{MoodEntry, NewMoodEntry};

pub const SCORE_RANGE: RangeInclusive<i64> = 1..=10;

pub const SCORE_OUT_OF_RANGE: &str = "Score must be between 1 and 10";
pub const HISTORY_FAILED: &str = "Could not fetch mood history";
pub const SUBMIT_FAILED: &str = "Failed to add mood";
pub const SUBMITTED: &str = "Mood submitted!";

/// Result of a mood submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Rejected { message: String },
}

/// State of the mood screen
pub struct MoodView {
    context: ViewContext,
    entries: Vec<MoodEntry>,
    error: Option<String>,
}

impl MoodView {
    pub fn new(context: ViewContext) -> Self {
        Self {
            context,
            entries: Vec::new(),
            error: None,
        }
    }

    /// Entries in server order (newest first)
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the list with the server's history. Does nothing while
    /// logged out.
    pub async fn refresh(&mut self) {
        if !self.context.session.is_authenticated() {
            return;
        }

        match self.context.backend.mood_history().await {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "Mood history loaded");
                self.entries = entries;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Mood history fetch failed");
                self.context.forget_rejected_token(&e);
                self.error = Some(HISTORY_FAILED.to_string());
            }
        }
    }

    /// Submit an entry, then refetch the whole history
    pub async fn submit(&mut self, text: &str, score: i64) -> SubmitOutcome {
        if !SCORE_RANGE.contains(&score) {
            self.error = Some(SCORE_OUT_OF_RANGE.to_string());
            return SubmitOutcome::Rejected { message: SCORE_OUT_OF_RANGE.to_string() };
        }

        let entry = NewMoodEntry {
            mood_text: text.to_string(),
            mood_score: score,
        };

        match self.context.backend.add_mood(&entry).await {
            Ok(created) => {
                tracing::info!(mood_id = ?created.mood_id, score, "Mood submitted");
                self.refresh().await;
                SubmitOutcome::Submitted
            }
            Err(e) => {
                tracing::warn!(error = %e, "Mood submit failed");
                self.context.forget_rejected_token(&e);
                let message = e.display_message(SUBMIT_FAILED);
                self.error = Some(message.clone());
                SubmitOutcome::Rejected { message }
            }
        }
    }
}

/// Parse a score typed into a form field
pub fn parse_score(raw: &str) -> Option<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|score| SCORE_RANGE.contains(score))
}
