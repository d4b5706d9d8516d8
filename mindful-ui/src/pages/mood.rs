//! Mood Page
//!
//! Entry form plus the full history, refetched after every submit.

use leptos::*;

use crate::api::{self, display_time, MoodEntry, NewMoodEntry};
use crate::components::{ErrorText, ListSkeleton};
use crate::state::{use_global_state, use_session};

pub const SCORE_OUT_OF_RANGE: &str = "Score must be between 1 and 10";
pub const HISTORY_FAILED: &str = "Could not fetch mood history";
pub const SUBMIT_FAILED: &str = "Failed to add mood";
pub const SUBMITTED: &str = "Mood submitted!";

/// Parse the score field; only whole numbers 1..=10 are accepted
pub fn parse_score(raw: &str) -> Option<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|score| (1..=10).contains(score))
}

/// History to show after a failed fetch: whatever was already loaded, or
/// an empty list so the skeleton goes away
pub fn settle_history(current: Option<Vec<MoodEntry>>) -> Vec<MoodEntry> {
    current.unwrap_or_default()
}

#[component]
pub fn Mood() -> impl IntoView {
    let session = use_session();
    let state = use_global_state();

    let (mood_text, set_mood_text) = create_signal(String::new());
    let (mood_score, set_mood_score) = create_signal(String::new());
    let (history, set_history) = create_signal(None::<Vec<MoodEntry>>);
    let (error, set_error) = create_signal(None::<String>);

    let refresh = move || {
        let Some(token) = session.token_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::fetch_mood_history(&token).await {
                Ok(entries) => {
                    set_history.set(Some(entries));
                    set_error.set(None);
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("Mood history fetch failed: {}", e).into());
                    session.forget_if_rejected(&e);
                    set_history.update(|h| *h = Some(settle_history(h.take())));
                    set_error.set(Some(HISTORY_FAILED.to_string()));
                }
            }
        });
    };

    // Fetch whenever a token becomes available
    create_effect(move |_| {
        if session.token().is_some() {
            refresh();
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let Some(score) = parse_score(&mood_score.get_untracked()) else {
            set_error.set(Some(SCORE_OUT_OF_RANGE.to_string()));
            return;
        };
        let Some(token) = session.token_untracked() else {
            return;
        };
        let entry = NewMoodEntry {
            mood_text: mood_text.get_untracked(),
            mood_score: score,
        };

        spawn_local(async move {
            match api::add_mood(&entry, &token).await {
                Ok(_) => {
                    state.show_success(SUBMITTED);
                    set_mood_text.set(String::new());
                    set_mood_score.set(String::new());
                    refresh();
                }
                Err(e) => {
                    session.forget_if_rejected(&e);
                    set_error.set(Some(e.display(SUBMIT_FAILED)));
                }
            }
        });
    };

    view! {
        <div class="max-w-3xl mx-auto">
            <h2 class="text-2xl font-bold mb-4">"Track Your Mood 🌸"</h2>

            <ErrorText message=error />

            {move || (!session.is_authenticated()).then(|| view! {
                <p class="text-gray-500 mb-4">"Log in to record and see your moods."</p>
            })}

            <form on:submit=on_submit class="flex flex-wrap gap-2 mb-6">
                <input
                    type="text"
                    placeholder="How do you feel?"
                    prop:value=move || mood_text.get()
                    on:input=move |ev| set_mood_text.set(event_target_value(&ev))
                    class="flex-1 border rounded-lg px-4 py-2"
                />
                <input
                    type="number"
                    placeholder="Score (1-10)"
                    min="1"
                    max="10"
                    prop:value=move || mood_score.get()
                    on:input=move |ev| set_mood_score.set(event_target_value(&ev))
                    class="w-36 border rounded-lg px-4 py-2"
                />
                <button
                    type="submit"
                    class="bg-purple-600 hover:bg-purple-700 text-white px-4 py-2 rounded-lg"
                >
                    "Submit"
                </button>
            </form>

            <h3 class="text-xl font-semibold">"Mood History 📜"</h3>
            {move || match history.get() {
                None if session.is_authenticated() => view! { <ListSkeleton /> }.into_view(),
                None => ().into_view(),
                Some(entries) => view! {
                    <ul class="mt-4">
                        {entries.into_iter().map(|mood| view! {
                            <li class="border-b py-2">
                                <strong>{mood.mood_text}</strong>
                                {format!(" (Score: {}) on {}", mood.mood_score, display_time(&mood.timestamp))}
                            </li>
                        }).collect_view()}
                    </ul>
                }.into_view(),
            }}
        </div>
    }
}
