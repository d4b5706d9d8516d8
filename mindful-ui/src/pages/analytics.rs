//! Analytics Page
//!
//! Renders the server-computed mood trend and summary.

use leptos::*;

use crate::api::{self, ChatWord, MoodSummary, TrendPoint};
use crate::components::{SummaryPie, TrendChart};
use crate::state::{use_global_state, use_session};

pub const NO_TREND: &str = "No mood data available yet.";
pub const NO_SUMMARY: &str = "No mood summary available yet.";
pub const ANALYTICS_FAILED: &str = "Could not load analytics";

#[component]
pub fn Analytics() -> impl IntoView {
    let session = use_session();
    let state = use_global_state();

    let trend = create_rw_signal(Vec::<TrendPoint>::new());
    let summary = create_rw_signal(None::<MoodSummary>);
    let words = create_rw_signal(Vec::<ChatWord>::new());

    // Refetch both series whenever the token becomes available
    create_effect(move |_| {
        let Some(token) = session.token() else {
            return;
        };

        spawn_local(async move {
            state.loading.set(true);

            let series = async {
                let points = api::fetch_mood_trend(&token).await?;
                let counts = api::fetch_mood_summary(&token).await?;
                Ok::<_, api::ApiError>((points, counts))
            };
            match series.await {
                Ok((points, counts)) => {
                    trend.set(points);
                    summary.set(Some(counts));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Error fetching analytics: {}", e).into());
                    state.show_error(ANALYTICS_FAILED);
                    if session.forget_if_rejected(&e) {
                        state.loading.set(false);
                        return;
                    }
                }
            }

            match api::fetch_chat_words(&token).await {
                Ok(top) => words.set(top),
                Err(e) => {
                    let note = format!("Chat word frequencies unavailable: {}", e);
                    web_sys::console::log_1(&note.into());
                }
            }

            state.loading.set(false);
        });
    });

    view! {
        <div class="max-w-4xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold text-center text-purple-700">"Mood Analytics 📈"</h1>

            <section class="bg-white p-6 rounded-xl shadow">
                <h2 class="text-xl font-semibold mb-4">"Mood Trend Over Time"</h2>
                {move || {
                    if trend.with(Vec::is_empty) {
                        view! { <p class="text-gray-500">{NO_TREND}</p> }.into_view()
                    } else {
                        view! { <TrendChart points=trend /> }.into_view()
                    }
                }}
            </section>

            <section class="bg-white p-6 rounded-xl shadow">
                <h2 class="text-xl font-semibold mb-4">"Mood Summary"</h2>
                {move || match summary.get() {
                    Some(counts) => view! { <SummaryPie summary=counts /> }.into_view(),
                    None => view! { <p class="text-gray-500">{NO_SUMMARY}</p> }.into_view(),
                }}
            </section>

            {move || (!words.with(Vec::is_empty)).then(|| view! {
                <section class="bg-white p-6 rounded-xl shadow">
                    <h2 class="text-xl font-semibold mb-4">"What you talk about"</h2>
                    <div class="flex flex-wrap gap-2">
                        {words.get().into_iter().map(|w| view! {
                            <span class="px-3 py-1 rounded-full bg-purple-100 text-purple-800 text-sm">
                                {format!("{} · {}", w.word, w.count)}
                            </span>
                        }).collect_view()}
                    </div>
                </section>
            })}
        </div>
    }
}
