//! Dashboard Page
//!
//! Landing page for a logged-in user. Any failure to load the profile is
//! treated as an expired session.

use leptos::*;
use leptos_router::*;

use crate::api::{self, UserProfile};
use crate::components::Loading;
use crate::state::use_session;

#[component]
pub fn Dashboard() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let (user, set_user) = create_signal(None::<UserProfile>);

    create_effect(move |_| {
        let Some(token) = session.token() else {
            navigate("/login", Default::default());
            return;
        };

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::fetch_profile(&token).await {
                Ok(profile) => set_user.set(Some(profile)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Profile fetch failed: {}", e).into());
                    session.clear();
                    navigate("/login", Default::default());
                }
            }
        });
    });

    view! {
        <div class="max-w-3xl mx-auto space-y-8">
            {move || match user.get() {
                None => view! { <Loading /> }.into_view(),
                Some(user) => view! {
                    <div>
                        <h1 class="text-3xl font-bold text-purple-700">{format!("Welcome, {}!", user.name)}</h1>
                        <p class="text-gray-500 mt-1">{user.email}</p>
                    </div>
                }.into_view(),
            }}

            <div class="grid md:grid-cols-3 gap-4">
                <Shortcut href="/mood" icon="🌸" title="Track your mood" text="Write a few words and score your day." />
                <Shortcut href="/analytics" icon="📈" title="See your trends" text="Daily averages and the overall balance." />
                <Shortcut href="/chat" icon="💬" title="Talk it through" text="Chat with the support bot." />
            </div>
        </div>
    }
}

#[component]
fn Shortcut(
    href: &'static str,
    icon: &'static str,
    title: &'static str,
    text: &'static str,
) -> impl IntoView {
    view! {
        <A href=href class="block bg-white rounded-xl shadow p-6 hover:shadow-md transition-shadow">
            <div class="text-3xl mb-2">{icon}</div>
            <h2 class="font-semibold text-lg">{title}</h2>
            <p class="text-gray-500 text-sm mt-1">{text}</p>
        </A>
    }
}
