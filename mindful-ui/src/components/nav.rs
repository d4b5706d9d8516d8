//! Navigation Component
//!
//! Header navigation bar with brand, page links and the session control.

use leptos::*;
use leptos_router::*;

use crate::state::{use_global_state, use_session};

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let session = use_session();
    let state = use_global_state();

    let navigate = use_navigate();

    view! {
        <nav class="bg-purple-700 border-b border-purple-800">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🌸"</span>
                        <span class="text-xl font-bold text-white">"Mental Health Chatbot"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        <NavLink href="/" label="Home" />
                        {move || {
                            if session.is_authenticated() {
                                let navigate = navigate.clone();
                                let logout = move |_| {
                                    session.clear();
                                    state.show_success("Logged out");
                                    navigate("/login", Default::default());
                                };
                                view! {
                                    <NavLink href="/dashboard" label="Dashboard" />
                                    <NavLink href="/mood" label="Mood" />
                                    <NavLink href="/analytics" label="Analytics" />
                                    <NavLink href="/chat" label="Chat" />
                                    <button
                                        on:click=logout
                                        class="px-4 py-2 rounded-lg text-purple-100 hover:text-white hover:bg-purple-600 transition-colors"
                                    >
                                        "Logout"
                                    </button>
                                }.into_view()
                            } else {
                                view! {
                                    <NavLink href="/signup" label="Signup" />
                                    <NavLink href="/login" label="Login" />
                                }.into_view()
                            }
                        }}
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            exact=true
            class="px-4 py-2 rounded-lg text-purple-100 hover:text-white hover:bg-purple-600 transition-colors"
            active_class="bg-purple-800 text-white"
        >
            {label}
        </A>
    }
}
