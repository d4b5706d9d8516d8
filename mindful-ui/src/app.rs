//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Nav, Toast};
use crate::pages::{Analytics, Chat, Dashboard, Home, Login, Mood, Signup};
use crate::state::{provide_global_state, provide_session, use_global_state};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    provide_session();

    view! {
        <Router>
            <div class="min-h-screen bg-purple-50 text-gray-900 flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/login" view=Login />
                        <Route path="/signup" view=Signup />
                        <Route path="/dashboard" view=Dashboard />
                        <Route path="/mood" view=Mood />
                        <Route path="/analytics" view=Analytics />
                        <Route path="/chat" view=Chat />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />

                <Toast />
            </div>
        </Router>
    }
}

/// Footer with the backend address and a loading indicator
#[component]
fn Footer() -> impl IntoView {
    let state = use_global_state();
    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (editing, set_editing) = create_signal(false);

    let save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        api::set_api_base(&api_url.get_untracked());
        set_api_url.set(api::get_api_base());
        set_editing.set(false);
        state.show_success("API URL saved");
    };

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-white border-t border-gray-200 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm text-gray-500">
                {move || {
                    if editing.get() {
                        view! {
                            <form on:submit=save class="flex items-center space-x-2">
                                <input
                                    type="url"
                                    prop:value=move || api_url.get()
                                    on:input=move |ev| set_api_url.set(event_target_value(&ev))
                                    class="border rounded px-2 py-1 w-72"
                                />
                                <button type="submit" class="text-purple-600 hover:underline">"Save"</button>
                            </form>
                        }.into_view()
                    } else {
                        view! {
                            <button on:click=move |_| set_editing.set(true) class="hover:text-purple-600">
                                {move || format!("Backend: {}", api_url.get())}
                            </button>
                        }.into_view()
                    }
                }}

                {move || state.loading.get().then(|| view! {
                    <div class="flex items-center space-x-2 text-purple-600">
                        <div class="loading-spinner w-4 h-4" />
                        <span>"Loading..."</span>
                    </div>
                })}
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-purple-600 hover:bg-purple-700 text-white rounded-lg font-medium transition-colors"
            >
                "Go Home"
            </A>
        </div>
    }
}
