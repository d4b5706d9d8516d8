//! Home Page

use leptos::*;
use leptos_router::*;

use crate::state::use_session;

#[component]
pub fn Home() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="flex flex-col items-center justify-center min-h-[50vh] text-center space-y-6">
            <div class="text-6xl">"🏠"</div>
            <h1 class="text-3xl font-bold text-purple-700">"Welcome to your safe space"</h1>
            <p class="text-gray-600 max-w-xl">
                "Track how you feel, see how your mood changes over time, and talk things through with a supportive bot."
            </p>
            {move || {
                if session.is_authenticated() {
                    view! {
                        <A href="/dashboard" class="px-6 py-3 bg-purple-600 hover:bg-purple-700 text-white rounded-lg font-medium">
                            "Go to Dashboard"
                        </A>
                    }.into_view()
                } else {
                    view! {
                        <div class="space-x-4">
                            <A href="/signup" class="px-6 py-3 bg-purple-600 hover:bg-purple-700 text-white rounded-lg font-medium">
                                "Get started"
                            </A>
                            <A href="/login" class="px-6 py-3 bg-gray-200 hover:bg-gray-300 rounded-lg font-medium">
                                "Login"
                            </A>
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}
