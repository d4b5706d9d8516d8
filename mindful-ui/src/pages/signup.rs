//! Signup Page

use leptos::*;
use leptos_router::*;

use crate::api::{self, SignupRequest};
use crate::components::{ErrorText, InlineLoading};
use crate::state::{use_global_state, use_session};

pub const SIGNUP_FAILED: &str = "Signup failed. Try again.";
pub const SIGNUP_OK: &str = "Signup successful! Redirecting to login...";

#[component]
pub fn Signup() -> impl IntoView {
    let session = use_session();
    let state = use_global_state();
    let navigate = use_navigate();

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let request = SignupRequest {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        set_submitting.set(true);
        set_error.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::signup(&request).await {
                Ok(response) => {
                    state.show_success(response.message.as_deref().unwrap_or(SIGNUP_OK));

                    // Some deployments log the new user straight in
                    if let Some(token) = response.access_token.as_deref() {
                        session.set(token);
                    }
                    let target = if response.access_token.is_some() && session.is_authenticated() {
                        "/dashboard"
                    } else {
                        "/login"
                    };
                    navigate(target, Default::default());
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("Signup rejected: {}", e).into());
                    set_error.set(Some(e.display(SIGNUP_FAILED)));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto mt-10 bg-white p-8 rounded-xl shadow">
            <h2 class="text-2xl font-bold mb-6 text-purple-700">"Create an account"</h2>

            <ErrorText message=error />

            <form on:submit=on_submit class="space-y-4">
                <input
                    type="text"
                    placeholder="Name"
                    required
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    class="w-full border rounded-lg px-4 py-2 focus:outline-none focus:border-purple-400"
                />
                <input
                    type="email"
                    placeholder="Email"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    class="w-full border rounded-lg px-4 py-2 focus:outline-none focus:border-purple-400"
                />
                <input
                    type="password"
                    placeholder="Password"
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    class="w-full border rounded-lg px-4 py-2 focus:outline-none focus:border-purple-400"
                />
                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-purple-600 hover:bg-purple-700 disabled:bg-gray-400 text-white
                           rounded-lg py-2 font-semibold transition-colors"
                >
                    {move || if submitting.get() {
                        view! { <InlineLoading /> }.into_view()
                    } else {
                        "Signup".into_view()
                    }}
                </button>
            </form>

            <p class="text-sm text-gray-500 mt-4">
                "Already registered? "
                <A href="/login" class="text-purple-600 hover:underline">"Log in"</A>
            </p>
        </div>
    }
}
