//! Login Page

use leptos::*;
use leptos_router::*;

use crate::api::{self, Credentials};
use crate::components::{ErrorText, InlineLoading};
use crate::state::use_session;

pub const LOGIN_FAILED: &str = "Login failed";

#[component]
pub fn Login() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let credentials = Credentials {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        set_submitting.set(true);
        set_error.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&credentials).await {
                Ok(response) => {
                    session.set(&response.access_token);
                    if session.is_authenticated() {
                        navigate("/dashboard", Default::default());
                    } else {
                        set_error.set(Some(LOGIN_FAILED.to_string()));
                    }
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("Login rejected: {}", e).into());
                    set_error.set(Some(e.display(LOGIN_FAILED)));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto mt-10 bg-white p-8 rounded-xl shadow">
            <h2 class="text-2xl font-bold mb-6 text-purple-700">"Login"</h2>

            <ErrorText message=error />

            <form on:submit=on_submit class="space-y-4">
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
                        "Login".into_view()
                    }}
                </button>
            </form>

            <p class="text-sm text-gray-500 mt-4">
                "No account yet? "
                <A href="/signup" class="text-purple-600 hover:underline">"Sign up"</A>
            </p>
        </div>
    }
}
