//! Chat Page
//!
//! Transcript with the support bot. A send appends the user line and the
//! reply locally; nothing is refetched.

use leptos::*;

use crate::api::{self, ChatExchange};
use crate::components::{ChatLine, ErrorText, MessageBubble, Sender};
use crate::state::use_session;

pub const HISTORY_FAILED: &str = "Please login again.";
pub const SEND_FAILED: &str = "Failed to send message. Please try again.";

/// Flatten stored exchanges into alternating user and bot lines
pub fn flatten_history(history: Vec<ChatExchange>) -> Vec<ChatLine> {
    history
        .into_iter()
        .flat_map(|exchange| {
            let ChatExchange { message, response, timestamp } = exchange;
            [
                ChatLine { sender: Sender::User, text: message, timestamp: timestamp.clone() },
                ChatLine { sender: Sender::Bot, text: response, timestamp },
            ]
        })
        .collect()
}

/// Append one sent message and its reply
pub fn append_exchange(
    lines: &mut Vec<ChatLine>,
    sent: String,
    sent_at: String,
    reply: ChatExchange,
) {
    lines.push(ChatLine { sender: Sender::User, text: sent, timestamp: Some(sent_at.clone()) });
    lines.push(ChatLine {
        sender: Sender::Bot,
        text: reply.response,
        timestamp: reply.timestamp.or(Some(sent_at)),
    });
}

#[component]
pub fn Chat() -> impl IntoView {
    let session = use_session();

    let lines = create_rw_signal(Vec::<ChatLine>::new());
    let (message, set_message) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (typing, set_typing) = create_signal(false);
    let chat_box = create_node_ref::<html::Div>();

    // Load history once on mount
    match session.token_untracked() {
        Some(token) => spawn_local(async move {
            match api::fetch_chat_history(&token).await {
                Ok(history) => lines.set(flatten_history(history)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Chat history fetch failed: {}", e).into());
                    session.forget_if_rejected(&e);
                    set_error.set(Some(HISTORY_FAILED.to_string()));
                }
            }
        }),
        None => set_error.set(Some(HISTORY_FAILED.to_string())),
    }

    // Keep the newest line in view
    create_effect(move |_| {
        lines.with(|_| ());
        typing.get();
        request_animation_frame(move || {
            if let Some(container) = chat_box.get_untracked() {
                container.set_scroll_top(container.scroll_height());
            }
        });
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let text = message.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        let Some(token) = session.token_untracked() else {
            set_error.set(Some(HISTORY_FAILED.to_string()));
            return;
        };

        let sent_at = chrono::Utc::now().to_rfc3339();
        set_typing.set(true);

        spawn_local(async move {
            match api::send_chat(&text, &token).await {
                Ok(reply) => {
                    lines.update(|lines| append_exchange(lines, text, sent_at, reply));
                    set_message.set(String::new());
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("Chat send failed: {}", e).into());
                    session.forget_if_rejected(&e);
                    set_error.set(Some(SEND_FAILED.to_string()));
                }
            }
            set_typing.set(false);
        });
    };

    view! {
        <div class="max-w-2xl mx-auto mt-8 p-6 bg-white rounded-xl shadow">
            <h2 class="text-2xl font-bold mb-4 text-purple-700">"Chat with our AI Bot"</h2>

            <div node_ref=chat_box class="h-80 overflow-y-auto border p-3 mb-4 rounded-lg bg-gray-50">
                <For
                    each=move || lines.get().into_iter().enumerate()
                    key=|(idx, _)| *idx
                    children=|(_, line)| view! { <MessageBubble line=line /> }
                />
            </div>

            {move || typing.get().then(|| view! {
                <p class="text-purple-600 mb-2">"Typing..."</p>
            })}

            <ErrorText message=error />

            <form on:submit=on_submit class="flex">
                <input
                    type="text"
                    placeholder="Type your message..."
                    autofocus
                    prop:value=move || message.get()
                    on:input=move |ev| set_message.set(event_target_value(&ev))
                    class="flex-grow border rounded-l-lg px-4 py-2 focus:outline-none focus:border-purple-400"
                />
                <button
                    type="submit"
                    class="bg-purple-600 hover:bg-purple-700 text-white px-4 py-2 rounded-r-lg"
                >
                    "Send"
                </button>
            </form>
        </div>
    }
}
