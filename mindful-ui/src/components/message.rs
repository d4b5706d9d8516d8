//! Chat Message Component

use leptos::*;

use crate::api::display_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One transcript line
#[derive(Debug, Clone, PartialEq)]
pub struct ChatLine {
    pub sender: Sender,
    pub text: String,
    pub timestamp: Option<String>,
}

/// Speech bubble for a single line, right-aligned for the user
#[component]
pub fn MessageBubble(line: ChatLine) -> impl IntoView {
    let (align, bubble, who) = match line.sender {
        Sender::User => ("text-right", "bg-blue-100 text-blue-800", "You:"),
        Sender::Bot => ("text-left", "bg-green-100 text-green-800", "Bot:"),
    };
    let when = line.timestamp.as_deref().map(display_time);

    view! {
        <div class=format!("{} mb-2", align)>
            <span class=format!("inline-block {} px-4 py-2 rounded-lg max-w-[80%]", bubble)>
                <strong class="mr-1">{who}</strong>
                {line.text}
            </span>
            {when.map(|t| view! { <div class="text-xs text-gray-400 mt-1">{t}</div> })}
        </div>
    }
}
