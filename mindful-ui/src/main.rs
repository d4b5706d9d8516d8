//! Mindful Web
//!
//! Browser front end for the mental-health chatbot, built with Leptos (WASM).
//!
//! # Features
//!
//! - Login and signup against the companion service
//! - Mood journal with history
//! - Mood trend and summary charts
//! - Chat with the support bot
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The session token lives in `localStorage` and is shared with
//! every page through a context object.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
