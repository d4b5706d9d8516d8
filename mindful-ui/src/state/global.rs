//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

pub fn use_global_state() -> GlobalState {
    expect_context::<GlobalState>()
}

impl GlobalState {
    /// Toast a confirmation for three seconds
    pub fn show_success(&self, message: &str) {
        flash(self.success, message, 3000);
    }

    /// Toast an error for five seconds
    pub fn show_error(&self, message: &str) {
        flash(self.error, message, 5000);
    }
}

fn flash(slot: RwSignal<Option<String>>, message: &str, millis: u32) {
    slot.set(Some(message.to_string()));
    gloo_timers::callback::Timeout::new(millis, move || slot.set(None)).forget();
}
