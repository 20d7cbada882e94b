//! Clear Button Component
//!
//! Removes every employee after the browser confirm dialog is accepted.
//! Declining, or a browser that cannot show the dialog, leaves the roster
//! untouched.

use leptos::*;

use crate::api;
use crate::state::global::GlobalState;

const CLEAR_PROMPT: &str = "Are you sure you want to clear all employee data?";

fn confirmed() -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(CLEAR_PROMPT).ok())
        .unwrap_or(false)
}

#[component]
pub fn ClearButton() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (clearing, set_clearing) = create_signal(false);

    let on_click = move |_| {
        if !confirmed() {
            return;
        }

        set_clearing.set(true);
        let state_clone = state.clone();
        spawn_local(async move {
            match api::clear_employees().await {
                Ok(()) => state_clone.refresh(),
                Err(e) => state_clone.show_error(&e),
            }
            set_clearing.set(false);
        });
    };

    view! {
        <button
            type="button"
            on:click=on_click
            disabled=move || clearing.get()
            class="px-4 py-2 bg-red-700 hover:bg-red-600 disabled:bg-gray-600
                   rounded-lg text-sm font-medium transition-colors"
        >
            {move || if clearing.get() { "Clearing..." } else { "Clear All Data" }}
        </button>
    }
}
