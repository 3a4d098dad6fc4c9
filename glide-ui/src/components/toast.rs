//! Notice Component
//!
//! Bottom-right notice for saves, errors and failed dashboard fetches.
//! Fetch failures offer a retry.

use leptos::*;

use glide_dashboard::gamification::Fetch;

use crate::state::global::{GlobalState, Notice};

/// Notice area; renders the current notice if any
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="fixed bottom-6 right-4 z-50">
            {move || state.notice.get().map(|notice| match notice {
                Notice::Saved(text) => view! {
                    <NoticeBox icon="✓" tone="bg-green-600" text=text />
                }.into_view(),
                Notice::Error(text) => view! {
                    <NoticeBox icon="✕" tone="bg-red-600" text=text />
                }.into_view(),
                Notice::FetchFailed { fetch, message } => view! {
                    <FetchFailureBox fetch=fetch message=message />
                }.into_view(),
            })}
        </div>
    }
}

#[component]
fn NoticeBox(icon: &'static str, tone: &'static str, text: String) -> impl IntoView {
    view! {
        <div class=format!("flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg", tone)>
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{text}</span>
        </div>
    }
}

/// Failed fetch with retry and dismiss actions
#[component]
fn FetchFailureBox(fetch: Fetch, message: String) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="bg-red-700 text-white px-4 py-3 rounded-lg shadow-lg max-w-sm">
            <p class="text-sm font-semibold">{format!("Could not load {}", fetch)}</p>
            <p class="text-xs text-red-100 mt-1 break-words">{message}</p>
            <div class="flex justify-end space-x-2 mt-3">
                <button
                    on:click=move |_| state.dismiss()
                    class="px-3 py-1 text-xs rounded bg-red-800 hover:bg-red-900"
                >
                    "Dismiss"
                </button>
                <button
                    on:click=move |_| state.request_retry(fetch)
                    class="px-3 py-1 text-xs rounded bg-white text-red-700 font-medium hover:bg-red-50"
                >
                    "Retry"
                </button>
            </div>
        </div>
    }
}
