//! Settings Page
//!
//! API address and the session identifiers the team page reads.

use leptos::*;

use glide_dashboard::session::{keys, SessionStore};

use crate::api;
use crate::state::{GlobalState, LocalStorageSession};

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Configure your GLiDe dashboard"</p>
            </div>

            <ApiSettings />
            <SessionSettings />
        </div>
    }
}

/// API connection settings
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<bool>);

    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);
        api::set_api_base(&api_url.get());

        spawn_local(async move {
            match api::check_connection().await {
                Ok(()) => {
                    set_test_result.set(Some(true));
                    state.show_saved("Connection successful!");
                }
                Err(e) => {
                    set_test_result.set(Some(false));
                    state.show_error(&format!("Connection failed: {}", e));
                }
            }
            set_testing.set(false);
        });
    };

    let save_url = move |_| {
        api::set_api_base(&api_url.get());
        state.show_saved("API URL saved");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <div class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"GLiDe API URL"</label>
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            prop:value=move || api_url.get()
                            on:input=move |ev| set_api_url.set(event_target_value(&ev))
                            class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                        <button
                            on:click=test_connection
                            disabled=move || testing.get()
                            class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                                   rounded-lg font-medium transition-colors"
                        >
                            {move || if testing.get() { "Testing..." } else { "Test" }}
                        </button>
                        <button
                            on:click=save_url
                            class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                                   rounded-lg font-medium transition-colors"
                        >
                            "Save"
                        </button>
                    </div>
                </div>

                <div class="flex items-center space-x-2">
                    <span class="text-sm text-gray-400">"Status:"</span>
                    {move || {
                        match test_result.get() {
                            Some(true) => view! {
                                <span class="text-green-400">"✓ Connected"</span>
                            }.into_view(),
                            Some(false) => view! {
                                <span class="text-red-400">"✕ Failed"</span>
                            }.into_view(),
                            None => view! {
                                <span class="text-gray-400">"Not tested"</span>
                            }.into_view(),
                        }
                    }}
                </div>
            </div>
        </section>
    }
}

fn key_label(key: &str) -> &'static str {
    match key {
        keys::INDIVIDUAL_PLAYER => "Student player",
        keys::TEAM_PLAYER => "Team player",
        keys::SUBJECT_ACRONYM => "Subject acronym",
        keys::COURSE => "Course",
        keys::PERIOD => "Period",
        _ => "Value",
    }
}

/// Editor for the session keys; blank fields are removed on save
#[component]
fn SessionSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let fields: Vec<(&'static str, RwSignal<String>)> = {
        let session = LocalStorageSession::new();
        keys::ALL
            .iter()
            .map(|key| (*key, create_rw_signal(session.get(key).unwrap_or_default())))
            .collect()
    };
    let fields = store_value(fields);

    let save = move |_| {
        let mut session = LocalStorageSession::new();
        let result = fields.with_value(|fields| {
            fields.iter().try_for_each(|(key, value)| {
                let value = value.get_untracked();
                let value = value.trim();
                if value.is_empty() {
                    session.remove(key)
                } else {
                    session.set(key, value)
                }
            })
        });
        state.team_player.set(session.get(keys::TEAM_PLAYER));
        match result {
            Ok(()) => state.show_saved("Session saved"),
            Err(e) => state.show_error(&format!("Failed to save session: {}", e)),
        }
    };

    let clear = move |_| {
        let mut session = LocalStorageSession::new();
        let result = fields.with_value(|fields| {
            fields.iter().try_for_each(|(key, value)| {
                value.set(String::new());
                session.remove(key)
            })
        });
        state.team_player.set(session.get(keys::TEAM_PLAYER));
        match result {
            Ok(()) => state.show_saved("Session cleared"),
            Err(e) => state.show_error(&format!("Failed to clear session: {}", e)),
        }
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Session"</h2>

            <div class="grid md:grid-cols-2 gap-4">
                {fields.get_value().into_iter().map(|(key, value)| view! {
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">{key_label(key)}</label>
                        <input
                            type="text"
                            placeholder=key
                            prop:value=move || value.get()
                            on:input=move |ev| value.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>
                }).collect_view()}
            </div>

            <div class="flex space-x-2 mt-6">
                <button
                    on:click=save
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "Save"
                </button>
                <button
                    on:click=clear
                    class="px-4 py-3 bg-red-600 hover:bg-red-700 rounded-lg font-medium transition-colors"
                >
                    "Clear"
                </button>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_session_key_has_a_label() {
        for key in keys::ALL {
            assert_ne!(key_label(key), "Value", "{} has no label", key);
        }
    }
}
