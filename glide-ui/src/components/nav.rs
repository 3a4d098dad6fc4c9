//! Header
//!
//! Brand, page links and the team the session is set to.

use leptos::*;
use leptos_router::*;

use crate::state::GlobalState;

#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4 flex items-center justify-between h-16">
                <A href="/" class="text-xl font-bold text-white">"GLiDe"</A>

                <div class="flex items-center space-x-4">
                    {move || match state.team_player.get() {
                        Some(team) => view! {
                            <span class="text-sm text-gray-300">
                                "Team " <span class="font-semibold text-white">{team}</span>
                            </span>
                        }.into_view(),
                        None => view! {
                            <A href="/settings" class="text-sm text-yellow-400 hover:underline">
                                "No team selected"
                            </A>
                        }.into_view(),
                    }}
                    <A
                        href="/"
                        exact=true
                        class="px-3 py-2 rounded-lg text-gray-300 hover:bg-gray-700"
                        active_class="bg-gray-700 text-white"
                    >
                        "Team"
                    </A>
                    <A
                        href="/settings"
                        class="px-3 py-2 rounded-lg text-gray-300 hover:bg-gray-700"
                        active_class="bg-gray-700 text-white"
                    >
                        "Settings"
                    </A>
                </div>
            </div>
        </nav>
    }
}
