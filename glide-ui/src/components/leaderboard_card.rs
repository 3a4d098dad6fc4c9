//! Leaderboard Card Component
//!
//! The active team leaderboard and its results.

use leptos::*;

use glide_dashboard::api::{ClientError, Leaderboard};

use super::loading::Loading;
use crate::api;

fn results_failure(id: i64, error: &ClientError) -> String {
    format!("Failed to fetch results of leaderboard {}: {}", id, error)
}

/// Active team leaderboard; results load once the board id is known
#[component]
pub fn LeaderboardCard(
    #[prop(into)]
    leaderboards: Signal<Option<Vec<Leaderboard>>>,
    #[prop(into)]
    active: Signal<Option<Leaderboard>>,
) -> impl IntoView {
    let results = create_local_resource(
        move || active.get().map(|board| board.id),
        |id| async move {
            let id = id?;
            match api::fetch_leaderboard_results(id).await {
                Ok(results) => Some(results),
                Err(e) => {
                    web_sys::console::error_1(&results_failure(id, &e).into());
                    None
                }
            }
        },
    );

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Team Leaderboard"</h2>
            {move || match (leaderboards.get(), active.get()) {
                (None, _) => view! { <Loading /> }.into_view(),
                (Some(_), None) => view! {
                    <p class="text-gray-400 text-sm">"No team leaderboard is visible yet"</p>
                }.into_view(),
                (Some(boards), Some(board)) => {
                    let name = board.name.clone().unwrap_or_else(|| format!("Leaderboard {}", board.id));
                    view! {
                        <div class="space-y-3">
                            <div class="flex items-center justify-between">
                                <span class="font-medium">{name}</span>
                                <span class="text-sm text-gray-400">
                                    {format!("{} visible", boards.len())}
                                </span>
                            </div>
                            <Suspense fallback=move || view! { <Loading /> }>
                                {move || results.get().map(|result| match result {
                                    Some(value) => view! {
                                        <pre class="text-xs bg-gray-900 rounded p-3 overflow-x-auto">
                                            {serde_json::to_string_pretty(&value).unwrap_or_default()}
                                        </pre>
                                    }.into_view(),
                                    None => view! {
                                        <p class="text-gray-400 text-sm">"Results unavailable"</p>
                                    }.into_view(),
                                })}
                            </Suspense>
                        </div>
                    }.into_view()
                }
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_failure_names_board_and_cause() {
        let error = ClientError::Status {
            status: 503,
            message: "engine down".to_string(),
        };
        let message = results_failure(12, &error);
        assert!(message.contains("leaderboard 12"));
        assert!(message.contains("503"));
        assert!(message.contains("engine down"));
    }
}
