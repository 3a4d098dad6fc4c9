//! Team Gamification Page
//!
//! Leaderboard, player cards and badge dialogs for the signed-in student
//! and their team. Each of the five fetches fills its own part of the view
//! as it resolves; responses arriving after the page unmounts are dropped.

use std::cell::Cell;
use std::fmt::Display;
use std::future::Future;
use std::rc::Rc;

use leptos::*;
use leptos_router::*;

use glide_dashboard::api::ClientResult;
use glide_dashboard::gamification::{fetch_plan, DialogKind, Fetch, TeamGamificationView};
use glide_dashboard::session::TeamSession;

use crate::api;
use crate::components::{AchievementDialogView, LeaderboardCard, PlayerCardView};
use crate::state::{GlobalState, LocalStorageSession};

/// Team gamification page component
#[component]
pub fn TeamGamification() -> impl IntoView {
    let session = TeamSession::read(&LocalStorageSession::new());

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Team Gamification"</h1>
                <p class="text-gray-400 mt-1">"Your team's leaderboard and badges"</p>
            </div>

            {match session {
                Some(session) => view! { <TeamView session=session /> }.into_view(),
                None => view! { <NoSession /> }.into_view(),
            }}
        </div>
    }
}

/// Shown when the session lacks a player name; nothing is fetched
#[component]
fn NoSession() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6 text-center">
            <p class="text-gray-400 mb-4">"No player is selected for this session."</p>
            <A
                href="/settings"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Open Settings"
            </A>
        </section>
    }
}

/// Spawn one fetch; its result is applied only while the page is mounted
fn spawn_fetch<T, Fut>(
    fetch: Fetch,
    future: Fut,
    alive: Rc<Cell<bool>>,
    gamification: RwSignal<TeamGamificationView>,
    apply: fn(&mut TeamGamificationView, T),
) where
    T: 'static,
    Fut: Future<Output = ClientResult<T>> + 'static,
{
    let state = use_context::<GlobalState>();
    spawn_local(async move {
        let result = future.await;
        if !alive.get() {
            return;
        }
        match result {
            Ok(value) => {
                gamification.try_update(|view| apply(view, value));
            }
            Err(e) => {
                report_failure(fetch, &e, state);
                gamification.try_update(|view| view.record_failure(fetch, &e));
            }
        }
    });
}

fn report_failure(fetch: Fetch, error: &dyn Display, state: Option<GlobalState>) {
    let message = error.to_string();
    web_sys::console::error_1(&format!("Failed to fetch {}: {}", fetch, message).into());
    if let Some(state) = state {
        state.show_fetch_failure(fetch, message);
    }
}

/// Issue one fetch of the plan for `session`
fn start_fetch(
    fetch: Fetch,
    session: &TeamSession,
    alive: Rc<Cell<bool>>,
    gamification: RwSignal<TeamGamificationView>,
) {
    let individual = session.individual_player.clone();
    let team = session.team_player.clone();
    match fetch {
        Fetch::Leaderboards => {
            if let Some(scope) = session.scope.clone() {
                spawn_fetch(
                    fetch,
                    async move { api::fetch_leaderboards(&scope).await },
                    alive,
                    gamification,
                    TeamGamificationView::apply_leaderboards,
                );
            }
        }
        Fetch::IndividualPlayer => spawn_fetch(
            fetch,
            async move { api::fetch_individual_player(&individual).await },
            alive,
            gamification,
            TeamGamificationView::apply_individual_player,
        ),
        Fetch::TeamPlayer => spawn_fetch(
            fetch,
            async move { api::fetch_team_player(&team).await },
            alive,
            gamification,
            TeamGamificationView::apply_team_player,
        ),
        Fetch::AttainedBadges => spawn_fetch(
            fetch,
            async move { api::fetch_badges(&team, true).await },
            alive,
            gamification,
            TeamGamificationView::apply_attained_badges,
        ),
        Fetch::MissingBadges => spawn_fetch(
            fetch,
            async move { api::fetch_badges(&team, false).await },
            alive,
            gamification,
            TeamGamificationView::apply_missing_badges,
        ),
    }
}

/// Page body once both player names are known
#[component]
fn TeamView(session: TeamSession) -> impl IntoView {
    let gamification = create_rw_signal(TeamGamificationView::default());
    let dialog = create_rw_signal(None::<DialogKind>);

    let alive = Rc::new(Cell::new(true));
    {
        let alive = alive.clone();
        on_cleanup(move || alive.set(false));
    }

    for fetch in fetch_plan(&session) {
        start_fetch(fetch, &session, alive.clone(), gamification);
    }

    // Retries come from the notice area
    if let Some(state) = use_context::<GlobalState>() {
        state.retry.set_untracked(None);
        let alive = alive.clone();
        create_effect(move |_| {
            if let Some(fetch) = state.retry.get() {
                state.retry.set_untracked(None);
                start_fetch(fetch, &session, alive.clone(), gamification);
            }
        });
    }

    let leaderboards = Signal::derive(move || gamification.with(|v| v.leaderboards.clone()));
    let active = Signal::derive(move || gamification.with(|v| v.leaderboard.clone()));
    let individual = Signal::derive(move || gamification.with(|v| v.individual_player.clone()));
    let team = Signal::derive(move || gamification.with(|v| v.team_player.clone()));
    let attained_count = move || {
        gamification.with(|v| v.attained_badges.as_ref().map(|b| b.len().to_string()))
            .unwrap_or_else(|| "…".to_string())
    };
    let missing_count = move || {
        gamification.with(|v| v.missing_badges.as_ref().map(|b| b.len().to_string()))
            .unwrap_or_else(|| "…".to_string())
    };

    view! {
        <div class="grid md:grid-cols-2 gap-4">
            <PlayerCardView label="Student" player=individual />
            <PlayerCardView label="Team" player=team />
        </div>

        <LeaderboardCard leaderboards=leaderboards active=active />

        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Team Badges"</h2>
            <div class="flex space-x-4">
                <button
                    on:click=move |_| dialog.set(Some(DialogKind::Achieved))
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    {move || format!("Achieved ({})", attained_count())}
                </button>
                <button
                    on:click=move |_| dialog.set(Some(DialogKind::Missing))
                    class="px-4 py-3 bg-gray-600 hover:bg-gray-500 rounded-lg font-medium transition-colors"
                >
                    {move || format!("Missing ({})", missing_count())}
                </button>
            </div>
        </section>

        <AchievementDialogView open=dialog gamification=gamification />
    }
}
