//! Team Gamification Controller
//!
//! Drives [`TeamGamificationView`] on tokio: one task per fetch, each
//! folding its response into the shared view when it completes. The
//! controller owns the task handles, so deactivating (or dropping) it
//! aborts whatever is still in flight and a torn-down view is never
//! written to.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::dialog::AchievementDialog;
use super::view::{fetch_plan, Fetch, TeamGamificationView};
use crate::api::{AchievementCategory, ClientResult, GamificationApi};
use crate::session::{SessionStore, TeamSession};

/// Fetch-and-render cycle for the team gamification page
pub struct TeamGamificationController {
    api: Arc<dyn GamificationApi>,
    view: Arc<RwLock<TeamGamificationView>>,
    tasks: Vec<JoinHandle<()>>,
}

impl TeamGamificationController {
    pub fn new(api: Arc<dyn GamificationApi>) -> Self {
        Self {
            api,
            view: Arc::new(RwLock::new(TeamGamificationView::default())),
            tasks: Vec::new(),
        }
    }

    /// Start a fetch cycle from the identifiers in `store`
    ///
    /// Any previous cycle is aborted and the view starts empty. Returns the
    /// number of fetches issued: zero when either player name is missing.
    /// Must be called from within a tokio runtime.
    pub fn activate<S: SessionStore + ?Sized>(&mut self, store: &S) -> usize {
        self.deactivate();
        self.view = Arc::new(RwLock::new(TeamGamificationView::default()));

        let Some(session) = TeamSession::read(store) else {
            tracing::info!("No player selected in session, team view stays empty");
            return 0;
        };

        tracing::info!(
            individual = %session.individual_player,
            team = %session.team_player,
            "Activating team gamification view"
        );

        let plan = fetch_plan(&session);
        for fetch in &plan {
            self.spawn_fetch(*fetch, &session);
        }
        plan.len()
    }

    fn spawn_fetch(&mut self, fetch: Fetch, session: &TeamSession) {
        match fetch {
            Fetch::Leaderboards => {
                let Some(scope) = session.scope.clone() else {
                    return;
                };
                self.spawn(
                    fetch,
                    move |api| async move {
                        api.leaderboards(&scope.subject_acronym, scope.course, &scope.period)
                            .await
                    },
                    TeamGamificationView::apply_leaderboards,
                );
            }
            Fetch::IndividualPlayer => {
                let player = session.individual_player.clone();
                self.spawn(
                    fetch,
                    move |api| async move { api.individual_player(&player).await },
                    TeamGamificationView::apply_individual_player,
                );
            }
            Fetch::TeamPlayer => {
                let player = session.team_player.clone();
                self.spawn(
                    fetch,
                    move |api| async move { api.team_player(&player).await },
                    TeamGamificationView::apply_team_player,
                );
            }
            Fetch::AttainedBadges => {
                let player = session.team_player.clone();
                self.spawn(
                    fetch,
                    move |api| async move {
                        api.player_achievements(&player, true, AchievementCategory::Badges)
                            .await
                    },
                    TeamGamificationView::apply_attained_badges,
                );
            }
            Fetch::MissingBadges => {
                let player = session.team_player.clone();
                self.spawn(
                    fetch,
                    move |api| async move {
                        api.player_achievements(&player, false, AchievementCategory::Badges)
                            .await
                    },
                    TeamGamificationView::apply_missing_badges,
                );
            }
        }
    }

    fn spawn<T, F, Fut>(&mut self, fetch: Fetch, request: F, apply: fn(&mut TeamGamificationView, T))
    where
        T: Send + 'static,
        F: FnOnce(Arc<dyn GamificationApi>) -> Fut,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let view = Arc::clone(&self.view);
        let response = request(Arc::clone(&self.api));

        let handle = tokio::spawn(async move {
            match response.await {
                Ok(value) => {
                    apply(&mut *view.write().await, value);
                    tracing::debug!(%fetch, "Fetch applied to view");
                }
                Err(e) => {
                    tracing::warn!(%fetch, error = %e, "Fetch failed");
                    view.write().await.record_failure(fetch, &e);
                }
            }
        });

        self.tasks.push(handle);
    }

    /// Wait until every fetch of the current cycle has completed
    pub async fn wait(&mut self) {
        for handle in self.tasks.drain(..) {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    tracing::error!("Fetch task panicked: {}", e);
                }
            }
        }
    }

    /// Abort in-flight fetches; the view keeps what already arrived
    pub fn deactivate(&mut self) {
        let mut aborted = 0;
        for handle in self.tasks.drain(..) {
            if !handle.is_finished() {
                aborted += 1;
            }
            handle.abort();
        }
        if aborted > 0 {
            tracing::debug!(aborted, "Aborted in-flight fetches");
        }
    }

    /// Whether any fetch is still running
    pub fn is_loading(&self) -> bool {
        self.tasks.iter().any(|h| !h.is_finished())
    }

    /// Copy of the current view state
    pub async fn snapshot(&self) -> TeamGamificationView {
        self.view.read().await.clone()
    }

    /// Dialog over the attained badges as they are right now
    pub async fn open_achieved_dialog(&self) -> AchievementDialog {
        self.view.read().await.open_achieved_dialog()
    }

    /// Dialog over the not-attained badges as they are right now
    pub async fn open_missing_dialog(&self) -> AchievementDialog {
        self.view.read().await.open_missing_dialog()
    }
}

impl Drop for TeamGamificationController {
    fn drop(&mut self) {
        self.deactivate();
    }
}
