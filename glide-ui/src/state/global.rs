//! Global Application State
//!
//! Shared across pages: the current notice, retry requests raised from
//! notices, and the team player the session points at. Page data is owned
//! by the page that fetched it.

use leptos::*;

use glide_dashboard::gamification::Fetch;
use glide_dashboard::session::{keys, SessionStore};

use super::session::LocalStorageSession;

const SAVED_NOTICE_MS: u32 = 3000;
const ERROR_NOTICE_MS: u32 = 6000;

/// Message shown in the notice area
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Saved(String),
    Error(String),
    /// A dashboard fetch failed; stays until dismissed or retried
    FetchFailed { fetch: Fetch, message: String },
}

impl Notice {
    /// Auto-dismiss delay; `None` keeps the notice up
    pub fn lifetime_ms(&self) -> Option<u32> {
        match self {
            Notice::Saved(_) => Some(SAVED_NOTICE_MS),
            Notice::Error(_) => Some(ERROR_NOTICE_MS),
            Notice::FetchFailed { .. } => None,
        }
    }
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    pub notice: RwSignal<Option<Notice>>,
    /// Fetch the user asked to run again; the team page takes it
    pub retry: RwSignal<Option<Fetch>>,
    /// Team player stored in the session, for the header
    pub team_player: RwSignal<Option<String>>,
    generation: StoredValue<u64>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let team_player = LocalStorageSession::new().get(keys::TEAM_PLAYER);

    provide_context(GlobalState {
        notice: create_rw_signal(None),
        retry: create_rw_signal(None),
        team_player: create_rw_signal(team_player),
        generation: store_value(0),
    });
}

impl GlobalState {
    /// Replace the current notice
    ///
    /// A timed notice only clears itself if no newer notice replaced it.
    pub fn notify(&self, notice: Notice) {
        let generation = self.generation.get_value() + 1;
        self.generation.set_value(generation);

        let lifetime = notice.lifetime_ms();
        self.notice.set(Some(notice));

        if let Some(ms) = lifetime {
            let state = *self;
            gloo_timers::callback::Timeout::new(ms, move || {
                if state.generation.try_get_value() == Some(generation) {
                    state.notice.try_set(None);
                }
            })
            .forget();
        }
    }

    pub fn show_saved(&self, message: &str) {
        self.notify(Notice::Saved(message.to_string()));
    }

    pub fn show_error(&self, message: &str) {
        self.notify(Notice::Error(message.to_string()));
    }

    pub fn show_fetch_failure(&self, fetch: Fetch, message: String) {
        self.notify(Notice::FetchFailed { fetch, message });
    }

    pub fn dismiss(&self) {
        self.notice.set(None);
    }

    /// Dismiss a fetch failure and ask for the fetch again
    pub fn request_retry(&self, fetch: Fetch) {
        self.dismiss();
        self.retry.set(Some(fetch));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failures_stay_until_dismissed() {
        let failure = Notice::FetchFailed {
            fetch: Fetch::TeamPlayer,
            message: "API error 500".to_string(),
        };
        assert_eq!(failure.lifetime_ms(), None);
        assert_eq!(Notice::Saved("ok".to_string()).lifetime_ms(), Some(SAVED_NOTICE_MS));
        assert!(Notice::Error("x".to_string()).lifetime_ms() > Notice::Saved("x".to_string()).lifetime_ms());
    }
}
