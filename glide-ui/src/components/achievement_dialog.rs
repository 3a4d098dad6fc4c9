//! Achievement Dialog Component
//!
//! Modal listing achieved or missing badges.

use leptos::*;

use glide_dashboard::gamification::{DialogContents, DialogKind, TeamGamificationView};

use super::badge_list::BadgeList;
use super::loading::Loading;

/// Modal for the open dialog kind, if any; closing clears the signal
///
/// Contents are rebuilt from the view, so a dialog opened while its badges
/// are loading fills in when they arrive.
#[component]
pub fn AchievementDialogView(
    open: RwSignal<Option<DialogKind>>,
    #[prop(into)]
    gamification: Signal<TeamGamificationView>,
) -> impl IntoView {
    view! {
        {move || open.get().map(|kind| {
            let dialog = gamification.with(|v| match kind {
                DialogKind::Achieved => v.open_achieved_dialog(),
                DialogKind::Missing => v.open_missing_dialog(),
            });
            let title = dialog.title();
            let body = match dialog.contents {
                DialogContents::Pending => view! { <Loading caption="Loading badges" /> }.into_view(),
                DialogContents::Ready(badges) => view! { <BadgeList badges=badges /> }.into_view(),
            };
            view! {
                <div class="fixed inset-0 z-40 bg-black/60 flex items-center justify-center">
                    <div class="bg-gray-800 rounded-xl p-6 w-full max-w-2xl max-h-[80vh] overflow-y-auto">
                        <div class="flex items-center justify-between mb-4">
                            <h2 class="text-xl font-semibold">{title}</h2>
                            <button
                                on:click=move |_| open.set(None)
                                class="px-3 py-1 rounded-lg bg-gray-700 hover:bg-gray-600 transition-colors"
                            >
                                "✕"
                            </button>
                        </div>
                        {body}
                    </div>
                </div>
            }
        })}
    }
}
