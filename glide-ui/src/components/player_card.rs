//! Player Card Component
//!
//! Name and avatar (or logo) of an individual or team player.

use leptos::*;

use glide_dashboard::gamification::PlayerCard;

use super::loading::PlayerSkeleton;

/// Card for one player; a skeleton until the player arrives
#[component]
pub fn PlayerCardView(
    /// "Student" or "Team"
    label: &'static str,
    #[prop(into)]
    player: Signal<Option<PlayerCard>>,
) -> impl IntoView {
    view! {
        {move || match player.get() {
            None => view! { <PlayerSkeleton /> }.into_view(),
            Some(card) => {
                let image = card.image.map(|img| img.as_str().to_string());
                view! {
                    <div class="bg-gray-800 rounded-lg p-4 flex items-center space-x-4">
                        {match image {
                            Some(src) => view! {
                                <img src=src alt=card.name.clone() class="w-16 h-16 rounded-full object-cover" />
                            }.into_view(),
                            None => view! {
                                <div class="w-16 h-16 rounded-full bg-gray-700 flex items-center justify-center text-2xl">
                                    "👤"
                                </div>
                            }.into_view(),
                        }}
                        <div>
                            <p class="text-sm text-gray-400">{label}</p>
                            <p class="text-lg font-semibold">{card.name}</p>
                        </div>
                    </div>
                }.into_view()
            }
        }}
    }
}
