//! Badge List Component

use leptos::*;

use glide_dashboard::gamification::Badge;

/// Grid of badges with icon, name and date
#[component]
pub fn BadgeList(badges: Vec<Badge>) -> impl IntoView {
    if badges.is_empty() {
        return view! {
            <p class="text-gray-400 text-sm">"No badges"</p>
        }.into_view();
    }

    view! {
        <div class="grid grid-cols-2 md:grid-cols-3 gap-4">
            {badges.into_iter().map(|badge| {
                let icon = badge.icon.map(|img| img.as_str().to_string());
                view! {
                    <div class="bg-gray-700 rounded-lg p-3 flex flex-col items-center text-center">
                        {match icon {
                            Some(src) => view! {
                                <img src=src alt=badge.name.clone() class="w-12 h-12 mb-2" />
                            }.into_view(),
                            None => view! { <span class="text-3xl mb-2">"🏅"</span> }.into_view(),
                        }}
                        <span class="text-sm font-medium">{badge.name}</span>
                        <span class="text-xs text-gray-400">{badge.date}</span>
                    </div>
                }
            }).collect_view()}
        </div>
    }.into_view()
}
