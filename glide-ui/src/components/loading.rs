//! Placeholders shown while a fetch is in flight

use leptos::*;

/// Spinner with an optional caption, e.g. "Loading badges"
#[component]
pub fn Loading(#[prop(optional)] caption: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-8 space-y-2">
            <div class="loading-spinner w-6 h-6" />
            {caption.map(|text| view! { <span class="text-xs text-gray-400">{text}</span> })}
        </div>
    }
}

/// Player card outline: round image slot and two text lines
#[component]
pub fn PlayerSkeleton() -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 flex items-center space-x-4 animate-pulse">
            <div class="w-16 h-16 rounded-full bg-gray-700" />
            <div class="flex-1 space-y-2">
                <div class="h-3 bg-gray-700 rounded w-1/4" />
                <div class="h-5 bg-gray-700 rounded w-1/2" />
            </div>
        </div>
    }
}
