//! GLiDe Dashboard
//!
//! Gamified learning dashboard frontend built with Leptos (WASM).
//!
//! # Features
//!
//! - Team gamification page: leaderboard, player and team profiles, badges
//! - Achieved / missing badge dialogs
//! - Session identifiers and API address kept in `localStorage`
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Requests and view state come from the `glide-dashboard`
//! crate; this crate only executes the requests and renders the state.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
