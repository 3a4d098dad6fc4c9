//! API access for the browser

mod client;

pub use client::*;
