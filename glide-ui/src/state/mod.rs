//! State Management
//!
//! Global notification state and the browser session store.

pub mod global;
pub mod session;

pub use global::{provide_global_state, GlobalState, Notice};
pub use session::LocalStorageSession;
