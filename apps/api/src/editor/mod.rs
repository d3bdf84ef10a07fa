//! The editor session and the reducer that applies form edits to it.

pub mod actions;
pub mod handlers;
pub mod session;
