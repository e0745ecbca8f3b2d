//! Session-stored state.

pub mod session;
