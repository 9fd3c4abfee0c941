//! Session-oriented host API: frame callbacks and the render loop.

/// The reveal session.
pub mod reveal_session;
