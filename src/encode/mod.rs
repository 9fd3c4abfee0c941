//! Frame sinks.
//!
//! Sinks consume rendered frames in order and are fed by `RevealSession::render_all`.

/// `ffmpeg`-based MP4 output via the system `ffmpeg`.
pub mod ffmpeg;
/// PNG output.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
