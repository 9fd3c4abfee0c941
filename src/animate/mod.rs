//! The stroke-then-fill reveal: a cursor that turns a normalized scene into per-frame plans.

/// Animation cursor and its per-frame advance.
pub mod cursor;
/// Frame plans and drawing commands.
pub mod plan;
