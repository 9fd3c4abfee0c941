//! Rasterization of frame plans.

/// Backend trait and frame type.
pub mod backend;
/// `vello_cpu` backend.
pub mod cpu;
pub(crate) mod text;

pub use text::LoadedFont;
