//! Polyreveal draws polygon regions loaded from JSON with an animated stroke-then-fill reveal.
//!
//! The pipeline is one-way:
//!
//! - Load a [`RegionSet`] (array or object JSON) and [`normalize`] it into a [`NormalizedScene`]
//! - Drive an [`AnimationCursor`] one frame at a time to get [`FramePlan`]s
//! - Rasterize plans with a [`RenderBackend`] and stream them into a [`FrameSink`]
//!
//! [`RevealSession`] bundles the above into the host loop, including the on-canvas error
//! display used when loading fails.
#![forbid(unsafe_code)]

mod foundation;

/// Stroke-then-fill animation.
pub mod animate;
/// Frame sinks.
pub mod encode;
/// Rendering backend(s).
pub mod render;
/// Region loading and normalization.
pub mod scene;
/// Session-oriented host API.
pub mod session;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, Point, Rect, Rgb8, Size, Vec2,
};
pub use crate::foundation::error::{RevealError, RevealResult};

pub use crate::animate::cursor::{AnimationCursor, CursorState};
pub use crate::animate::plan::{DrawOp, FramePlan, FrameStyle};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::LoadedFont;
pub use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::scene::normalize::{
    NormalizedScene, TARGET_HEIGHT, TARGET_WIDTH, TransformedRegion, normalize, normalize_to,
};
pub use crate::scene::region::{RegionDef, RegionSet, SourceLayout};
pub use crate::session::reveal_session::{
    FrameControl, FrameStep, RenderStats, RevealSession, SessionOpts,
};
