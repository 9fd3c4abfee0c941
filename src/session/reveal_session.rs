use std::path::Path;

use crate::animate::cursor::AnimationCursor;
use crate::animate::plan::{FramePlan, FrameStyle};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{RevealError, RevealResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::scene::normalize::{NormalizedScene, normalize_to};
use crate::scene::region::RegionSet;

/// Options controlling a reveal session.
#[derive(Clone, Debug)]
pub struct SessionOpts {
    /// Canvas, colors and stroke settings.
    pub style: FrameStyle,
    /// Blank border kept on every side of the canvas when scaling the drawing.
    pub margin: f64,
    /// Frame rate reported to sinks.
    pub fps: Fps,
    /// Extra copies of the last frame appended by `render_all`.
    pub hold_frames: u64,
    /// Upper bound on frames produced by `render_all`. `None` runs to completion.
    pub max_frames: Option<u64>,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            style: FrameStyle::default(),
            margin: 100.0,
            fps: Fps::default(),
            hold_frames: 0,
            max_frames: None,
        }
    }
}

/// Whether the host should keep requesting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Output of one host frame callback.
#[derive(Debug)]
pub struct FrameStep<'a> {
    /// What to paint, or `None` when there is nothing left to draw.
    pub plan: Option<FramePlan<'a>>,
    pub control: FrameControl,
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink, including held copies.
    pub frames_total: u64,
    /// Frames actually rasterized.
    pub frames_rendered: u64,
    /// Copies of the last frame appended for the hold.
    pub frames_held: u64,
    /// `true` when the session showed a load error instead of the drawing.
    pub showed_error: bool,
}

enum SceneState {
    Ready(NormalizedScene),
    Failed { error: RevealError, message: String },
}

/// The host side of a reveal: the normalized scene (or the load error that replaced it) plus
/// the animation cursor.
///
/// Loading never fails from the caller's point of view. The first load or normalization error is
/// recorded and every later frame shows it instead of the drawing.
pub struct RevealSession {
    state: SceneState,
    cursor: AnimationCursor,
    opts: SessionOpts,
    frames_emitted: u64,
}

impl RevealSession {
    /// Load `path` and prepare the scene.
    pub fn open(path: &Path, opts: SessionOpts) -> Self {
        Self::from_region_set(RegionSet::from_path(path), opts)
    }

    pub fn from_json_str(s: &str, opts: SessionOpts) -> Self {
        Self::from_region_set(RegionSet::from_json_str(s), opts)
    }

    /// Normalize an already-loaded region set, recording the first error encountered.
    pub fn from_region_set(loaded: RevealResult<RegionSet>, opts: SessionOpts) -> Self {
        let target = opts.style.canvas.inner_size(opts.margin);
        let state = match loaded.and_then(|set| normalize_to(set.regions(), target)) {
            Ok(scene) => {
                tracing::info!(
                    regions = scene.regions().len(),
                    frames = scene.total_frames(),
                    scale = scene.scale(),
                    "scene ready"
                );
                SceneState::Ready(scene)
            }
            Err(error) => {
                tracing::error!(%error, "failed to prepare scene");
                let message = error.screen_message();
                SceneState::Failed { error, message }
            }
        };

        Self {
            state,
            cursor: AnimationCursor::new(),
            opts,
            frames_emitted: 0,
        }
    }

    pub fn scene(&self) -> Option<&NormalizedScene> {
        match &self.state {
            SceneState::Ready(scene) => Some(scene),
            SceneState::Failed { .. } => None,
        }
    }

    /// The recorded load error, if loading or normalization failed.
    pub fn load_error(&self) -> Option<&RevealError> {
        match &self.state {
            SceneState::Ready(_) => None,
            SceneState::Failed { error, .. } => Some(error),
        }
    }

    pub fn cursor(&self) -> &AnimationCursor {
        &self.cursor
    }

    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    /// Frames emitted by [`Self::step`] so far.
    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted
    }

    /// Number of distinct frames a full run produces.
    pub fn expected_frames(&self) -> u64 {
        match &self.state {
            SceneState::Ready(scene) => scene.total_frames(),
            SceneState::Failed { .. } => 1,
        }
    }

    /// One host frame callback.
    ///
    /// A recorded load error takes precedence over the animation on every call: the plan shows
    /// the message and the host is told to stop.
    pub fn step(&mut self) -> FrameStep<'_> {
        let step = match &self.state {
            SceneState::Failed { message, .. } => FrameStep {
                plan: Some(self.opts.style.message_plan(message)),
                control: FrameControl::Stop,
            },
            SceneState::Ready(scene) => {
                let plan = self.cursor.advance(scene, &self.opts.style);
                let control = if self.cursor.is_finished() || plan.is_none() {
                    FrameControl::Stop
                } else {
                    FrameControl::Continue
                };
                FrameStep { plan, control }
            }
        };
        if step.plan.is_some() {
            self.frames_emitted += 1;
        }
        step
    }

    /// Skip `frames` frames of the animation without rendering them.
    pub fn seek(&mut self, frames: u64) -> u64 {
        match &self.state {
            SceneState::Ready(scene) => {
                let skipped = self.cursor.seek(scene, frames);
                self.frames_emitted += skipped;
                skipped
            }
            SceneState::Failed { .. } => 0,
        }
    }

    /// Render frame `frame` of a full run, independent of this session's own cursor.
    ///
    /// Indices past the end render the final picture, which is what stays on screen once the
    /// animation stops.
    #[tracing::instrument(skip(self, backend))]
    pub fn render_frame(
        &self,
        frame: FrameIndex,
        backend: &mut dyn RenderBackend,
    ) -> RevealResult<FrameRGBA> {
        match &self.state {
            SceneState::Failed { message, .. } => {
                backend.render_plan(&self.opts.style.message_plan(message))
            }
            SceneState::Ready(scene) => {
                let target = frame.0.min(scene.total_frames().saturating_sub(1));
                let mut cursor = AnimationCursor::new();
                cursor.seek(scene, target);
                let plan = cursor
                    .advance(scene, &self.opts.style)
                    .ok_or_else(|| RevealError::render("animation ended before requested frame"))?;
                backend.render_plan(&plan)
            }
        }
    }

    /// Host loop: request frames until the session says stop, streaming them into `sink`.
    #[tracing::instrument(skip_all)]
    pub fn render_all(
        &mut self,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
    ) -> RevealResult<RenderStats> {
        let max_frames = self.opts.max_frames;
        let hold_frames = self.opts.hold_frames;
        let canvas = self.opts.style.canvas;

        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.opts.fps,
        })?;

        let mut stats = RenderStats {
            showed_error: self.load_error().is_some(),
            ..RenderStats::default()
        };
        let mut last: Option<FrameRGBA> = None;
        let mut idx = 0u64;

        loop {
            if max_frames.is_some_and(|max| idx >= max) {
                tracing::warn!(frames = idx, "stopping at max_frames");
                break;
            }

            let step = self.step();
            let control = step.control;
            if let Some(plan) = step.plan {
                let frame = backend.render_plan(&plan)?;
                sink.push_frame(FrameIndex(idx), &frame)?;
                stats.frames_rendered += 1;
                idx += 1;
                last = Some(frame);
            }
            if control == FrameControl::Stop {
                break;
            }
        }

        if let Some(frame) = &last {
            for _ in 0..hold_frames {
                sink.push_frame(FrameIndex(idx), frame)?;
                stats.frames_held += 1;
                idx += 1;
            }
        }

        sink.end()?;
        stats.frames_total = idx;
        tracing::info!(
            frames = stats.frames_total,
            held = stats.frames_held,
            error = stats.showed_error,
            "render finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/reveal_session.rs"]
mod tests;
