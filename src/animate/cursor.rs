use crate::animate::plan::{DrawOp, FramePlan, FrameStyle};
use crate::scene::normalize::NormalizedScene;

/// Progress of the stroke-then-fill reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// Tracing `region`; the next frame strokes `points[0..=point]`.
    ///
    /// Always `region < regions.len()` and `point < regions[region].points.len()`.
    Drawing { region: usize, point: usize },
    /// Every region has been traced; the next frame is the final all-filled picture.
    Revealed,
    /// Terminal. No further frames are produced.
    Finished,
}

/// Two-counter animation cursor driving the reveal one frame at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationCursor {
    state: CursorState,
}

impl Default for AnimationCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationCursor {
    pub fn new() -> Self {
        Self {
            state: CursorState::Drawing {
                region: 0,
                point: 0,
            },
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == CursorState::Finished
    }

    /// Number of regions that are fully traced and drawn filled.
    pub fn completed_regions(&self, scene: &NormalizedScene) -> usize {
        match self.state {
            CursorState::Drawing { region, .. } => region,
            CursorState::Revealed | CursorState::Finished => scene.regions().len(),
        }
    }

    /// Produce the plan for the next frame and move the cursor forward.
    ///
    /// The plan repaints every completed region filled, in order, then strokes the current
    /// region up to and including the current point. A region completes on the frame that
    /// strokes its last point, so a one-point contour completes on its first frame. Returns
    /// `None` once finished.
    pub fn advance<'a>(
        &mut self,
        scene: &'a NormalizedScene,
        style: &FrameStyle,
    ) -> Option<FramePlan<'a>> {
        if self.is_finished() {
            return None;
        }

        let regions = scene.regions();
        let completed = self.completed_regions(scene).min(regions.len());

        let mut plan = style.centered_plan();
        plan.ops.extend(regions[..completed].iter().map(|r| DrawOp::FillPolygon {
            points: &r.points,
            color: r.color,
        }));

        if let CursorState::Drawing { region, point } = self.state
            && let Some(current) = regions.get(region)
        {
            plan.ops.push(DrawOp::StrokePolyline {
                points: current.points.get(..=point).unwrap_or(&current.points),
                color: current.color,
                width: style.stroke_width,
            });
        }

        self.step(scene);
        Some(plan)
    }

    /// Skip up to `frames` frames without building plans. Returns how many were skipped.
    pub fn seek(&mut self, scene: &NormalizedScene, frames: u64) -> u64 {
        let mut skipped = 0;
        while skipped < frames && !self.is_finished() {
            self.step(scene);
            skipped += 1;
        }
        skipped
    }

    fn step(&mut self, scene: &NormalizedScene) {
        let regions = scene.regions();
        self.state = match self.state {
            CursorState::Drawing { region, point } => match regions.get(region) {
                Some(current) if point + 1 < current.points.len() => CursorState::Drawing {
                    region,
                    point: point + 1,
                },
                Some(_) if region + 1 < regions.len() => CursorState::Drawing {
                    region: region + 1,
                    point: 0,
                },
                _ => CursorState::Revealed,
            },
            CursorState::Revealed | CursorState::Finished => CursorState::Finished,
        };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/cursor.rs"]
mod tests;
