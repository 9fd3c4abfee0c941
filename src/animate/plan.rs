use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgb8};

/// Backend-agnostic drawing command.
///
/// Geometry commands are expressed in origin-centered coordinates and drawn through
/// [`FramePlan::origin`]; text is positioned in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp<'a> {
    /// Closed polygon, filled, no stroke.
    FillPolygon { points: &'a [Point], color: Rgb8 },
    /// Open polyline, stroked, no fill.
    StrokePolyline {
        points: &'a [Point],
        color: Rgb8,
        width: f64,
    },
    /// Text wrapped to the width of `rect`.
    Text {
        text: &'a str,
        rect: Rect,
        color: Rgb8,
        size_px: f32,
    },
}

/// Everything needed to paint one frame from scratch.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan<'a> {
    pub canvas: Canvas,
    /// The surface is cleared to this color before any op.
    pub background: Rgb8,
    /// Translation applied to geometry ops.
    pub origin: Affine,
    pub ops: Vec<DrawOp<'a>>,
}

impl FramePlan<'_> {
    /// Number of filled polygons in the plan.
    pub fn filled_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillPolygon { .. }))
            .count()
    }

    /// The in-progress stroke, if the plan has one.
    pub fn stroke(&self) -> Option<(&[Point], Rgb8)> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::StrokePolyline { points, color, .. } => Some((*points, *color)),
            _ => None,
        })
    }

    pub fn has_text(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Text { .. }))
    }
}

/// Paint settings shared by every frame of a reveal.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStyle {
    pub canvas: Canvas,
    pub background: Rgb8,
    /// Stroke weight of the in-progress outline, in pixels.
    pub stroke_width: f64,
    pub error_color: Rgb8,
    pub error_text_px: f32,
    /// Distance between the error text box and the canvas edges.
    pub error_inset: f64,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            background: Rgb8::BLACK,
            stroke_width: 2.0,
            error_color: Rgb8::RED,
            error_text_px: 20.0,
            error_inset: 10.0,
        }
    }
}

impl FrameStyle {
    /// An empty plan with the origin moved to the canvas center.
    pub fn centered_plan<'a>(&self) -> FramePlan<'a> {
        let c = self.canvas.center();
        FramePlan {
            canvas: self.canvas,
            background: self.background,
            origin: Affine::translate((c.x, c.y)),
            ops: Vec::new(),
        }
    }

    /// A plan that shows only `message`, wrapped inside the inset canvas box.
    pub fn message_plan<'a>(&self, message: &'a str) -> FramePlan<'a> {
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        let inset = self.error_inset;
        let rect = Rect::new(inset, inset, (w - inset).max(inset), (h - inset).max(inset));
        FramePlan {
            canvas: self.canvas,
            background: self.background,
            origin: Affine::IDENTITY,
            ops: vec![DrawOp::Text {
                text: message,
                rect,
                color: self.error_color,
                size_px: self.error_text_px,
            }],
        }
    }
}
