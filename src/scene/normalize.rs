use crate::foundation::core::{Point, Rect, Rgb8, Size};
use crate::foundation::error::{RevealError, RevealResult};
use crate::scene::region::RegionDef;

/// Width of the box the drawing is scaled into (800px canvas minus a 100px margin per side).
pub const TARGET_WIDTH: f64 = 600.0;
/// Height of the box the drawing is scaled into.
pub const TARGET_HEIGHT: f64 = 600.0;

/// A region with its points moved into origin-centered canvas space.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformedRegion {
    pub label: String,
    pub points: Vec<Point>,
    pub color: Rgb8,
}

/// The read-only result of normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedScene {
    regions: Vec<TransformedRegion>,
    bounds: Rect,
    center: Point,
    scale: f64,
}

impl NormalizedScene {
    pub fn regions(&self) -> &[TransformedRegion] {
        &self.regions
    }

    /// Bounding box of every source point, in source coordinates.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Center of [`Self::bounds`], in source coordinates.
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Apply the scene transform to a source-space point.
    pub fn to_canvas(&self, p: Point) -> Point {
        transform_point(p, self.center, self.scale)
    }

    pub fn total_points(&self) -> usize {
        self.regions.iter().map(|r| r.points.len()).sum()
    }

    /// Number of frames the reveal animation produces: one per contour point plus the final
    /// fill frame.
    pub fn total_frames(&self) -> u64 {
        self.total_points() as u64 + 1
    }
}

/// Normalize into the default 600x600 target box.
pub fn normalize(regions: &[RegionDef]) -> RevealResult<NormalizedScene> {
    normalize_to(regions, Size::new(TARGET_WIDTH, TARGET_HEIGHT))
}

/// Scale and center `regions` so the bounding box of all their points fits `target`.
///
/// A single uniform scale is used for both axes and Y is flipped: source Y grows upward, canvas Y
/// grows downward.
#[tracing::instrument(skip(regions), fields(regions = regions.len()))]
pub fn normalize_to(regions: &[RegionDef], target: Size) -> RevealResult<NormalizedScene> {
    if regions.is_empty() {
        return Err(RevealError::empty_input("no regions to normalize"));
    }
    if let Some(r) = regions.iter().find(|r| r.contour.is_empty()) {
        return Err(RevealError::malformed(format!(
            "region '{}' has an empty contour",
            r.label
        )));
    }

    if let Some(p) = regions
        .iter()
        .flat_map(|r| r.contour.iter())
        .find(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(RevealError::malformed(format!(
            "point ({}, {}) is not finite",
            p.x, p.y
        )));
    }

    let bounds = bounding_box(regions.iter().flat_map(|r| r.contour.iter().copied()));
    let (w, h) = (bounds.width(), bounds.height());
    if !is_positive_finite(w) || !is_positive_finite(h) {
        return Err(RevealError::degenerate(format!(
            "bounding box ({}, {})-({}, {}) has zero or unrepresentable width or height",
            bounds.x0, bounds.y0, bounds.x1, bounds.y1
        )));
    }

    let scale = (target.width / w).min(target.height / h);
    if !is_positive_finite(scale) {
        return Err(RevealError::degenerate(format!(
            "cannot fit a {w}x{h} bounding box into a {}x{} target",
            target.width, target.height
        )));
    }
    // `Rect::center` sums the edges first, which overflows near f64::MAX.
    let center = Point::new(bounds.x0 + w / 2.0, bounds.y0 + h / 2.0);

    let regions = regions
        .iter()
        .map(|r| TransformedRegion {
            label: r.label.clone(),
            points: r
                .contour
                .iter()
                .map(|&p| transform_point(p, center, scale))
                .collect(),
            color: r.color,
        })
        .collect();

    tracing::debug!(scale, center_x = center.x, center_y = center.y, "normalized scene");

    Ok(NormalizedScene {
        regions,
        bounds,
        center,
        scale,
    })
}

fn bounding_box(points: impl Iterator<Item = Point>) -> Rect {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Rect::from_points(min, max)
}

fn is_positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn transform_point(p: Point, center: Point, scale: f64) -> Point {
    Point::new((p.x - center.x) * scale, (p.y - center.y) * -scale)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/normalize.rs"]
mod tests;
