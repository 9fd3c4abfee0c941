use std::path::PathBuf;

use crate::animate::plan::{DrawOp, FramePlan};
use crate::foundation::core::{Affine, Point, Rgb8};
use crate::foundation::error::{RevealError, RevealResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::text::{LoadedFont, TextBrushRgba8, TextLayoutEngine};

/// Options for [`CpuBackend`].
#[derive(Clone, Debug, Default)]
pub struct CpuBackendOpts {
    /// Font file used for on-canvas text. `None` resolves a system sans-serif face on first use.
    pub font_path: Option<PathBuf>,
}

/// CPU raster backend powered by `vello_cpu`.
pub struct CpuBackend {
    opts: CpuBackendOpts,
    ctx: Option<vello_cpu::RenderContext>,
    text_engine: TextLayoutEngine,
    font: FontSlot,
}

enum FontSlot {
    Unresolved,
    Missing,
    Ready(LoadedFont, vello_cpu::peniko::FontData),
}

impl CpuBackend {
    pub fn new(opts: CpuBackendOpts) -> Self {
        Self {
            opts,
            ctx: None,
            text_engine: TextLayoutEngine::new(),
            font: FontSlot::Unresolved,
        }
    }

    /// The font used for text ops, resolving it on first call.
    pub fn font(&mut self) -> RevealResult<Option<&LoadedFont>> {
        self.resolve_font()?;
        Ok(match &self.font {
            FontSlot::Ready(font, _) => Some(font),
            FontSlot::Unresolved | FontSlot::Missing => None,
        })
    }

    fn resolve_font(&mut self) -> RevealResult<()> {
        if !matches!(self.font, FontSlot::Unresolved) {
            return Ok(());
        }
        let loaded = match &self.opts.font_path {
            Some(path) => Some(LoadedFont::from_path(path)?),
            None => LoadedFont::from_system(),
        };
        self.font = match loaded {
            Some(font) => {
                tracing::debug!(origin = %font.origin, "resolved text font");
                let data = vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.bytes.to_vec()),
                    font.index,
                );
                FontSlot::Ready(font, data)
            }
            None => {
                tracing::warn!("no usable font found; text will not be drawn");
                FontSlot::Missing
            }
        };
        Ok(())
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> RevealResult<R>,
    ) -> RevealResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        rect: crate::foundation::core::Rect,
        color: Rgb8,
        size_px: f32,
    ) -> RevealResult<()> {
        self.resolve_font()?;
        let FontSlot::Ready(font, font_data) = &self.font else {
            return Ok(());
        };

        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: 255,
        };
        let layout = self.text_engine.layout_wrapped(
            text,
            font,
            size_px,
            brush,
            rect.width() as f32,
            parley::Alignment::Center,
        )?;

        // Lines are centered by the layout; the block is centered vertically, clamped to the top.
        let dy = ((rect.height() - f64::from(layout.height())) / 2.0).max(0.0);
        ctx.set_transform(affine_to_cpu(Affine::translate((rect.x0, rect.y0 + dy))));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip_all, fields(ops = plan.ops.len()))]
    fn render_plan(&mut self, plan: &FramePlan<'_>) -> RevealResult<FrameRGBA> {
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| RevealError::render("canvas width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| RevealError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(RevealError::render("canvas width/height must be > 0"));
        }

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        clear_pixmap(&mut pixmap, plan.background.to_rgba8());

        self.with_ctx_mut(width, height, |backend, ctx| {
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(plan.background));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));

            for op in &plan.ops {
                draw_op(backend, ctx, plan.origin, op)?;
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_op(
    backend: &mut CpuBackend,
    ctx: &mut vello_cpu::RenderContext,
    origin: Affine,
    op: &DrawOp<'_>,
) -> RevealResult<()> {
    match op {
        DrawOp::FillPolygon { points, color } => {
            if points.is_empty() {
                return Ok(());
            }
            ctx.set_transform(affine_to_cpu(origin));
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_path(&polyline_to_cpu(points, true));
            Ok(())
        }
        DrawOp::StrokePolyline {
            points,
            color,
            width,
        } => {
            if points.is_empty() {
                return Ok(());
            }
            ctx.set_transform(affine_to_cpu(origin));
            ctx.set_paint(color_to_cpu(*color));
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(*width)
                    .with_caps(vello_cpu::kurbo::Cap::Round)
                    .with_join(vello_cpu::kurbo::Join::Miter),
            );
            ctx.stroke_path(&polyline_to_cpu(points, false));
            Ok(())
        }
        DrawOp::Text {
            text,
            rect,
            color,
            size_px,
        } => backend.draw_text(ctx, text, *rect, *color, *size_px),
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn color_to_cpu(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn polyline_to_cpu(points: &[Point], close: bool) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        out.move_to(point_to_cpu(first));
        for &p in iter {
            out.line_to(point_to_cpu(p));
        }
        if close {
            out.close_path();
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
