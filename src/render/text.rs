use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{RevealError, RevealResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

const SANS_SERIF_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "Segoe UI",
];

/// Raw font file bytes plus where they came from.
#[derive(Clone, Debug)]
pub struct LoadedFont {
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a font collection.
    pub index: u32,
    /// Path or family description, for diagnostics.
    pub origin: String,
}

impl LoadedFont {
    pub fn from_path(path: &Path) -> RevealResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            RevealError::render(format!("read font '{}': {e}", path.display()))
        })?;
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
            origin: path.display().to_string(),
        })
    }

    /// Pick a sans-serif face from the fonts installed on this machine.
    ///
    /// Common sans-serif families are tried in order before the generic `SansSerif` alias
    /// (which `fontdb` maps to Arial). Falls back to the first face found when none resolves.
    pub fn from_system() -> Option<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let mut families: Vec<usvg::fontdb::Family<'_>> = SANS_SERIF_FAMILIES
            .iter()
            .map(|&name| usvg::fontdb::Family::Name(name))
            .collect();
        families.push(usvg::fontdb::Family::SansSerif);
        let query = usvg::fontdb::Query {
            families: &families,
            ..Default::default()
        };
        let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
        let origin = db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "system font".to_string());

        db.with_face_data(id, |data, index| Self {
            bytes: Arc::new(data.to_vec()),
            index,
            origin,
        })
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: Option<String>,
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family_name: None,
        }
    }

    fn family_for(&mut self, font: &LoadedFont) -> RevealResult<String> {
        if let Some(name) = &self.family_name {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| RevealError::render("no font families registered from font bytes"))?;

        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| RevealError::render("registered font family has no name"))?
            .to_string();
        self.family_name = Some(name.clone());
        Ok(name)
    }

    /// Shape `text`, break it into lines no wider than `max_width_px` and align each line
    /// within that width.
    pub(crate) fn layout_wrapped(
        &mut self,
        text: &str,
        font: &LoadedFont,
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: f32,
        alignment: parley::Alignment,
    ) -> RevealResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(RevealError::render("text size_px must be finite and > 0"));
        }

        let family_name = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(Some(max_width_px));
        layout.align(
            Some(max_width_px),
            alignment,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
