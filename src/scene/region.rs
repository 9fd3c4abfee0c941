use std::{fs::File, io::BufReader, io::Read, path::Path};

use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::{RevealError, RevealResult};

/// One input polygon: an ordered contour plus its fill color.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionDef {
    /// Mapping key for object input, `#<index>` for array input. Diagnostics only.
    pub label: String,
    pub contour: Vec<Point>,
    pub color: Rgb8,
}

/// Wire shape of one region entry.
#[derive(Debug, serde::Deserialize)]
struct RegionEntry {
    contour: Option<Vec<[f64; 2]>>,
    color: Option<Rgb8>,
}

/// Top-level layout detected in an input document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceLayout {
    /// `[{...}, {...}]`
    Array,
    /// `{"key": {...}, ...}`, iterated in document order.
    Object,
}

/// Canonical ordered region list produced at the load boundary.
#[derive(Clone, Debug)]
pub struct RegionSet {
    layout: SourceLayout,
    regions: Vec<RegionDef>,
}

impl RegionSet {
    /// Read and parse a region file.
    ///
    /// Any I/O or JSON syntax problem is a [`RevealError::LoadFailure`].
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> RevealResult<Self> {
        let f = File::open(path).map_err(|e| {
            RevealError::load_failure(format!("open region file '{}': {e}", path.display()))
        })?;
        let set = Self::from_reader(BufReader::new(f))?;
        tracing::info!(
            path = %path.display(),
            regions = set.len(),
            "loaded region file"
        );
        Ok(set)
    }

    pub fn from_reader<R: Read>(r: R) -> RevealResult<Self> {
        let value: serde_json::Value = serde_json::from_reader(r)
            .map_err(|e| RevealError::load_failure(format!("parse region JSON: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_json_str(s: &str) -> RevealResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| RevealError::load_failure(format!("parse region JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Canonicalize an already-parsed document.
    ///
    /// Arrays keep element order, objects keep key order.
    pub fn from_value(value: serde_json::Value) -> RevealResult<Self> {
        let (layout, entries): (SourceLayout, Vec<(String, serde_json::Value)>) = match value {
            serde_json::Value::Array(items) => (
                SourceLayout::Array,
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (format!("#{i}"), v))
                    .collect(),
            ),
            serde_json::Value::Object(map) => (SourceLayout::Object, map.into_iter().collect()),
            other => {
                return Err(RevealError::malformed(format!(
                    "top-level JSON must be an array or an object of regions, got {}",
                    json_kind(&other)
                )));
            }
        };
        tracing::debug!(?layout, entries = entries.len(), "detected region layout");

        if entries.is_empty() {
            return Err(RevealError::empty_input(format!(
                "the {} contains no regions",
                match layout {
                    SourceLayout::Array => "array",
                    SourceLayout::Object => "object",
                }
            )));
        }

        let regions = entries
            .into_iter()
            .map(|(label, v)| region_from_entry(label, v))
            .collect::<RevealResult<Vec<_>>>()?;

        Ok(Self { layout, regions })
    }

    pub fn layout(&self) -> SourceLayout {
        self.layout
    }

    pub fn regions(&self) -> &[RegionDef] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn into_regions(self) -> Vec<RegionDef> {
        self.regions
    }
}

fn region_from_entry(label: String, value: serde_json::Value) -> RevealResult<RegionDef> {
    if !value.is_object() {
        return Err(RevealError::malformed(format!(
            "region '{label}' must be an object, got {}",
            json_kind(&value)
        )));
    }

    let entry: RegionEntry = serde_json::from_value(value)
        .map_err(|e| RevealError::malformed(format!("region '{label}': {e}")))?;

    let contour = entry
        .contour
        .ok_or_else(|| RevealError::malformed(format!("region '{label}' has no contour")))?;
    if contour.is_empty() {
        return Err(RevealError::malformed(format!(
            "region '{label}' has an empty contour"
        )));
    }
    let color = entry
        .color
        .ok_or_else(|| RevealError::malformed(format!("region '{label}' has no color")))?;

    Ok(RegionDef {
        label,
        contour: contour.into_iter().map(|[x, y]| Point::new(x, y)).collect(),
        color,
    })
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/region.rs"]
mod tests;
