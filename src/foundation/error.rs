/// Crate-wide result alias.
pub type RevealResult<T> = Result<T, RevealError>;

/// Errors raised while loading, normalizing or rendering a reveal.
///
/// The first four variants are load errors: once one is recorded by a session it replaces all
/// drawing with an on-screen message. The remaining variants belong to the host side (rendering
/// and encoding) and propagate to the caller.
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// Input file missing, unreadable, or not valid JSON.
    #[error("load failure: {0}")]
    LoadFailure(String),

    /// The input parsed but contains no regions.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A region lacks a contour or color, or a point does not have exactly two coordinates.
    #[error("malformed data: {0}")]
    MalformedData(String),

    /// The bounding box of all points has zero width or zero height.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Frame output (PNG or ffmpeg) failed.
    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RevealError {
    pub fn load_failure(msg: impl Into<String>) -> Self {
        Self::LoadFailure(msg.into())
    }

    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedData(msg.into())
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// `true` for the errors a session turns into an on-screen message.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::LoadFailure(_)
                | Self::EmptyInput(_)
                | Self::MalformedData(_)
                | Self::DegenerateGeometry(_)
        )
    }

    /// Text shown on the canvas in place of the drawing.
    pub fn screen_message(&self) -> String {
        match self {
            Self::LoadFailure(detail) => format!(
                "Error: could not load the region file.\nCheck that it exists and is valid JSON.\n\n{detail}"
            ),
            Self::EmptyInput(_) => {
                "Error: the JSON file is empty or contains no regions to draw.".to_string()
            }
            Self::MalformedData(detail) => {
                format!("Error: the region data has an invalid format.\n\n{detail}")
            }
            Self::DegenerateGeometry(detail) => {
                format!("Error: the regions have no drawable extent.\n\n{detail}")
            }
            other => format!("Error: {other}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
