use std::path::{Path, PathBuf};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{RevealError, RevealResult};
use crate::foundation::math::flatten_premul_over_bg_to_opaque_rgba8;
use crate::render::backend::FrameRGBA;

/// Write one frame as an opaque PNG, flattening alpha over `bg_rgba`.
pub fn write_png(path: &Path, frame: &FrameRGBA, bg_rgba: [u8; 4]) -> RevealResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            RevealError::encode(format!(
                "create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut opaque = vec![0u8; frame.data.len()];
    flatten_premul_over_bg_to_opaque_rgba8(&mut opaque, &frame.data, bg_rgba)?;

    image::save_buffer_with_format(
        path,
        &opaque,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| RevealError::encode(format!("write png '{}': {e}", path.display())))
}

/// Sink that writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
pub struct PngSequenceSink {
    dir: PathBuf,
    bg_rgba: [u8; 4],
    written: Vec<PathBuf>,
    started: bool,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            bg_rgba: [0, 0, 0, 255],
            written: Vec::new(),
            started: false,
        }
    }

    pub fn with_background(mut self, bg_rgba: [u8; 4]) -> Self {
        self.bg_rgba = bg_rgba;
        self
    }

    /// Paths written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> RevealResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            RevealError::encode(format!(
                "create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.written.clear();
        self.started = true;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RevealResult<()> {
        if !self.started {
            return Err(RevealError::encode("png sink not started"));
        }
        let path = self.frame_path(idx);
        write_png(&path, frame, self.bg_rgba)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> RevealResult<()> {
        tracing::info!(
            dir = %self.dir.display(),
            frames = self.written.len(),
            "wrote png sequence"
        );
        self.started = false;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
