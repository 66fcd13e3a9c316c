//! Where an artwork's outputs go: feature labels to an indexer, finished stills to disk.

use std::path::PathBuf;

use crate::foundation::error::{StarbeamsError, StarbeamsResult};
use crate::render::composite::unpremultiply_in_place;
use crate::render::compositor::FrameRGBA;
use crate::scene::features::FeatureLabels;

/// Receives the feature labels of an artwork.
///
/// Ordering contract: `publish` is called exactly once per run, before any pixel is drawn.
pub trait FeatureSink {
    /// Publish the labels.
    fn publish(&mut self, labels: &FeatureLabels) -> StarbeamsResult<()>;
}

/// Keeps published labels in memory, for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct InMemoryFeatureSink {
    published: Vec<FeatureLabels>,
}

impl InMemoryFeatureSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every label set published so far, in order.
    pub fn published(&self) -> &[FeatureLabels] {
        &self.published
    }
}

impl FeatureSink for InMemoryFeatureSink {
    fn publish(&mut self, labels: &FeatureLabels) -> StarbeamsResult<()> {
        self.published.push(labels.clone());
        Ok(())
    }
}

/// Emits the labels as one structured `info` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeatureSink;

impl FeatureSink for LogFeatureSink {
    fn publish(&mut self, labels: &FeatureLabels) -> StarbeamsResult<()> {
        let json = labels.to_json_string();
        tracing::info!(features = %json, "features");
        Ok(())
    }
}

/// Writes the labels as a JSON object to a file.
#[derive(Debug, Clone)]
pub struct JsonFileFeatureSink {
    path: PathBuf,
}

impl JsonFileFeatureSink {
    /// Sink writing to `path`, replacing any existing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeatureSink for JsonFileFeatureSink {
    fn publish(&mut self, labels: &FeatureLabels) -> StarbeamsResult<()> {
        let json = labels.to_json_string();
        std::fs::write(&self.path, json).map_err(|e| {
            StarbeamsError::export(format!(
                "failed to write features '{}': {e}",
                self.path.display()
            ))
        })
    }
}

/// Receives finished still images.
pub trait StillExporter {
    /// Store `frame` under `filename`.
    fn export_still(&mut self, frame: &FrameRGBA, filename: &str) -> StarbeamsResult<()>;
}

/// Writes stills as straight-alpha PNG files into a directory.
#[derive(Debug, Clone)]
pub struct PngExporter {
    out_dir: PathBuf,
}

impl PngExporter {
    /// Exporter writing into `out_dir`, created on first export.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Target path of `filename`.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.out_dir.join(filename)
    }
}

impl StillExporter for PngExporter {
    #[tracing::instrument(skip(self, frame), fields(width = frame.width, height = frame.height))]
    fn export_still(&mut self, frame: &FrameRGBA, filename: &str) -> StarbeamsResult<()> {
        std::fs::create_dir_all(&self.out_dir).map_err(|e| {
            StarbeamsError::export(format!(
                "create output dir '{}': {e}",
                self.out_dir.display()
            ))
        })?;
        let path = self.path_for(filename);
        write_png(frame, &path)?;
        tracing::info!(path = %path.display(), "still exported");
        Ok(())
    }
}

/// Encode `frame` as PNG at `path`, undoing premultiplication first.
pub fn write_png(frame: &FrameRGBA, path: &std::path::Path) -> StarbeamsResult<()> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(StarbeamsError::export("frame byte len mismatch"));
    }

    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_in_place(&mut data);
    }
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| StarbeamsError::export(format!("write png '{}': {e}", path.display())))
}

/// Keeps exported stills in memory, for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryExporter {
    stills: Vec<(String, FrameRGBA)>,
}

impl InMemoryExporter {
    /// Create an empty exporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exported stills with their filenames, in export order.
    pub fn stills(&self) -> &[(String, FrameRGBA)] {
        &self.stills
    }
}

impl StillExporter for InMemoryExporter {
    fn export_still(&mut self, frame: &FrameRGBA, filename: &str) -> StarbeamsResult<()> {
        self.stills.push((filename.to_owned(), frame.clone()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/sink.rs"]
mod tests;
