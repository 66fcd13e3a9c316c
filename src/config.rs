//! Run configuration, loadable from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::Canvas;
use crate::foundation::error::{StarbeamsError, StarbeamsResult};
use crate::render::scheduler::SchedulerOpts;
use crate::scene::params::VariantOpts;

/// Everything a run needs besides the seed.
///
/// Missing JSON fields take their defaults:
///
/// ```json
/// {
///   "buffer": { "width": 2000, "height": 2000 },
///   "visible": { "width": 1280, "height": 720 },
///   "star_iterations": 60,
///   "beam_iterations": 90,
///   "variant": { "scatter": false, "dual_buffer": true, "debug_overlay": false, "jitter": "uniform" },
///   "out_dir": ".",
///   "auto_export": true
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Fixed drawing buffer resolution; also the exported still size.
    pub buffer: Canvas,
    /// Initial visible canvas size.
    pub visible: Canvas,
    /// Frames spent revealing the star.
    pub star_iterations: u32,
    /// Frames spent revealing the beams.
    pub beam_iterations: u32,
    /// Sketch variant switches.
    pub variant: VariantOpts,
    /// Directory exported stills are written to.
    pub out_dir: PathBuf,
    /// Export the final still when the run finishes.
    pub auto_export: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            buffer: Canvas {
                width: 2000,
                height: 2000,
            },
            visible: Canvas {
                width: 1280,
                height: 720,
            },
            star_iterations: 60,
            beam_iterations: 90,
            variant: VariantOpts::default(),
            out_dir: PathBuf::from("."),
            auto_export: true,
        }
    }
}

impl RenderConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StarbeamsResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StarbeamsError::config(format!("parse config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StarbeamsResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StarbeamsError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check sizes and budgets.
    pub fn validate(&self) -> StarbeamsResult<()> {
        self.buffer
            .validate()
            .map_err(|e| StarbeamsError::config(format!("buffer: {e}")))?;
        self.visible
            .validate()
            .map_err(|e| StarbeamsError::config(format!("visible: {e}")))?;
        if self.star_iterations == 0 || self.beam_iterations == 0 {
            return Err(StarbeamsError::config(
                "star_iterations and beam_iterations must be > 0",
            ));
        }
        Ok(())
    }

    /// Frame budgets for the scheduler.
    pub fn scheduler_opts(&self) -> SchedulerOpts {
        SchedulerOpts {
            star_iterations: self.star_iterations,
            beam_iterations: self.beam_iterations,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
