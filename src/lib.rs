//! Starbeams is a seed-driven generative artwork renderer.
//!
//! One seed deterministically picks a palette, a star and a fan of curved beams, then the artwork
//! is revealed point by point over a fixed number of animation frames and saved as a still.
//!
//! # Pipeline overview
//!
//! 1. **Derive**: `Seed -> SceneParameters` plus the [`FeatureLabels`] published to an indexer
//! 2. **Setup**: allocate fixed-resolution buffers and paint the starfield once
//! 3. **Tick**: the [`FrameScheduler`] draws one batch of star or beam points per frame
//! 4. **Finish**: blit the buffer into the visible canvas and export the still
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: every random draw comes from one [`RandomSource`], in a fixed order.
//! - **Resolution-independent**: buffers never follow the visible canvas; resizing only changes
//!   the final blit.
//! - **Premultiplied RGBA8** in every buffer; exported PNGs are straight alpha.
//!
//! # Getting started
//!
//! ```no_run
//! use starbeams::{InMemoryFeatureSink, PngExporter, RenderConfig, Seed, Sketch};
//!
//! let mut sink = InMemoryFeatureSink::new();
//! let mut sketch = Sketch::on_setup(Seed::new("oo1234"), RenderConfig::default(), &mut sink)?;
//! let summary = sketch.run_to_completion(&mut PngExporter::new("out"))?;
//! println!("{} points", summary.state.points_drawn_total);
//! # Ok::<(), starbeams::StarbeamsError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Run configuration.
pub mod config;
/// Shared primitives.
pub mod foundation;
/// Deterministic randomness.
pub mod random;
/// Rendering.
pub mod render;
/// Scene derivation.
pub mod scene;
/// Host lifecycle.
pub mod session;
/// Output sinks.
pub mod sink;

pub use crate::config::RenderConfig;
pub use crate::foundation::color::Hsba;
pub use crate::foundation::core::{Affine, Canvas, FrameIndex, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{StarbeamsError, StarbeamsResult};
pub use crate::random::{RandomSource, Seed, SplitMix64};
pub use crate::render::compositor::{Compositor, FrameRGBA, fit_contain};
pub use crate::render::scheduler::{
    FrameScheduler, RenderState, SchedulerOpts, SchedulerPhase, TickOutcome,
};
pub use crate::render::surface::{DrawSurface, Surface};
pub use crate::scene::features::{FeatureLabels, FeatureValue};
pub use crate::scene::palette::Palette;
pub use crate::scene::params::{
    BeamDensity, JitterMode, SceneParameters, StarSizeClass, Twistiness, VariantOpts,
};
pub use crate::session::{FrameEvent, RunSummary, Sketch};
pub use crate::sink::{
    FeatureSink, InMemoryExporter, InMemoryFeatureSink, JsonFileFeatureSink, LogFeatureSink,
    PngExporter, StillExporter,
};
