//! Host lifecycle for one artwork: setup, per-frame ticks, resize and key presses.
//!
//! A windowed host forwards its callbacks to [`Sketch`]; headless callers use
//! [`Sketch::run_to_completion`].

use std::time::Instant;

use crate::config::RenderConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::StarbeamsResult;
use crate::random::{RandomSource, Seed, SplitMix64};
use crate::render::compositor::{Compositor, FrameRGBA};
use crate::render::scheduler::{FrameScheduler, RenderState, SchedulerPhase, TickOutcome};
use crate::render::starfield::draw_starfield;
use crate::scene::features::FeatureLabels;
use crate::scene::params::SceneParameters;
use crate::sink::{FeatureSink, StillExporter};

/// Result of one [`Sketch::on_frame`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    /// A batch was drawn (or skipped by scatter thinning); more frames follow.
    Drew(TickOutcome),
    /// Drawing finished on this frame. The preview is ready; emitted exactly once.
    Finished(RunSummary),
    /// The run was already finished; nothing happened.
    Idle,
}

/// Outcome of a finished run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RunSummary {
    /// Seed text.
    pub seed: String,
    /// Published labels.
    pub labels: FeatureLabels,
    /// Final counters.
    pub state: RenderState,
    /// Filename of the automatically exported still, if any.
    pub exported: Option<String>,
}

/// One artwork, from seed to finished still.
///
/// Setup derives the scene, publishes its labels, then allocates the buffers and paints the
/// starfield; every frame afterwards draws one scheduler batch into the content buffer.
pub struct Sketch<R: RandomSource = SplitMix64> {
    seed: Seed,
    config: RenderConfig,
    rng: R,
    params: SceneParameters,
    labels: FeatureLabels,
    compositor: Compositor,
    scheduler: FrameScheduler,
    started: Instant,
    preview: Option<FrameRGBA>,
    exported: Option<String>,
}

impl<R: RandomSource> std::fmt::Debug for Sketch<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sketch")
            .field("seed", &self.seed)
            .field("phase", &self.scheduler.phase())
            .field("state", self.scheduler.state())
            .finish_non_exhaustive()
    }
}

impl Sketch<SplitMix64> {
    /// Set up a run seeded with `seed`'s default generator.
    pub fn on_setup(
        seed: Seed,
        config: RenderConfig,
        sink: &mut dyn FeatureSink,
    ) -> StarbeamsResult<Self> {
        let rng = SplitMix64::from_seed(&seed);
        Self::on_setup_with_rng(seed, rng, config, sink)
    }
}

impl<R: RandomSource> Sketch<R> {
    /// Set up a run drawing its randomness from `rng`.
    ///
    /// `sink` receives the labels before any buffer is allocated or drawn.
    #[tracing::instrument(skip_all, fields(seed = %seed))]
    pub fn on_setup_with_rng(
        seed: Seed,
        mut rng: R,
        config: RenderConfig,
        sink: &mut dyn FeatureSink,
    ) -> StarbeamsResult<Self> {
        config.validate()?;
        let started = Instant::now();

        let params = SceneParameters::derive(&mut rng, config.variant)?;
        let labels = params.labels();
        sink.publish(&labels)?;
        for (name, value) in labels.iter() {
            tracing::info!("{name}: {value}");
        }

        let mut compositor =
            Compositor::new(config.buffer, config.visible, config.variant.dual_buffer)?;
        let stars = draw_starfield(compositor.background_mut(), &mut rng)?;
        let mut scheduler =
            FrameScheduler::new(params.clone(), config.scheduler_opts(), config.buffer, &mut rng)?;
        scheduler.note_background(stars);

        tracing::debug!(
            frames = scheduler.total_frames(),
            star_points = params.star_points_total(),
            beam_points = params.beam_points_total(),
            "setup complete"
        );

        Ok(Self {
            seed,
            config,
            rng,
            params,
            labels,
            compositor,
            scheduler,
            started,
            preview: None,
            exported: None,
        })
    }

    /// Seed of this run.
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Derived scene.
    pub fn params(&self) -> &SceneParameters {
        &self.params
    }

    /// Published labels.
    pub fn labels(&self) -> &FeatureLabels {
        &self.labels
    }

    /// Current counters.
    pub fn state(&self) -> &RenderState {
        self.scheduler.state()
    }

    /// Current scheduler phase.
    pub fn phase(&self) -> SchedulerPhase {
        self.scheduler.phase()
    }

    /// Whether the run has finished and frozen.
    pub fn is_done(&self) -> bool {
        self.scheduler.phase() == SchedulerPhase::Done
    }

    /// The buffers.
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Visible-canvas frame blitted when the run finished.
    pub fn preview(&self) -> Option<&FrameRGBA> {
        self.preview.as_ref()
    }

    /// Deterministic still filename: `<seed>-<width>x<height>.png` at buffer resolution.
    ///
    /// Path separators and control characters in the seed become `_`, so the still always lands
    /// directly in the exporter's directory.
    pub fn still_filename(&self) -> String {
        let stem: String = self
            .seed
            .as_str()
            .chars()
            .map(|c| {
                if matches!(c, '/' | '\\' | ':') || c.is_control() {
                    '_'
                } else {
                    c
                }
            })
            .collect();
        format!(
            "{stem}-{}x{}.png",
            self.config.buffer.width, self.config.buffer.height
        )
    }

    /// Advance one animation frame.
    ///
    /// On the frame drawing ends, blits the preview, records the execution time and, with
    /// `auto_export`, hands the full-resolution still to `exporter`.
    pub fn on_frame(&mut self, exporter: &mut dyn StillExporter) -> StarbeamsResult<FrameEvent> {
        if self.is_done() {
            return Ok(FrameEvent::Idle);
        }

        let outcome = self
            .scheduler
            .tick(self.compositor.content_mut(), &mut self.rng)?;
        if outcome.phase != SchedulerPhase::Finalizing {
            return Ok(FrameEvent::Drew(outcome));
        }

        self.preview = Some(self.blit()?);
        let elapsed = self.started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64;
        self.scheduler.finish(elapsed);
        tracing::info!(
            execution_time_ms = elapsed,
            frames = self.state().frame_index.0,
            points = self.state().points_drawn_total,
            early_stopped = self.state().early_stopped,
            "preview ready"
        );

        if self.config.auto_export {
            let name = self.export_still(exporter)?;
            self.exported = Some(name);
        }
        Ok(FrameEvent::Finished(self.summary()))
    }

    /// Track a new visible canvas size. Never restarts or alters drawing.
    pub fn on_resize(&mut self, width: u32, height: u32) -> StarbeamsResult<()> {
        self.compositor.on_resize(Canvas { width, height })?;
        tracing::debug!(width, height, "resized");
        Ok(())
    }

    /// Handle a key press. `s`/`S` exports the current buffer; returns whether it did.
    pub fn on_key_press(
        &mut self,
        key: char,
        exporter: &mut dyn StillExporter,
    ) -> StarbeamsResult<bool> {
        match key {
            's' | 'S' => {
                self.export_still(exporter)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Fit the current buffers into the visible canvas, with a progress bar in debug mode.
    pub fn blit(&mut self) -> StarbeamsResult<FrameRGBA> {
        let overlay = self
            .config
            .variant
            .debug_overlay
            .then(|| self.scheduler.progress());
        self.compositor.blit(overlay)
    }

    /// Drive frames until the run finishes.
    pub fn run_to_completion(
        &mut self,
        exporter: &mut dyn StillExporter,
    ) -> StarbeamsResult<RunSummary> {
        loop {
            match self.on_frame(exporter)? {
                FrameEvent::Drew(_) => {}
                FrameEvent::Finished(summary) => return Ok(summary),
                FrameEvent::Idle => return Ok(self.summary()),
            }
        }
    }

    /// Snapshot of the run so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.seed.to_string(),
            labels: self.labels.clone(),
            state: *self.scheduler.state(),
            exported: self.exported.clone(),
        }
    }

    fn export_still(&mut self, exporter: &mut dyn StillExporter) -> StarbeamsResult<String> {
        let name = self.still_filename();
        let frame = FrameRGBA::from_surface(&self.compositor.composed()?);
        exporter.export_still(&frame, &name)?;
        Ok(name)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
