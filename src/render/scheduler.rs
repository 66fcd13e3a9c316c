use crate::foundation::core::{Canvas, FrameIndex, Point};
use crate::foundation::error::{StarbeamsError, StarbeamsResult};
use crate::random::RandomSource;
use crate::render::curve::{BeamCurve, sample_radial};
use crate::render::painter::PointPainter;
use crate::render::surface::{DrawSurface, TransformStack};
use crate::scene::params::SceneParameters;

/// Origin pull-back of every star ray, as a fraction of its length.
pub const STAR_RAY_START_OFFSET: f64 = 0.01;

/// Progressive-rendering phases. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum SchedulerPhase {
    /// Constructed, no frame drawn yet.
    Initializing,
    /// Revealing the star rays.
    RenderingStar,
    /// Revealing the beam fan.
    RenderingBeams,
    /// Drawing is over; waiting for the host to blit and record the execution time.
    Finalizing,
    /// Frozen. Further ticks are no-ops.
    Done,
}

impl SchedulerPhase {
    /// Whether no more points will be drawn.
    pub fn is_terminal(self) -> bool {
        matches!(self, SchedulerPhase::Finalizing | SchedulerPhase::Done)
    }
}

/// Frame budgets of the animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SchedulerOpts {
    /// Frames spent revealing the star (skipped when the scene has none).
    pub star_iterations: u32,
    /// Frames spent revealing the beams.
    pub beam_iterations: u32,
}

impl Default for SchedulerOpts {
    fn default() -> Self {
        Self {
            star_iterations: 60,
            beam_iterations: 90,
        }
    }
}

/// Mutable progress of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderState {
    /// Last drawn frame, 1-based. `FrameIndex(0)` before the first tick.
    pub frame_index: FrameIndex,
    /// Star and beam points painted so far.
    pub points_drawn_total: u64,
    /// Star points painted so far.
    pub star_points_drawn: u64,
    /// Beam points painted so far.
    pub beam_points_drawn: u64,
    /// Background stars painted at setup. Not part of `points_drawn_total`.
    pub background_points: u64,
    /// A beam sample left the buffer extent.
    pub early_stopped: bool,
    /// Wall-clock duration of the run, set once at completion.
    pub execution_time_ms: Option<u64>,
}

/// What one call to [`FrameScheduler::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    /// Frame drawn by this tick; `None` when the scheduler was already terminal.
    pub frame: Option<FrameIndex>,
    /// Star points painted by this tick.
    pub star_points: u64,
    /// Beam points painted by this tick.
    pub beam_points: u64,
    /// The beam batch was skipped by scatter thinning.
    pub scattered: bool,
    /// Phase after the tick.
    pub phase: SchedulerPhase,
}

/// Index range `[lo, hi)` of a budget of `total` points drawn in 1-based frame `k` of `frames`.
///
/// Consecutive frames tile `0..total` exactly.
pub fn batch_range(k: u32, frames: u32, total: u32) -> std::ops::Range<u32> {
    if frames == 0 || k == 0 || k > frames {
        return 0..0;
    }
    let at = |j: u32| ((u64::from(j) * u64::from(total)) / u64::from(frames)) as u32;
    at(k - 1)..at(k)
}

/// Frame-driven state machine revealing the star and beams batch by batch.
///
/// The host calls [`tick`](Self::tick) once per animation frame. Star frames come first (when
/// the scene has a star), then beam frames. A beam sample whose local pre-jitter position falls
/// outside the buffer extent, or is not finite, stops drawing for good.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    params: SceneParameters,
    opts: SchedulerOpts,
    buffer: Canvas,
    ray_lengths: Vec<f64>,
    origin: TransformStack,
    beam_curve: BeamCurve,
    star_painter: PointPainter,
    beam_painter: PointPainter,
    phase: SchedulerPhase,
    state: RenderState,
}

impl FrameScheduler {
    /// Prepare a run over a `buffer`-sized surface.
    ///
    /// With a star, draws one ray length per star copy from `rng`.
    pub fn new<R: RandomSource>(
        params: SceneParameters,
        opts: SchedulerOpts,
        buffer: Canvas,
        rng: &mut R,
    ) -> StarbeamsResult<Self> {
        params.validate()?;
        buffer.validate()?;
        if opts.star_iterations == 0 || opts.beam_iterations == 0 {
            return Err(StarbeamsError::validation("iteration budgets must be > 0"));
        }

        let w = f64::from(buffer.width);
        let ray_lengths = if params.has_star {
            (0..params.star_repeat)
                .map(|_| 0.2 * w + rng.range(-0.05 * w, params.star_ray_length_factor * w))
                .collect()
        } else {
            Vec::new()
        };

        let mut origin = TransformStack::new();
        origin.translate(buffer.center().to_vec2());

        let y_sign = params.variant.jitter.y_sign();
        Ok(Self {
            beam_curve: BeamCurve::new(
                0.5 * w,
                params.start_offset,
                params.end_x_offset,
                params.end_y_offset,
            ),
            star_painter: PointPainter::star_ray(params.palette.star_hue(), w, y_sign),
            beam_painter: PointPainter::beam(params.palette.beam_hue(), w, y_sign),
            params,
            opts,
            buffer,
            ray_lengths,
            origin,
            phase: SchedulerPhase::Initializing,
            state: RenderState::default(),
        })
    }

    /// Scene being drawn.
    pub fn params(&self) -> &SceneParameters {
        &self.params
    }

    /// Current phase.
    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    /// Current progress counters.
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Per-copy star ray lengths, drawn at construction.
    pub fn ray_lengths(&self) -> &[f64] {
        &self.ray_lengths
    }

    /// Frames spent on the star.
    pub fn star_frames(&self) -> u32 {
        if self.params.has_star {
            self.opts.star_iterations
        } else {
            0
        }
    }

    /// Frames spent on the beams.
    pub fn beam_frames(&self) -> u32 {
        if self.params.has_beams {
            self.opts.beam_iterations
        } else {
            0
        }
    }

    /// Total animation length in frames.
    pub fn total_frames(&self) -> u32 {
        self.star_frames() + self.beam_frames()
    }

    /// Fraction of the animation drawn, in `[0, 1]`. Terminal runs report 1.
    pub fn progress(&self) -> f64 {
        let total = self.total_frames();
        if self.phase.is_terminal() || total == 0 {
            return 1.0;
        }
        (self.state.frame_index.0 as f64 / f64::from(total)).min(1.0)
    }

    /// Record how many background stars the host painted before the first tick.
    pub fn note_background(&mut self, stars: u64) {
        self.state.background_points = stars;
    }

    /// Draw the next frame's batch onto `surface` and flush it.
    ///
    /// No-op once terminal.
    pub fn tick<S: DrawSurface, R: RandomSource>(
        &mut self,
        surface: &mut S,
        rng: &mut R,
    ) -> StarbeamsResult<TickOutcome> {
        if self.phase.is_terminal() {
            return Ok(self.outcome(None, 0, 0, false));
        }
        if self.total_frames() == 0 {
            self.phase = SchedulerPhase::Finalizing;
            return Ok(self.outcome(None, 0, 0, false));
        }

        let frame = self.state.frame_index.next();
        let star_frames = self.star_frames();
        let mut star_points = 0u64;
        let mut beam_points = 0u64;
        let mut scattered = false;

        if frame.0 <= u64::from(star_frames) {
            self.phase = SchedulerPhase::RenderingStar;
            self.draw_star_batch(frame.0 as u32, surface, rng, &mut star_points);
        } else {
            self.phase = SchedulerPhase::RenderingBeams;
            let k = (frame.0 - u64::from(star_frames)) as u32;
            if self.params.scatter_enabled && k % self.params.scatter_factor == 0 {
                scattered = true;
            } else {
                self.draw_beam_batch(k, surface, rng, &mut beam_points);
            }
        }
        surface.flush()?;

        self.state.frame_index = frame;
        self.state.star_points_drawn += star_points;
        self.state.beam_points_drawn += beam_points;
        self.state.points_drawn_total += star_points + beam_points;

        if self.state.early_stopped || frame.0 >= u64::from(self.total_frames()) {
            self.phase = SchedulerPhase::Finalizing;
            tracing::debug!(
                frame = frame.0,
                early_stopped = self.state.early_stopped,
                points = self.state.points_drawn_total,
                "drawing finished"
            );
        }

        tracing::trace!(frame = frame.0, star_points, beam_points, scattered, "tick");
        Ok(self.outcome(Some(frame), star_points, beam_points, scattered))
    }

    /// Freeze the run, recording its duration.
    ///
    /// Returns `true` only on the first call after drawing finished.
    pub fn finish(&mut self, execution_time_ms: u64) -> bool {
        if self.phase != SchedulerPhase::Finalizing || self.state.execution_time_ms.is_some() {
            return false;
        }
        self.state.execution_time_ms = Some(execution_time_ms);
        self.phase = SchedulerPhase::Done;
        true
    }

    fn draw_star_batch<S: DrawSurface, R: RandomSource>(
        &mut self,
        k: u32,
        surface: &mut S,
        rng: &mut R,
        drawn: &mut u64,
    ) {
        let n = self.params.star_point_budget;
        let batch = batch_range(k, self.opts.star_iterations, n);
        if batch.is_empty() {
            return;
        }

        let step = 360.0 / f64::from(self.params.star_repeat);
        self.origin.push();
        for &length in &self.ray_lengths {
            for i in batch.clone() {
                let t = f64::from(i) / f64::from(n);
                let local = sample_radial(STAR_RAY_START_OFFSET, length, t);
                self.star_painter
                    .paint(surface, &self.origin, local, rng, drawn);
            }
            self.origin.rotate_degrees(step);
        }
        self.origin.pop();
    }

    fn draw_beam_batch<S: DrawSurface, R: RandomSource>(
        &mut self,
        k: u32,
        surface: &mut S,
        rng: &mut R,
        drawn: &mut u64,
    ) {
        let n = self.params.beam_point_budget;
        let batch = batch_range(k, self.opts.beam_iterations, n);
        if batch.is_empty() {
            return;
        }

        let w = f64::from(self.buffer.width);
        let h = f64::from(self.buffer.height);
        let step = 360.0 / f64::from(self.params.beam_count);
        self.origin.push();
        'copies: for _ in 0..self.params.beam_count {
            for i in batch.clone() {
                let t = f64::from(i) / f64::from(n);
                let local = self.beam_curve.at(t);
                if !in_extent(local, w, h) {
                    self.state.early_stopped = true;
                    break 'copies;
                }
                self.beam_painter
                    .paint(surface, &self.origin, local, rng, drawn);
            }
            self.origin.rotate_degrees(step);
        }
        self.origin.pop();
    }

    fn outcome(
        &self,
        frame: Option<FrameIndex>,
        star_points: u64,
        beam_points: u64,
        scattered: bool,
    ) -> TickOutcome {
        TickOutcome {
            frame,
            star_points,
            beam_points,
            scattered,
            phase: self.phase,
        }
    }
}

fn in_extent(p: Point, w: f64, h: f64) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.x < w && p.y < h
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
