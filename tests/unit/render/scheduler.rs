use super::*;
use crate::foundation::color::Hsba;
use crate::random::SplitMix64;
use crate::scene::palette::Palette;
use crate::scene::params::{VariantOpts, star_points_for};

#[derive(Default)]
struct Recorder {
    points: Vec<Point>,
    flushes: u32,
}

impl DrawSurface for Recorder {
    fn canvas(&self) -> Canvas {
        buffer()
    }

    fn fill(&mut self, _color: Hsba) {}

    fn draw_point(&mut self, at: Point, _weight: f64, _color: Hsba) {
        self.points.push(at);
    }

    fn flush(&mut self) -> StarbeamsResult<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Every draw lands mid-range, so jitter offsets are exactly zero.
struct Midpoint;

impl RandomSource for Midpoint {
    fn next_f64(&mut self) -> f64 {
        0.5
    }
}

fn buffer() -> Canvas {
    Canvas::new(200, 200).unwrap()
}

// With a 200px buffer the beam length is 100 and these offsets keep every sample in extent.
fn scene(has_star: bool, end_y_offset: f64) -> SceneParameters {
    SceneParameters {
        palette: Palette::Nebula,
        has_star,
        has_beams: true,
        beam_count: 4,
        beam_point_budget: 2048,
        star_repeat: 512,
        star_ray_length_factor: 0.2,
        star_point_budget: star_points_for(0.2),
        start_offset: 0.25,
        end_x_offset: 1.0,
        end_y_offset,
        scatter_enabled: false,
        scatter_factor: 2,
        variant: VariantOpts::default(),
    }
}

fn scheduler<R: RandomSource>(params: SceneParameters, rng: &mut R) -> FrameScheduler {
    FrameScheduler::new(params, SchedulerOpts::default(), buffer(), rng).unwrap()
}

#[test]
fn batch_ranges_tile_the_budget() {
    for total in [0u32, 1, 89, 90, 2047, 4095] {
        let mut next = 0;
        for k in 1..=90 {
            let r = batch_range(k, 90, total);
            assert_eq!(r.start, next);
            next = r.end;
        }
        assert_eq!(next, total);
    }
    assert!(batch_range(0, 90, 100).is_empty());
    assert!(batch_range(91, 90, 100).is_empty());
}

#[test]
fn full_run_draws_every_budgeted_point() {
    let params = scene(true, 1.5);
    assert_eq!(params.star_size_class().label(), "Big");
    let mut rng = SplitMix64::new(1);
    let mut s = scheduler(params.clone(), &mut rng);
    let mut surface = Recorder::default();

    assert_eq!(s.total_frames(), 150);
    for _ in 0..150 {
        s.tick(&mut surface, &mut rng).unwrap();
    }

    let st = s.state();
    assert_eq!(s.phase(), SchedulerPhase::Finalizing);
    assert!(!st.early_stopped);
    assert_eq!(st.frame_index, FrameIndex(150));
    assert_eq!(st.star_points_drawn, params.star_points_total());
    assert_eq!(st.beam_points_drawn, params.beam_points_total());
    assert_eq!(
        st.points_drawn_total,
        params.star_points_total() + params.beam_points_total()
    );
    assert_eq!(surface.points.len() as u64, st.points_drawn_total);
    assert_eq!(surface.flushes, 150);
}

#[test]
fn frame_index_advances_by_one_until_terminal() {
    let mut rng = SplitMix64::new(2);
    let mut s = scheduler(scene(false, 1.5), &mut rng);
    let mut surface = Recorder::default();
    assert_eq!(s.phase(), SchedulerPhase::Initializing);

    for expected in 1..=90u64 {
        let out = s.tick(&mut surface, &mut rng).unwrap();
        assert_eq!(out.frame, Some(FrameIndex(expected)));
        assert_eq!(out.star_points, 0);
    }
    assert!(s.phase().is_terminal());

    let before = *s.state();
    let out = s.tick(&mut surface, &mut rng).unwrap();
    assert_eq!(out.frame, None);
    assert_eq!(*s.state(), before);
}

#[test]
fn star_frames_come_first() {
    let mut rng = SplitMix64::new(3);
    let mut s = scheduler(scene(true, 1.5), &mut rng);
    let mut surface = Recorder::default();

    let first = s.tick(&mut surface, &mut rng).unwrap();
    assert_eq!(first.phase, SchedulerPhase::RenderingStar);
    assert!(first.star_points > 0);
    assert_eq!(first.beam_points, 0);

    for _ in 1..60 {
        s.tick(&mut surface, &mut rng).unwrap();
    }
    let beam = s.tick(&mut surface, &mut rng).unwrap();
    assert_eq!(beam.phase, SchedulerPhase::RenderingBeams);
    assert_eq!(beam.star_points, 0);
    assert!(beam.beam_points > 0);
}

#[test]
fn out_of_extent_beam_stops_for_good() {
    let mut rng = SplitMix64::new(4);
    let mut s = scheduler(scene(false, 5.0), &mut rng);
    let mut surface = Recorder::default();

    while !s.phase().is_terminal() {
        s.tick(&mut surface, &mut rng).unwrap();
    }
    let st = *s.state();
    assert!(st.early_stopped);
    assert!(st.frame_index.0 < 90);
    assert!(st.beam_points_drawn < scene(false, 5.0).beam_points_total());

    for _ in 0..5 {
        let out = s.tick(&mut surface, &mut rng).unwrap();
        assert_eq!(out.beam_points, 0);
    }
    assert_eq!(s.state().points_drawn_total, st.points_drawn_total);
    assert_eq!(surface.points.len() as u64, st.points_drawn_total);
}

#[test]
fn non_finite_offsets_are_rejected_before_drawing() {
    let mut params = scene(false, 1.5);
    params.end_x_offset = f64::NAN;
    let mut rng = SplitMix64::new(5);
    assert!(FrameScheduler::new(params, SchedulerOpts::default(), buffer(), &mut rng).is_err());
}

#[test]
fn non_finite_samples_fail_the_extent_check() {
    assert!(!in_extent(Point::new(f64::NAN, 0.0), 10.0, 10.0));
    assert!(!in_extent(Point::new(f64::NEG_INFINITY, 0.0), 10.0, 10.0));
    assert!(!in_extent(Point::new(0.0, 10.0), 10.0, 10.0));
    assert!(in_extent(Point::new(-50.0, 9.9), 10.0, 10.0));
}

#[test]
fn scatter_skips_every_nth_beam_frame() {
    let mut params = scene(false, 1.5);
    params.scatter_enabled = true;
    params.scatter_factor = 3;
    let mut rng = SplitMix64::new(6);
    let mut s = scheduler(params.clone(), &mut rng);
    let mut surface = Recorder::default();

    let mut skipped = 0;
    let mut expected = 0u64;
    for k in 1..=90u32 {
        let out = s.tick(&mut surface, &mut rng).unwrap();
        assert_eq!(out.scattered, k % 3 == 0);
        if out.scattered {
            skipped += 1;
            assert_eq!(out.beam_points, 0);
        } else {
            expected += u64::from(params.beam_count) * batch_range(k, 90, 2048).len() as u64;
        }
    }
    assert_eq!(skipped, 30);
    assert_eq!(s.state().beam_points_drawn, expected);
    assert!(!s.state().early_stopped);
}

#[test]
fn finish_freezes_once() {
    let mut rng = SplitMix64::new(7);
    let mut s = scheduler(scene(false, 1.5), &mut rng);
    let mut surface = Recorder::default();
    assert!(!s.finish(10));

    while !s.phase().is_terminal() {
        s.tick(&mut surface, &mut rng).unwrap();
    }
    assert_eq!(s.progress(), 1.0);
    assert!(s.finish(42));
    assert!(!s.finish(43));
    assert_eq!(s.phase(), SchedulerPhase::Done);
    assert_eq!(s.state().execution_time_ms, Some(42));
}

#[test]
fn ray_lengths_are_drawn_once_per_copy() {
    let mut rng = SplitMix64::new(8);
    let s = scheduler(scene(true, 1.5), &mut rng);
    assert_eq!(s.ray_lengths().len(), 512);
    for &len in s.ray_lengths() {
        assert!((30.0..80.0).contains(&len), "{len}");
    }

    let mut rng = SplitMix64::new(8);
    let before = rng;
    let s = scheduler(scene(false, 1.5), &mut rng);
    assert!(s.ray_lengths().is_empty());
    assert_eq!(rng, before);
}

#[test]
fn zero_iteration_budgets_are_rejected() {
    let mut rng = SplitMix64::new(9);
    let opts = SchedulerOpts {
        star_iterations: 0,
        beam_iterations: 90,
    };
    assert!(FrameScheduler::new(scene(true, 1.5), opts, buffer(), &mut rng).is_err());
}

fn angle_about_center(p: Point) -> f64 {
    let c = buffer().center();
    (p.y - c.y).atan2(p.x - c.x).to_degrees()
}

// Copy `i` of a batch of `per_copy` points per copy must sit `i * step` degrees past copy 0.
fn assert_copies_turn_by(points: &[Point], per_copy: usize, copies: usize, step: f64) {
    assert_eq!(points.len(), per_copy * copies);
    let a0 = angle_about_center(points[0]);
    for i in 0..copies {
        let a = angle_about_center(points[i * per_copy]);
        let off = (a - a0 - i as f64 * step).rem_euclid(360.0);
        assert!(off < 1e-6 || off > 360.0 - 1e-6, "copy {i}: {a} vs {a0}");
    }
}

#[test]
fn beam_copies_are_drawn_in_increasing_angle() {
    let mut rng = Midpoint;
    let mut s = scheduler(scene(false, 1.5), &mut rng);
    let mut surface = Recorder::default();

    let out = s.tick(&mut surface, &mut rng).unwrap();
    let per_copy = batch_range(1, 90, 2048).len();
    assert_eq!(out.beam_points, 4 * per_copy as u64);
    assert_copies_turn_by(&surface.points, per_copy, 4, 90.0);
}

#[test]
fn star_copies_are_spread_evenly_around_the_center() {
    let params = scene(true, 1.5);
    let n = params.star_point_budget;
    let mut rng = Midpoint;
    let mut s = scheduler(params, &mut rng);
    let mut surface = Recorder::default();

    // The last star frame samples near the ray tips, well away from the center.
    for _ in 1..60 {
        s.tick(&mut surface, &mut rng).unwrap();
    }
    surface.points.clear();
    let out = s.tick(&mut surface, &mut rng).unwrap();
    assert_eq!(out.phase, SchedulerPhase::RenderingStar);

    let per_copy = batch_range(60, 60, n).len();
    assert!(per_copy > 0);
    assert_copies_turn_by(&surface.points, per_copy, 512, 360.0 / 512.0);
}

#[test]
fn overflowing_curve_stops_on_the_first_sample() {
    let mut params = scene(false, 1.5);
    params.end_x_offset = 1e308;
    let mut rng = SplitMix64::new(10);
    let mut s = scheduler(params, &mut rng);
    let mut surface = Recorder::default();

    let out = s.tick(&mut surface, &mut rng).unwrap();
    assert_eq!(out.frame, Some(FrameIndex(1)));
    assert_eq!(out.beam_points, 0);
    assert_eq!(out.phase, SchedulerPhase::Finalizing);
    assert!(s.state().early_stopped);
    assert_eq!(s.state().points_drawn_total, 0);
    assert!(surface.points.is_empty());
}
