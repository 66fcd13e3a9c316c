use super::*;
use crate::foundation::core::Canvas;
use crate::random::SplitMix64;

#[derive(Default)]
struct Recorder {
    points: Vec<(Point, Hsba)>,
}

impl DrawSurface for Recorder {
    fn canvas(&self) -> Canvas {
        Canvas {
            width: 100,
            height: 100,
        }
    }

    fn fill(&mut self, _color: Hsba) {}

    fn draw_point(&mut self, at: Point, _weight: f64, color: Hsba) {
        self.points.push((at, color));
    }

    fn flush(&mut self) -> crate::StarbeamsResult<()> {
        Ok(())
    }
}

#[test]
fn beam_fades_from_bright_to_faint() {
    let p = PointPainter::beam(30.0, 100.0, 1.0);
    assert_eq!(p.color_at(0.0).b, 100.0);
    assert!(p.color_at(50.0).b > p.color_at(100.0).b);
    assert_eq!(p.color_at(500.0).b, 0.0);
    assert_eq!(p.color_at(10.0).a, 0.9);
}

#[test]
fn star_fade_is_floored() {
    let p = PointPainter::star_ray(300.0, 100.0, 1.0);
    assert!((p.color_at(0.0).b - 90.0).abs() < 1e-9);
    assert!((p.color_at(50.0).b - 36.0).abs() < 1e-9);
    assert!((p.color_at(5_000.0).b - 36.0).abs() < 1e-9);
}

#[test]
fn jitter_grows_with_distance_and_is_bounded() {
    let law = PointPainter::beam(0.0, 100.0, 1.0).jitter;
    assert!((law.amplitude(0.0) - 2.4).abs() < 1e-9);
    assert!(law.amplitude(55.0) > law.amplitude(0.0));
    assert_eq!(law.amplitude(10_000.0), law.max_amplitude);
    assert_eq!(law.amplitude(f64::NAN), 0.0);
}

#[test]
fn uniform_and_mirrored_jitter_signs() {
    let local = Point::new(30.0, 40.0);
    let uniform = PointPainter::beam(0.0, 100.0, 1.0);
    let mirrored = PointPainter::beam(0.0, 100.0, -1.0);

    let a = uniform.jittered(local, &mut SplitMix64::new(9));
    let b = mirrored.jittered(local, &mut SplitMix64::new(9));
    let off = a.x - local.x;
    assert!((a.y - local.y - off).abs() < 1e-9);
    assert!((b.x - a.x).abs() < 1e-9);
    assert!((b.y - (local.y - off)).abs() < 1e-9);
}

#[test]
fn paint_counts_once_and_applies_transform() {
    let p = PointPainter::beam(0.0, 100.0, 1.0);
    let mut surface = Recorder::default();
    let mut rng = SplitMix64::new(3);
    let mut drawn = 0u64;
    let mut shift = TransformStack::new();
    shift.translate(crate::Vec2::new(50.0, 50.0));
    p.paint(&mut surface, &shift, Point::new(0.0, 0.0), &mut rng, &mut drawn);
    assert_eq!(drawn, 1);
    let (at, _) = surface.points[0];
    // Jitter at the center is at most 2.4px on each axis.
    assert!((at.x - 50.0).abs() <= 2.4 + 1e-9);
    assert!((at.y - 50.0).abs() <= 2.4 + 1e-9);
}
