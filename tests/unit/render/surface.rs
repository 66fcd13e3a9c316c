use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn new_surface_is_transparent_and_sized() {
    let s = Surface::new(canvas(8, 4)).unwrap();
    assert_eq!(s.data().len(), 8 * 4 * 4);
    assert!(s.data().iter().all(|b| *b == 0));
    assert_eq!(s.pixel(7, 3), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(8, 0), None);
    assert!(Surface::new(Canvas { width: 0, height: 4 }).is_err());
}

#[test]
fn opaque_point_covers_its_center_pixel() {
    let mut s = Surface::new(canvas(11, 11)).unwrap();
    let red = Hsba::new(0.0, 100.0, 100.0, 1.0);
    s.draw_point(Point::new(5.5, 5.5), 2.0, red);
    // Recorded, not yet rasterized.
    assert_eq!(s.pixel(5, 5), Some([0, 0, 0, 0]));
    s.flush().unwrap();

    let center = s.pixel(5, 5).unwrap();
    assert!(center[0] >= 254 && center[3] >= 254, "{center:?}");
    assert_eq!((center[1], center[2]), (0, 0));
    // Neighbors get partial coverage, far pixels none.
    let edge = s.pixel(6, 5).unwrap();
    assert!(edge[3] > 0 && edge[3] < 255);
    assert_eq!(s.pixel(9, 9), Some([0, 0, 0, 0]));
}

#[test]
fn points_outside_or_non_finite_are_clipped() {
    let mut s = Surface::new(canvas(4, 4)).unwrap();
    let white = Hsba::new(0.0, 0.0, 100.0, 1.0);
    s.draw_point(Point::new(-50.0, 2.0), 2.0, white);
    s.draw_point(Point::new(2.0, 400.0), 2.0, white);
    s.draw_point(Point::new(f64::NAN, 2.0), 2.0, white);
    s.draw_point(Point::new(1e300, -1e300), 2.0, white);
    s.flush().unwrap();
    assert!(s.data().iter().all(|b| *b == 0));
}

#[test]
fn fill_blends_and_clear_overwrites() {
    let mut s = Surface::new(canvas(2, 2)).unwrap();
    s.clear(Rgba8Premul::black());
    s.fill(Hsba::new(0.0, 0.0, 100.0, 0.5));
    s.flush().unwrap();
    let px = s.pixel(1, 1).unwrap();
    assert_eq!(px[3], 255);
    assert!((127..=129).contains(&px[0]), "{px:?}");
    assert_eq!((px[0], px[0]), (px[1], px[2]));

    s.fill(Hsba::new(0.0, 0.0, 100.0, 1.0));
    s.clear(Rgba8Premul::transparent());
    s.flush().unwrap();
    assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn flush_composites_in_drawing_order() {
    let mut s = Surface::new(canvas(6, 6)).unwrap();
    s.clear(Rgba8Premul::black());
    s.draw_point(Point::new(3.0, 3.0), 4.0, Hsba::new(0.0, 100.0, 100.0, 1.0));
    s.draw_point(Point::new(3.0, 3.0), 4.0, Hsba::new(240.0, 100.0, 100.0, 1.0));
    s.flush().unwrap();
    let px = s.pixel(2, 2).unwrap();
    assert!(px[2] >= 254 && px[0] <= 1, "{px:?}");

    // A second batch lands over the first.
    s.fill(Hsba::new(120.0, 100.0, 100.0, 1.0));
    s.flush().unwrap();
    assert!(s.data().chunks_exact(4).all(|p| p[1] >= 254 && p[2] <= 1));
    // Nothing recorded: flushing again is a no-op.
    let before = s.data().to_vec();
    s.flush().unwrap();
    assert_eq!(s.data(), &before[..]);
}

#[test]
fn draw_surface_requires_matching_sizes() {
    let mut a = Surface::new(canvas(2, 2)).unwrap();
    let mut b = Surface::new(canvas(2, 2)).unwrap();
    b.clear(Rgba8Premul::from_straight_rgba(0, 255, 0, 255));
    a.draw_surface(&b).unwrap();
    assert_eq!(a.pixel(0, 0), Some([0, 255, 0, 255]));

    let c = Surface::new(canvas(3, 2)).unwrap();
    assert!(a.draw_surface(&c).is_err());
}

#[test]
fn transform_stack_translates_rotates_and_restores() {
    let mut t = TransformStack::new();
    t.push();
    t.translate(Vec2::new(10.0, 10.0));
    t.rotate_degrees(90.0);
    let p = t.apply(Point::new(1.0, 0.0));
    assert!((p.x - 10.0).abs() < 1e-9);
    assert!((p.y - 11.0).abs() < 1e-9);
    t.pop();
    assert_eq!(t.apply(Point::new(1.0, 0.0)), Point::new(1.0, 0.0));
}
