use super::*;

fn close(a: [f64; 3], b: [f64; 3]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
}

#[test]
fn primary_hues_convert() {
    assert!(close(Hsba::new(0.0, 100.0, 100.0, 1.0).to_rgb(), [1.0, 0.0, 0.0]));
    assert!(close(Hsba::new(120.0, 100.0, 100.0, 1.0).to_rgb(), [0.0, 1.0, 0.0]));
    assert!(close(Hsba::new(240.0, 100.0, 100.0, 1.0).to_rgb(), [0.0, 0.0, 1.0]));
    // Hue wraps.
    assert!(close(Hsba::new(-120.0, 100.0, 100.0, 1.0).to_rgb(), [0.0, 0.0, 1.0]));
}

#[test]
fn zero_saturation_is_grey() {
    let [r, g, b] = Hsba::new(300.0, 0.0, 50.0, 1.0).to_rgb();
    assert!((r - 0.5).abs() < 1e-9);
    assert_eq!(r, g);
    assert_eq!(g, b);
}

#[test]
fn premultiplies_and_clamps() {
    let c = Hsba::new(0.0, 100.0, 100.0, 0.5).to_rgba8_premul();
    assert_eq!(c.to_array(), [128, 0, 0, 128]);

    let c = Hsba::new(0.0, 100.0, 250.0, 3.0).to_rgba8_premul();
    assert_eq!(c.to_array(), [255, 0, 0, 255]);

    let c = Hsba::new(0.0, 100.0, 100.0, f64::NAN).to_rgba8_premul();
    assert_eq!(c.a, 0);
}
