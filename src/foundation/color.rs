use crate::foundation::core::Rgba8Premul;

/// Hue/saturation/brightness color with alpha.
///
/// Ranges: hue in degrees `[0, 360)`, saturation and brightness in `[0, 100]`, alpha in `[0, 1]`.
/// Out-of-range inputs are wrapped (hue) or clamped (everything else) on conversion.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsba {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation, `0..=100`.
    pub s: f64,
    /// Brightness, `0..=100`.
    pub b: f64,
    /// Alpha, `0..=1`.
    pub a: f64,
}

impl Hsba {
    /// Build a color from its four components.
    pub fn new(h: f64, s: f64, b: f64, a: f64) -> Self {
        Self { h, s, b, a }
    }

    /// Straight-alpha RGB in `[0, 1]`.
    pub fn to_rgb(self) -> [f64; 3] {
        let h = (self.h % 360.0 + 360.0) % 360.0 / 60.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let v = (self.b / 100.0).clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
        let m = v - c;

        // `h` is in [0, 6); the cast picks the sextant.
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        [r + m, g + m, b + m]
    }

    /// Convert to premultiplied RGBA8.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let a = if self.a.is_finite() {
            self.a.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let [r, g, b] = self.to_rgb();
        Rgba8Premul {
            r: to_u8(r * a),
            g: to_u8(g * a),
            b: to_u8(b * a),
            a: to_u8(a),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
