use crate::foundation::core::Point;
use kurbo::{CubicBez, ParamCurve};

/// Evaluate the cubic Bezier `p0..p3` at `t`.
///
/// `t` is not clamped; values outside `[0, 1]` extrapolate along the polynomial.
pub fn sample(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    CubicBez::new(p0, p1, p2, p3).eval(t)
}

/// Near-straight radiating ray of `length`, starting `start_offset * length` behind the origin.
///
/// Control points are collinear on the diagonal `x == y`, so the returned point always has
/// equal coordinates.
pub fn sample_radial(start_offset: f64, length: f64, t: f64) -> Point {
    let c = [-length * start_offset, 0.0, 0.0, length];
    let v = bezier_scalar(c, t);
    Point::new(v, v)
}

/// One-dimensional cubic Bezier, matching the per-axis form of [`sample`].
pub fn bezier_scalar(c: [f64; 4], t: f64) -> f64 {
    let mt = 1.0 - t;
    c[0] * mt * mt * mt + 3.0 * c[1] * mt * mt * t + 3.0 * c[2] * mt * t * t + c[3] * t * t * t
}

/// The curve every beam copy follows before rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeamCurve {
    bez: CubicBez,
}

impl BeamCurve {
    /// Beam of `length` whose origin is pulled back by `start_offset` and whose end is skewed by
    /// `(end_x_offset, end_y_offset)` beam lengths.
    pub fn new(length: f64, start_offset: f64, end_x_offset: f64, end_y_offset: f64) -> Self {
        let start = -length * start_offset;
        Self {
            bez: CubicBez::new(
                Point::new(start, start),
                Point::new(length, 0.0),
                Point::new(length, length),
                Point::new(length * end_x_offset, length * end_y_offset),
            ),
        }
    }

    /// Point at parameter `t`, unclamped.
    pub fn at(&self, t: f64) -> Point {
        self.bez.eval(t)
    }

    /// Underlying cubic.
    pub fn cubic(&self) -> CubicBez {
        self.bez
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/curve.rs"]
mod tests;
