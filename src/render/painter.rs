use crate::foundation::color::Hsba;
use crate::foundation::core::Point;
use crate::foundation::math::map_range;
use crate::random::RandomSource;
use crate::render::surface::{DrawSurface, TransformStack};

/// Stroke weight shared by every motif, in buffer pixels.
pub const STROKE_WEIGHT: f64 = 2.0;

/// Linear brightness fade over the distance to the motif center.
///
/// `fade(d) = scale * map(d, 0, reference, near, far)`, then clamped to `[floor, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeLaw {
    /// Distance at which the fade reaches `far`.
    pub reference: f64,
    /// Fade at the center.
    pub near: f64,
    /// Fade at `reference`.
    pub far: f64,
    /// Post-map multiplier.
    pub scale: f64,
    /// Lowest fade ever returned.
    pub floor: f64,
}

impl FadeLaw {
    /// Fade factor at distance `d`.
    pub fn fade(&self, d: f64) -> f64 {
        (self.scale * map_range(d, 0.0, self.reference, self.near, self.far)).clamp(self.floor, 1.0)
    }
}

/// Positional jitter whose amplitude grows with the distance to the center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JitterLaw {
    /// Distance at which the amplitude reaches `scale * far`.
    pub reference: f64,
    /// Amplitude at the center, before `scale`.
    pub near: f64,
    /// Amplitude at `reference`, before `scale`.
    pub far: f64,
    /// Post-map multiplier.
    pub scale: f64,
    /// Hard upper bound on the amplitude.
    pub max_amplitude: f64,
    /// Multiplier for the y offset, `1.0` or `-1.0`.
    pub y_sign: f64,
}

impl JitterLaw {
    /// Amplitude at distance `d`, in `[0, max_amplitude]`.
    pub fn amplitude(&self, d: f64) -> f64 {
        let a = self.scale * map_range(d, 0.0, self.reference, self.near, self.far);
        if a.is_nan() {
            return 0.0;
        }
        a.clamp(0.0, self.max_amplitude)
    }
}

/// Fixed color components of a motif; brightness is modulated by the fade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Hue in degrees.
    pub hue: f64,
    /// Saturation, `0..=100`.
    pub saturation: f64,
    /// Brightness at fade 1, `0..=100`.
    pub brightness: f64,
    /// Alpha, `0..=1`.
    pub alpha: f64,
}

/// Colors, jitters and emits single curve samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointPainter {
    /// Base color.
    pub style: StrokeStyle,
    /// Distance fade.
    pub fade: FadeLaw,
    /// Distance jitter.
    pub jitter: JitterLaw,
}

impl PointPainter {
    /// Beam look: far is faint, near is bright. `width` is the buffer width.
    pub fn beam(hue: f64, width: f64, y_sign: f64) -> Self {
        let reference = width * 1.1;
        Self {
            style: StrokeStyle {
                hue,
                saturation: 80.0,
                brightness: 100.0,
                alpha: 0.9,
            },
            fade: FadeLaw {
                reference,
                near: 1.0,
                far: 0.0,
                scale: 1.2,
                floor: 0.0,
            },
            jitter: JitterLaw {
                reference,
                near: 2.0,
                far: 8.0,
                scale: 1.2,
                max_amplitude: 1.2 * 8.0,
                y_sign,
            },
        }
    }

    /// Star look: bright near the center, dimming outwards but never below 40%.
    pub fn star_ray(hue: f64, width: f64, y_sign: f64) -> Self {
        Self {
            style: StrokeStyle {
                hue,
                saturation: 90.0,
                brightness: 90.0,
                alpha: 0.6,
            },
            fade: FadeLaw {
                reference: width * 0.5,
                near: 1.0,
                far: 0.4,
                scale: 1.0,
                floor: 0.4,
            },
            jitter: JitterLaw {
                reference: width * 1.1,
                near: 2.0,
                far: 8.0,
                scale: 1.2,
                max_amplitude: 1.2 * 8.0,
                y_sign,
            },
        }
    }

    /// Color of a sample at `center_distance`.
    pub fn color_at(&self, center_distance: f64) -> Hsba {
        let fade = self.fade.fade(center_distance);
        Hsba::new(
            self.style.hue,
            self.style.saturation,
            self.style.brightness * fade,
            self.style.alpha,
        )
    }

    /// Jittered local position of `local`. Consumes exactly one uniform draw.
    pub fn jittered<R: RandomSource>(&self, local: Point, rng: &mut R) -> Point {
        let d = local.to_vec2().hypot();
        let off = self.jitter.amplitude(d) * rng.range(-1.0, 1.0);
        Point::new(local.x + off, local.y + off * self.jitter.y_sign)
    }

    /// Paint the local-space sample `local` through the current transform of `xf`, counting it
    /// in `drawn`.
    ///
    /// The center distance is measured in local space, before jitter.
    pub fn paint<S: DrawSurface, R: RandomSource>(
        &self,
        surface: &mut S,
        xf: &TransformStack,
        local: Point,
        rng: &mut R,
        drawn: &mut u64,
    ) {
        let color = self.color_at(local.to_vec2().hypot());
        let at = xf.apply(self.jittered(local, rng));
        surface.draw_point(at, STROKE_WEIGHT, color);
        *drawn = drawn.saturating_add(1);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
