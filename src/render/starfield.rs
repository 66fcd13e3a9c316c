use crate::foundation::color::Hsba;
use crate::foundation::core::{Point, Rgba8Premul};
use crate::foundation::error::StarbeamsResult;
use crate::random::RandomSource;
use crate::render::painter::STROKE_WEIGHT;
use crate::render::surface::{DrawSurface, Surface};

/// Background stars per buffer pixel.
pub const STAR_DENSITY: f64 = 0.0025;
/// Share of background stars drawn grey; the rest are blue.
pub const GREY_SHARE: f64 = 0.9;

/// Number of background stars for a buffer.
pub fn star_count(width: u32, height: u32) -> u64 {
    (f64::from(width) * f64::from(height) * STAR_DENSITY).floor() as u64
}

/// Paint the static night sky: black, a translucent dark-blue wash, then scattered stars.
///
/// Returns the number of stars drawn. Two uniform draws per star (position) plus one for its
/// brightness.
#[tracing::instrument(skip_all)]
pub fn draw_starfield<R: RandomSource>(
    surface: &mut Surface,
    rng: &mut R,
) -> StarbeamsResult<u64> {
    surface.clear(Rgba8Premul::black());
    surface.fill(Hsba::new(240.0, 80.0, 10.0, 0.8));

    let canvas = surface.canvas();
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let count = star_count(canvas.width, canvas.height);
    let grey_until = count as f64 * GREY_SHARE;

    for i in 0..count {
        let x = rng.range(0.0, w);
        let y = rng.range(0.0, h);
        let color = if (i as f64) < grey_until {
            Hsba::new(0.0, 0.0, rng.range(10.0, 70.0), 0.9)
        } else {
            Hsba::new(240.0, 90.0, rng.range(25.0, 70.0), 0.9)
        };
        surface.draw_point(Point::new(x, y), STROKE_WEIGHT, color);
    }
    surface.flush()?;

    tracing::debug!(stars = count, "starfield drawn");
    Ok(count)
}

#[cfg(test)]
#[path = "../../tests/unit/render/starfield.rs"]
mod tests;
