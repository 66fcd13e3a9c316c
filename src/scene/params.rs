use crate::foundation::error::{StarbeamsError, StarbeamsResult};
use crate::foundation::math::map_range;
use crate::random::RandomSource;
use crate::scene::features::{FeatureLabels, FeatureValue};
use crate::scene::palette::Palette;

/// Beam counts; duplicates weight the draw.
pub const BEAM_COUNTS: [u32; 12] = [4, 4, 8, 16, 24, 32, 32, 48, 64, 64, 128, 128];
/// Number of rotated rays making up the star.
pub const STAR_REPEATS: [u32; 3] = [128, 256, 512];
/// Extra ray length, as a fraction of the buffer width.
pub const STAR_RAY_LENGTH_FACTORS: [f64; 6] = [0.0, 0.05, 0.1, 0.15, 0.2, 0.25];
/// Scatter thinning periods.
pub const SCATTER_FACTORS: [u32; 3] = [2, 3, 4];

/// Upper bound (exclusive) for the per-beam point budget.
pub const MAX_BEAM_POINT_BUDGET: f64 = 4096.0;
/// Uniform draws above this give the artwork a star (one seed in five).
pub const STAR_THRESHOLD: f64 = 0.8;
/// Probability that a seed gets scatter thinning, when the variant supports it.
pub const SCATTER_PROBABILITY: f64 = 0.25;

/// Range of the curve end x-offset, in multiples of the beam length.
pub const END_X_OFFSET_RANGE: (f64, f64) = (-3.0, 5.0);
/// Range of the curve end y-offset, in multiples of the beam length.
pub const END_Y_OFFSET_RANGE: (f64, f64) = (2.0, 5.0);

/// Sign applied to the y component of the positional jitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JitterMode {
    /// Offset both axes by the same amount: `(x + off, y + off)`.
    #[default]
    Uniform,
    /// Offset the y axis the opposite way: `(x + off, y - off)`.
    Mirrored,
}

impl JitterMode {
    /// Multiplier for the y offset.
    pub fn y_sign(self) -> f64 {
        match self {
            JitterMode::Uniform => 1.0,
            JitterMode::Mirrored => -1.0,
        }
    }
}

/// Feature switches distinguishing the sketch variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VariantOpts {
    /// Derive `scatter_enabled`/`scatter_factor` from the seed.
    pub scatter: bool,
    /// Keep the starfield on its own surface under the star/beam layer.
    pub dual_buffer: bool,
    /// Draw a progress bar over the visible blit.
    pub debug_overlay: bool,
    /// Jitter sign convention.
    pub jitter: JitterMode,
}

impl Default for VariantOpts {
    fn default() -> Self {
        Self {
            scatter: false,
            dual_buffer: true,
            debug_overlay: false,
            jitter: JitterMode::Uniform,
        }
    }
}

/// Star size, derived from the ray count and ray length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StarSizeClass {
    /// No star is drawn.
    None,
    /// Few, short rays.
    Small,
    /// Medium.
    Medium,
    /// Big.
    Big,
    /// Many long rays.
    Massive,
}

impl StarSizeClass {
    /// Classify a star. Pure function of its numeric parameters.
    pub fn classify(has_star: bool, repeat: u32, ray_length_factor: f64) -> Self {
        if !has_star {
            return StarSizeClass::None;
        }
        let len = ray_length_factor;
        if (repeat == 512 && len > 0.2) || (repeat == 256 && len == 0.25) {
            StarSizeClass::Massive
        } else if (repeat == 512 && len >= 0.1) || (repeat == 256 && len >= 0.15) {
            StarSizeClass::Big
        } else if repeat == 512
            || (repeat == 256 && len >= 0.1)
            || (repeat == 128 && len >= 0.15)
        {
            StarSizeClass::Medium
        } else {
            StarSizeClass::Small
        }
    }

    /// Interval `[lo, hi)` the curve start offset is drawn from.
    ///
    /// Bigger stars leave more negative space in the middle.
    pub fn start_offset_range(self) -> (f64, f64) {
        match self {
            StarSizeClass::Small => (0.03, 0.1),
            StarSizeClass::Medium => (0.1, 0.2),
            StarSizeClass::Big => (0.2, 0.3),
            StarSizeClass::Massive => (0.3, 0.4),
            StarSizeClass::None => (0.03, 0.4),
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            StarSizeClass::None => "No star",
            StarSizeClass::Small => "Small",
            StarSizeClass::Medium => "Medium",
            StarSizeClass::Big => "Big",
            StarSizeClass::Massive => "Massive",
        }
    }
}

/// How strongly the beams bend away from the radial direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Twistiness {
    /// `end_x_offset < -1.5`.
    Extreme,
    /// `-1.5 <= end_x_offset < 0.5`.
    High,
    /// `0.5 <= end_x_offset < 4.5`.
    Moderate,
    /// `end_x_offset >= 4.5`.
    Low,
}

impl Twistiness {
    /// Classify from the curve end x-offset; lower values give more angled lines.
    pub fn classify(end_x_offset: f64) -> Self {
        if end_x_offset < -1.5 {
            Twistiness::Extreme
        } else if end_x_offset < 0.5 {
            Twistiness::High
        } else if end_x_offset < 4.5 {
            Twistiness::Moderate
        } else {
            Twistiness::Low
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Twistiness::Extreme => "Extreme",
            Twistiness::High => "High",
            Twistiness::Moderate => "Moderate",
            Twistiness::Low => "Low",
        }
    }
}

/// Beam point density.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BeamDensity {
    /// Fewer than 1024 points per beam.
    Light,
    /// Fewer than 2048 points per beam.
    Medium,
    /// 2048 points per beam or more.
    Dense,
}

impl BeamDensity {
    /// Classify from the per-beam point budget.
    pub fn classify(beam_point_budget: u32) -> Self {
        if beam_point_budget < 1024 {
            BeamDensity::Light
        } else if beam_point_budget < 2048 {
            BeamDensity::Medium
        } else {
            BeamDensity::Dense
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            BeamDensity::Light => "Light",
            BeamDensity::Medium => "Medium",
            BeamDensity::Dense => "Dense",
        }
    }
}

/// Structural parameters of one artwork. Immutable once derived.
///
/// Labels ([`StarSizeClass`], [`Twistiness`], [`BeamDensity`]) are not stored: they are recomputed
/// from the numeric fields on demand, so they can never drift from them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneParameters {
    /// Color scheme.
    pub palette: Palette,
    /// Whether the radiating star is drawn.
    pub has_star: bool,
    /// Whether the beam fan is drawn. Always true for derived scenes.
    pub has_beams: bool,
    /// Number of rotated beam copies.
    pub beam_count: u32,
    /// Points sampled along each beam over the whole animation.
    pub beam_point_budget: u32,
    /// Number of rotated star rays.
    pub star_repeat: u32,
    /// Extra ray length as a fraction of the buffer width.
    pub star_ray_length_factor: f64,
    /// Points sampled along each star ray over the whole animation.
    pub star_point_budget: u32,
    /// Fraction of the beam length left empty at the curve origin.
    pub start_offset: f64,
    /// Curve end x-offset, in beam lengths.
    pub end_x_offset: f64,
    /// Curve end y-offset, in beam lengths.
    pub end_y_offset: f64,
    /// Whether every `scatter_factor`-th beam frame is skipped.
    pub scatter_enabled: bool,
    /// Beam frame thinning period.
    pub scatter_factor: u32,
    /// Variant switches the scene was derived under.
    pub variant: VariantOpts,
}

impl SceneParameters {
    /// Derive the parameters for one artwork.
    ///
    /// Draw order is fixed: palette, beam count, beam density, star flag, star repeat, ray
    /// length, end x/y offsets, start offset, then the scatter pair when the variant has it.
    /// Changing the order changes every artwork.
    #[tracing::instrument(skip(rng))]
    pub fn derive<R: RandomSource>(rng: &mut R, variant: VariantOpts) -> StarbeamsResult<Self> {
        let palette = *pick(rng, &Palette::ALL, "palette")?;
        let beam_count = *pick(rng, &BEAM_COUNTS, "beam count")?;
        let beam_point_budget = ((rng.next_f64() * MAX_BEAM_POINT_BUDGET).floor() as u32).max(1);

        let has_star = rng.next_f64() > STAR_THRESHOLD;
        let star_repeat = *pick(rng, &STAR_REPEATS, "star repeat")?;
        let star_ray_length_factor = *pick(rng, &STAR_RAY_LENGTH_FACTORS, "star ray length")?;
        let star_point_budget = star_points_for(star_ray_length_factor);

        let end_x_offset = rng.range(END_X_OFFSET_RANGE.0, END_X_OFFSET_RANGE.1);
        let end_y_offset = rng.range(END_Y_OFFSET_RANGE.0, END_Y_OFFSET_RANGE.1);

        let (lo, hi) =
            StarSizeClass::classify(has_star, star_repeat, star_ray_length_factor)
                .start_offset_range();
        let start_offset = rng.range(lo, hi);

        let (scatter_enabled, scatter_factor) = if variant.scatter {
            let enabled = rng.next_f64() < SCATTER_PROBABILITY;
            let factor = *pick(rng, &SCATTER_FACTORS, "scatter factor")?;
            (enabled, factor)
        } else {
            (false, SCATTER_FACTORS[0])
        };

        Ok(Self {
            palette,
            has_star,
            has_beams: true,
            beam_count,
            beam_point_budget,
            star_repeat,
            star_ray_length_factor,
            star_point_budget,
            start_offset,
            end_x_offset,
            end_y_offset,
            scatter_enabled,
            scatter_factor,
            variant,
        })
    }

    /// Check hand-built or deserialized parameters against the derivation ranges.
    pub fn validate(&self) -> StarbeamsResult<()> {
        if self.beam_count == 0 {
            return Err(StarbeamsError::validation("beam_count must be > 0"));
        }
        if self.star_repeat == 0 {
            return Err(StarbeamsError::validation("star_repeat must be > 0"));
        }
        if self.scatter_factor == 0 {
            return Err(StarbeamsError::validation("scatter_factor must be > 0"));
        }
        for (name, v) in [
            ("star_ray_length_factor", self.star_ray_length_factor),
            ("start_offset", self.start_offset),
            ("end_x_offset", self.end_x_offset),
            ("end_y_offset", self.end_y_offset),
        ] {
            if !v.is_finite() {
                return Err(StarbeamsError::validation(format!(
                    "{name} must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Derived star size.
    pub fn star_size_class(&self) -> StarSizeClass {
        StarSizeClass::classify(self.has_star, self.star_repeat, self.star_ray_length_factor)
    }

    /// Derived beam twistiness.
    pub fn twistiness(&self) -> Twistiness {
        Twistiness::classify(self.end_x_offset)
    }

    /// Derived beam density.
    pub fn beam_density(&self) -> BeamDensity {
        BeamDensity::classify(self.beam_point_budget)
    }

    /// Points the star contributes when fully drawn (zero without a star).
    pub fn star_points_total(&self) -> u64 {
        if !self.has_star {
            return 0;
        }
        u64::from(self.star_repeat) * u64::from(self.star_point_budget)
    }

    /// Points the beam fan contributes when fully drawn without early stop or scatter.
    pub fn beam_points_total(&self) -> u64 {
        if !self.has_beams {
            return 0;
        }
        u64::from(self.beam_count) * u64::from(self.beam_point_budget)
    }

    /// Human-readable summary published to the feature indexer.
    pub fn labels(&self) -> FeatureLabels {
        let mut labels = FeatureLabels::new();
        labels.insert("Color palette", FeatureValue::text(self.palette.name()));
        labels.insert("Has star", FeatureValue::Bool(self.has_star));
        labels.insert("Has beams", FeatureValue::Bool(self.has_beams));
        labels.insert("Star size", FeatureValue::text(self.star_size_class().label()));
        labels.insert("Beam count", FeatureValue::Int(i64::from(self.beam_count)));
        labels.insert("Beam density", FeatureValue::text(self.beam_density().label()));
        labels.insert("Twistiness", FeatureValue::text(self.twistiness().label()));
        if self.variant.scatter {
            let scatter = if self.scatter_enabled {
                FeatureValue::Int(i64::from(self.scatter_factor))
            } else {
                FeatureValue::text("None")
            };
            labels.insert("Scatter", scatter);
        }
        labels
    }
}

/// Points per star ray: `floor(map(len, 0, 0.25, 128, 512))`.
pub fn star_points_for(ray_length_factor: f64) -> u32 {
    map_range(ray_length_factor, 0.0, 0.25, 128.0, 512.0)
        .floor()
        .max(1.0) as u32
}

fn pick<'a, R: RandomSource, T>(
    rng: &mut R,
    items: &'a [T],
    what: &str,
) -> StarbeamsResult<&'a T> {
    rng.choose(items)
        .ok_or_else(|| StarbeamsError::validation(format!("{what} choice table is empty")))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/params.rs"]
mod tests;
