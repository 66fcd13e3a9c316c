/// Named color scheme: one hue for the star rays, one for the beam fan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Palette {
    /// Red star, yellow beams.
    RedDwarf,
    /// Red star, orange beams.
    OrangeDwarf,
    /// Orange-red star, yellow beams.
    IntoTheMatrix,
    /// Orange-red star, orange beams.
    TheCore,
    /// Orange star, yellow beams.
    Burning,
    /// Yellow star and beams.
    ASummerDay,
    /// Azure star, yellow beams.
    TheVastUniverse,
    /// Azure star, orange beams.
    Expanding,
    /// Blue star, yellow beams.
    Neptune,
    /// Blue star, orange-red beams.
    ShiningBright,
    /// Blue star, orange beams.
    Gold,
    /// Magenta star, yellow beams.
    WildAndFurious,
    /// Magenta star, orange beams.
    Nebula,
    /// Rose star, yellow beams.
    ForeverAndEver,
    /// Rose star, orange beams.
    IsItReal,
}

impl Palette {
    /// Every palette in draw-table order. Reordering changes which palette a seed selects.
    pub const ALL: [Palette; 15] = [
        Palette::RedDwarf,
        Palette::OrangeDwarf,
        Palette::IntoTheMatrix,
        Palette::TheCore,
        Palette::Burning,
        Palette::ASummerDay,
        Palette::TheVastUniverse,
        Palette::Expanding,
        Palette::Neptune,
        Palette::ShiningBright,
        Palette::Gold,
        Palette::WildAndFurious,
        Palette::Nebula,
        Palette::ForeverAndEver,
        Palette::IsItReal,
    ];

    /// Display name, as published in the feature labels.
    pub fn name(self) -> &'static str {
        match self {
            Palette::RedDwarf => "Red dwarf",
            Palette::OrangeDwarf => "Orange dwarf",
            Palette::IntoTheMatrix => "Into the matrix",
            Palette::TheCore => "The core",
            Palette::Burning => "Burning",
            Palette::ASummerDay => "A summer day",
            Palette::TheVastUniverse => "The vast universe",
            Palette::Expanding => "Expanding",
            Palette::Neptune => "Neptune",
            Palette::ShiningBright => "Shining bright",
            Palette::Gold => "Gold",
            Palette::WildAndFurious => "Wild and furious",
            Palette::Nebula => "Nebula",
            Palette::ForeverAndEver => "Forever and ever",
            Palette::IsItReal => "Is it real",
        }
    }

    /// `(star hue, beam hue)` in degrees.
    pub fn hues(self) -> (f64, f64) {
        match self {
            Palette::RedDwarf => (0.0, 45.0),
            Palette::OrangeDwarf => (0.0, 30.0),
            Palette::IntoTheMatrix => (15.0, 45.0),
            Palette::TheCore => (15.0, 30.0),
            Palette::Burning => (30.0, 45.0),
            Palette::ASummerDay => (45.0, 45.0),
            Palette::TheVastUniverse => (215.0, 45.0),
            Palette::Expanding => (215.0, 30.0),
            Palette::Neptune => (240.0, 45.0),
            Palette::ShiningBright => (240.0, 15.0),
            Palette::Gold => (240.0, 30.0),
            Palette::WildAndFurious => (300.0, 45.0),
            Palette::Nebula => (300.0, 30.0),
            Palette::ForeverAndEver => (330.0, 45.0),
            Palette::IsItReal => (330.0, 30.0),
        }
    }

    /// Hue used by the star rays.
    pub fn star_hue(self) -> f64 {
        self.hues().0
    }

    /// Hue used by the beam fan.
    pub fn beam_hue(self) -> f64 {
        self.hues().1
    }

    /// Look a palette up by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl std::fmt::Display for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/palette.rs"]
mod tests;
