//! Deterministic uniform randomness.
//!
//! Everything random in an artwork flows from a single [`RandomSource`] seeded once per run, so a
//! seed fully determines the output.

use crate::foundation::math::Fnv1a64;

/// A deterministic uniform sampler.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Next uniform value in `[min, max)`.
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    /// Pick one element uniformly. Returns `None` for an empty slice without consuming a value.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let i = (self.next_f64() * items.len() as f64).floor() as usize;
        items.get(i.min(items.len() - 1))
    }
}

/// SplitMix64 generator with 53-bit float output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Seed the generator.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed the generator from a [`Seed`].
    pub fn from_seed(seed: &Seed) -> Self {
        Self::new(seed.state())
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for SplitMix64 {
    fn next_f64(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

/// Externally supplied run identifier.
///
/// The textual form names exported files; the hashed form seeds the generator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Seed {
    text: String,
    state: u64,
}

impl Seed {
    /// Build a seed from any identifier, e.g. a transaction hash.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut h = Fnv1a64::new_default();
        h.write_bytes(text.as_bytes());
        Self {
            state: h.finish(),
            text,
        }
    }

    /// Build a seed from the wall clock, for runs without an explicit identifier.
    pub fn from_clock() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        Self::new(format!("{nanos:x}"))
    }

    /// The identifier as supplied.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Generator state derived from the identifier.
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
#[path = "../tests/unit/random.rs"]
mod tests;
