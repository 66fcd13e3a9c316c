//! What an artwork looks like: parameters derived from the seed and their human-readable labels.

/// Derived labels published to the feature indexer.
pub mod features;
/// Named hue pairs.
pub mod palette;
/// Seed-derived structural parameters.
pub mod params;
