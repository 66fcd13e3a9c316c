//! Geometry, colors, errors and small numeric helpers shared by every module.

/// Canvas sizes, frame indices and pixel types.
pub mod core;
/// Error type and result alias.
pub mod error;
/// HSB color model.
pub mod color;
pub(crate) mod math;
