//! Progressive CPU rendering of the starfield, star and beam fan.
//!
//! Points are painted into fixed-resolution [`surface::Surface`]s owned by the
//! [`compositor::Compositor`]; the [`scheduler::FrameScheduler`] decides how many land per frame.

pub(crate) mod composite;
/// Final fit of the buffers into the visible canvas.
pub mod compositor;
/// Cubic curve sampling.
pub mod curve;
/// Per-point color, fade and jitter.
pub mod painter;
/// Frame-driven drawing state machine.
pub mod scheduler;
/// Static night-sky background.
pub mod starfield;
/// Drawing surfaces and transforms.
pub mod surface;
