use kurbo::Shape;

use crate::foundation::color::Hsba;
use crate::foundation::core::{Affine, Canvas, Circle, Point, Rgba8Premul, Vec2};
use crate::foundation::error::{StarbeamsError, StarbeamsResult};
use crate::render::composite::over_in_place;

/// Primitive drawing operations the renderers consume.
///
/// Coordinates are buffer pixels with the origin in the top-left corner. Drawing may be recorded
/// and only land on the pixels at [`flush`](Self::flush).
pub trait DrawSurface {
    /// Fixed surface size.
    fn canvas(&self) -> Canvas;

    /// Source-over fill of the whole surface.
    fn fill(&mut self, color: Hsba);

    /// Round dot of diameter `weight` centered at `at`. Dots outside the surface are clipped.
    fn draw_point(&mut self, at: Point, weight: f64, color: Hsba);

    /// Composite everything drawn since the last flush onto the surface, in drawing order.
    fn flush(&mut self) -> StarbeamsResult<()>;
}

/// Fixed-resolution premultiplied RGBA8 surface.
///
/// Allocated once and never resized; the visible canvas size only affects [`crate::Compositor`]
/// blits. Fills and dots are recorded into a reused `vello_cpu` context, rasterized onto a
/// transparent layer at [`DrawSurface::flush`] and composited over the pixels.
pub struct Surface {
    pixmap: vello_cpu::Pixmap,
    canvas: Canvas,
    ctx: Option<vello_cpu::RenderContext>,
    layer: Option<vello_cpu::Pixmap>,
    recording: bool,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("canvas", &self.canvas)
            .field("recording", &self.recording)
            .finish_non_exhaustive()
    }
}

/// Copies the pixels only. Unflushed drawing stays with the original.
impl Clone for Surface {
    fn clone(&self) -> Self {
        let mut pixmap = vello_cpu::Pixmap::new(self.pixmap.width(), self.pixmap.height());
        pixmap
            .data_as_u8_slice_mut()
            .copy_from_slice(self.pixmap.data_as_u8_slice());
        Self {
            pixmap,
            canvas: self.canvas,
            ctx: None,
            layer: None,
            recording: false,
        }
    }
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(canvas: Canvas) -> StarbeamsResult<Self> {
        canvas.validate()?;
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| StarbeamsError::render("surface width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| StarbeamsError::render("surface height exceeds u16"))?;
        Ok(Self {
            pixmap: vello_cpu::Pixmap::new(w, h),
            canvas,
            ctx: None,
            layer: None,
            recording: false,
        })
    }

    /// Overwrite every pixel. Unflushed drawing is discarded.
    pub fn clear(&mut self, rgba: Rgba8Premul) {
        self.recording = false;
        let px = rgba.to_array();
        for dst in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }

    /// Source-over another surface of the same size onto this one.
    pub fn draw_surface(&mut self, src: &Surface) -> StarbeamsResult<()> {
        if src.canvas != self.canvas {
            return Err(StarbeamsError::render("draw_surface expects equal sizes"));
        }
        self.flush()?;
        over_in_place(self.pixmap.data_as_u8_slice_mut(), src.data())
    }

    /// Premultiplied RGBA8 bytes, row-major, as of the last flush.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Pixel at `(x, y)`, if inside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = ((y as usize) * (self.canvas.width as usize) + x as usize) * 4;
        let d = self.data();
        Some([d[i], d[i + 1], d[i + 2], d[i + 3]])
    }

    pub(crate) fn into_pixmap(self) -> vello_cpu::Pixmap {
        self.pixmap
    }

    fn ctx_mut(&mut self) -> &mut vello_cpu::RenderContext {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let ctx = self
            .ctx
            .get_or_insert_with(|| vello_cpu::RenderContext::new(w, h));
        if !self.recording {
            ctx.reset();
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.recording = true;
        }
        ctx
    }
}

impl DrawSurface for Surface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn fill(&mut self, color: Hsba) {
        let (w, h) = (f64::from(self.canvas.width), f64::from(self.canvas.height));
        let ctx = self.ctx_mut();
        ctx.set_paint(cpu_color(color));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
    }

    fn draw_point(&mut self, at: Point, weight: f64, color: Hsba) {
        if !at.x.is_finite() || !at.y.is_finite() {
            return;
        }
        let r = (weight * 0.5).max(0.5);
        let (w, h) = (f64::from(self.canvas.width), f64::from(self.canvas.height));
        if at.x + r < 0.0 || at.y + r < 0.0 || at.x - r > w || at.y - r > h {
            return;
        }

        let mut path = vello_cpu::kurbo::BezPath::new();
        for el in Circle::new(at, r).path_elements(0.1) {
            path.push(el);
        }
        let ctx = self.ctx_mut();
        ctx.set_paint(cpu_color(color));
        ctx.fill_path(&path);
    }

    fn flush(&mut self) -> StarbeamsResult<()> {
        if !self.recording {
            return Ok(());
        }
        self.recording = false;
        let Some(ctx) = self.ctx.as_mut() else {
            return Ok(());
        };
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let layer = self
            .layer
            .get_or_insert_with(|| vello_cpu::Pixmap::new(w, h));
        ctx.flush();
        ctx.render_to_pixmap(layer);
        over_in_place(self.pixmap.data_as_u8_slice_mut(), layer.data_as_u8_slice())
    }
}

/// Straight-alpha paint for `vello_cpu`, which premultiplies internally.
fn cpu_color(color: Hsba) -> vello_cpu::peniko::Color {
    fn to_u8(x: f64) -> u8 {
        if x.is_finite() {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        } else {
            0
        }
    }
    let [r, g, b] = color.to_rgb();
    vello_cpu::peniko::Color::from_rgba8(to_u8(r), to_u8(g), to_u8(b), to_u8(color.a))
}

/// Push/pop stack of 2D transforms, applied to local drawing coordinates.
#[derive(Clone, Debug)]
pub struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            current: Affine::IDENTITY,
            saved: Vec::new(),
        }
    }
}

impl TransformStack {
    /// Identity transform, empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the current transform.
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the last saved transform. Popping an empty stack resets to identity.
    pub fn pop(&mut self) {
        self.current = self.saved.pop().unwrap_or(Affine::IDENTITY);
    }

    /// Move the local origin.
    pub fn translate(&mut self, by: Vec2) {
        self.current = self.current * Affine::translate(by);
    }

    /// Rotate local axes clockwise on screen (y points down) by `degrees`.
    pub fn rotate_degrees(&mut self, degrees: f64) {
        self.current = self.current * Affine::rotate(degrees.to_radians());
    }

    /// Map a local point to surface coordinates.
    pub fn apply(&self, p: Point) -> Point {
        self.current * p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
