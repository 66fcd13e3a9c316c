use std::sync::Arc;

use crate::foundation::core::{Affine, Canvas, Rect};
use crate::foundation::error::{StarbeamsError, StarbeamsResult};
use crate::render::surface::{DrawSurface, Surface};

/// A rendered frame in CPU memory.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Copy a surface's pixels.
    pub fn from_surface(surface: &Surface) -> Self {
        let canvas = surface.canvas();
        Self {
            width: canvas.width,
            height: canvas.height,
            data: surface.data().to_vec(),
            premultiplied: true,
        }
    }
}

/// Height of the debug progress bar, as a fraction of the visible height.
const PROGRESS_BAR_HEIGHT: f64 = 0.01;

/// Owns the fixed-resolution drawing buffers and fits them into the visible canvas.
///
/// With `dual_buffer` the starfield lives on its own surface and the star/beam layer is
/// composited over it at blit time; otherwise both share one surface.
pub struct Compositor {
    buffer: Canvas,
    visible: Canvas,
    background: Option<Surface>,
    content: Surface,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("buffer", &self.buffer)
            .field("visible", &self.visible)
            .field("dual_buffer", &self.background.is_some())
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Allocate the buffers. They are never resized afterwards.
    pub fn new(buffer: Canvas, visible: Canvas, dual_buffer: bool) -> StarbeamsResult<Self> {
        visible.validate()?;
        let background = if dual_buffer {
            Some(Surface::new(buffer)?)
        } else {
            None
        };
        Ok(Self {
            buffer,
            visible,
            background,
            content: Surface::new(buffer)?,
            ctx: None,
        })
    }

    /// Fixed buffer size.
    pub fn buffer(&self) -> Canvas {
        self.buffer
    }

    /// Current visible canvas size.
    pub fn visible(&self) -> Canvas {
        self.visible
    }

    /// Whether the starfield has its own surface.
    pub fn is_dual_buffer(&self) -> bool {
        self.background.is_some()
    }

    /// Surface the static starfield is drawn on.
    pub fn background_mut(&mut self) -> &mut Surface {
        match self.background.as_mut() {
            Some(bg) => bg,
            None => &mut self.content,
        }
    }

    /// Surface the star and beams are drawn on.
    pub fn content_mut(&mut self) -> &mut Surface {
        &mut self.content
    }

    /// Background and content flattened into one buffer-sized surface.
    pub fn composed(&self) -> StarbeamsResult<Surface> {
        match &self.background {
            Some(bg) => {
                let mut out = bg.clone();
                out.draw_surface(&self.content)?;
                Ok(out)
            }
            None => Ok(self.content.clone()),
        }
    }

    /// Track a new visible size. Buffer contents are untouched.
    pub fn on_resize(&mut self, visible: Canvas) -> StarbeamsResult<()> {
        visible.validate()?;
        self.visible = visible;
        Ok(())
    }

    /// Fit the composed buffer into the visible canvas, letterboxed on black.
    ///
    /// With `progress`, a bar of that fraction of the width is drawn along the bottom edge.
    pub fn blit(&mut self, progress: Option<f64>) -> StarbeamsResult<FrameRGBA> {
        let composed = self.composed()?;
        let vw: u16 = self
            .visible
            .width
            .try_into()
            .map_err(|_| StarbeamsError::render("visible width exceeds u16"))?;
        let vh: u16 = self
            .visible
            .height
            .try_into()
            .map_err(|_| StarbeamsError::render("visible height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == vw && ctx.height() == vh => ctx,
            _ => vello_cpu::RenderContext::new(vw, vh),
        };
        ctx.reset();
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let (w, h) = (f64::from(vw), f64::from(vh));
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

        let fit = fit_contain(self.buffer, self.visible);
        let bw = f64::from(self.buffer.width);
        let bh = f64::from(self.buffer.height);
        let place = Affine::translate((fit.x0, fit.y0)) * Affine::scale(fit.width() / bw);
        ctx.set_transform(affine_to_cpu(place));
        ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(composed.into_pixmap())),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, bw, bh));

        if let Some(p) = progress {
            let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
            let bar_h = (h * PROGRESS_BAR_HEIGHT).max(2.0).min(h);
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
            ctx.push_opacity_layer(0.6);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, h - bar_h, w * p, h));
            ctx.pop_layer();
        }

        let mut dst = vello_cpu::Pixmap::new(vw, vh);
        ctx.flush();
        ctx.render_to_pixmap(&mut dst);
        self.ctx = Some(ctx);

        Ok(FrameRGBA {
            width: self.visible.width,
            height: self.visible.height,
            data: dst.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

/// Largest rect with the buffer's aspect ratio that fits inside `visible`, centered.
pub fn fit_contain(buffer: Canvas, visible: Canvas) -> Rect {
    let vw = f64::from(visible.width);
    let vh = f64::from(visible.height);
    let scale = (vw / f64::from(buffer.width)).min(vh / f64::from(buffer.height));
    let w = f64::from(buffer.width) * scale;
    let h = f64::from(buffer.height) * scale;
    let x0 = (vw - w) * 0.5;
    let y0 = (vh - h) * 0.5;
    Rect::new(x0, y0, x0 + w, y0 + h)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
