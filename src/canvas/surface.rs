use std::ops::{Deref, DerefMut};

use crate::canvas::layout::{BoundsCheck, CanvasOpts, Layout};
use crate::canvas::view::CanvasView;
use crate::composite::blend::BlendMode;
use crate::foundation::core::Rgba;
use crate::foundation::error::{PixmillError, PixmillResult};

/// Mutable, non-owning view over caller-owned packed RGBA pixels.
///
/// Rows are `stride` pixels apart in the backing slice; only the first `width` pixels of each
/// row belong to the canvas. Sub-canvases reborrow the same storage, so the borrow checker
/// keeps overlapping writers apart.
pub struct Canvas<'a> {
    data: &'a mut [u32],
    layout: Layout,
    blend: BlendMode,
    bounds: BoundsCheck,
}

impl<'a> Canvas<'a> {
    /// Wrap `buffer` as a `width x height` canvas with `stride` pixels per row.
    ///
    /// `buffer` must hold at least `stride * (height - 1) + width` pixels; the padding after
    /// the last row is not required, so a sub-rectangle of a larger frame can be wrapped.
    pub fn new(
        buffer: &'a mut [u32],
        width: i32,
        height: i32,
        stride: i32,
        mode: BlendMode,
    ) -> PixmillResult<Self> {
        Self::with_opts(
            buffer,
            CanvasOpts::new(width, height)
                .with_stride(stride)
                .with_blend(mode),
        )
    }

    /// Wrap `buffer` using explicit construction options.
    pub fn with_opts(buffer: &'a mut [u32], opts: CanvasOpts) -> PixmillResult<Self> {
        let layout = Layout::validate(&opts, buffer.len())?;
        Ok(Self {
            data: buffer,
            layout,
            blend: opts.blend,
            bounds: opts.bounds,
        })
    }

    /// Wrap a raw RGBA8 byte buffer. The slice must be 4-byte aligned.
    pub fn from_bytes(bytes: &'a mut [u8], opts: CanvasOpts) -> PixmillResult<Self> {
        let pixels: &mut [u32] = bytemuck::try_cast_slice_mut(bytes).map_err(|e| {
            PixmillError::construction(format!("byte buffer is not a pixel slice: {e}"))
        })?;
        Self::with_opts(pixels, opts)
    }

    pub(crate) fn from_parts(
        data: &'a mut [u32],
        layout: Layout,
        blend: BlendMode,
        bounds: BoundsCheck,
    ) -> Self {
        Self {
            data,
            layout,
            blend,
            bounds,
        }
    }

    pub fn width(&self) -> i32 {
        self.layout.width
    }

    pub fn height(&self) -> i32 {
        self.layout.height
    }

    pub fn stride(&self) -> i32 {
        self.layout.stride
    }

    /// `true` when the canvas has no pixels.
    pub fn is_empty(&self) -> bool {
        self.layout.width == 0 || self.layout.height == 0
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    pub fn bounds_check(&self) -> BoundsCheck {
        self.bounds
    }

    /// Change the blend mode used by subsequent [`Canvas::blend_pixel`] calls.
    pub fn set_blend_mode(&mut self, mode: BlendMode) -> &mut Self {
        self.blend = mode;
        self
    }

    /// Switch the blend mode until the returned guard is dropped.
    pub fn with_blend_mode(&mut self, mode: BlendMode) -> BlendModeGuard<'_, 'a> {
        let previous = self.blend;
        self.blend = mode;
        BlendModeGuard {
            canvas: self,
            previous,
        }
    }

    pub fn is_within_bounds(&self, x: i32, y: i32) -> bool {
        self.layout.is_within_bounds(x, y)
    }

    /// Canvas over the rectangle spanned by two corners given in any order.
    ///
    /// The right/bottom edge is exclusive. Inherits blend mode and bounds policy.
    pub fn sub_canvas(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> PixmillResult<Canvas<'_>> {
        let (left, top, right, bottom) = self.layout.sub_rect(x0, y0, x1, y1)?;
        let layout = self.layout.narrowed(right - left, bottom - top);
        let data = if layout.required_len() == 0 {
            &mut self.data[..0]
        } else {
            &mut self.data[self.layout.index(left, top)..]
        };
        Ok(Canvas {
            data,
            layout,
            blend: self.blend,
            bounds: self.bounds,
        })
    }

    /// Read-only view of the same pixels.
    pub fn view(&self) -> CanvasView<'_> {
        CanvasView::from_parts(&*self.data, self.layout, self.bounds)
    }

    pub fn pixel(&self, x: i32, y: i32) -> PixmillResult<Rgba> {
        self.layout.check(self.bounds, x, y)?;
        Ok(self.pixel_at(x, y))
    }

    /// Combine `color` with the stored pixel through the active blend mode.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) -> PixmillResult<()> {
        self.layout.check(self.bounds, x, y)?;
        self.blend_at(x, y, color);
        Ok(())
    }

    /// Store `color` directly, ignoring the blend mode.
    pub fn overwrite_pixel(&mut self, x: i32, y: i32, color: Rgba) -> PixmillResult<()> {
        self.layout.check(self.bounds, x, y)?;
        self.write_at(x, y, color);
        Ok(())
    }

    /// Blend `color` into every pixel in row-major order.
    pub fn fill(&mut self, color: Rgba) -> &mut Self {
        for y in 0..self.layout.height {
            for x in 0..self.layout.width {
                self.blend_at(x, y, color);
            }
        }
        self
    }

    /// Resample `src` into the rectangle `[x0, x1) x [y0, y1)` of this canvas.
    ///
    /// See [`crate::copy_region`].
    pub fn blend_from(
        &mut self,
        src: &CanvasView<'_>,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> &mut Self {
        crate::transform::region::copy_region(src, self, x0, y0, x1, y1);
        self
    }

    /// Backing pixels as RGBA8 bytes, from the first pixel of this view to its last.
    ///
    /// For sub-canvases this includes the parent's pixels between rows.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data[..self.layout.required_len()])
    }

    #[inline]
    pub(crate) fn pixel_at(&self, x: i32, y: i32) -> Rgba {
        Rgba(self.data[self.layout.index(x, y)])
    }

    #[inline]
    pub(crate) fn write_at(&mut self, x: i32, y: i32, color: Rgba) {
        let idx = self.layout.index(x, y);
        self.data[idx] = color.0;
    }

    #[inline]
    pub(crate) fn blend_at(&mut self, x: i32, y: i32, color: Rgba) {
        let idx = self.layout.index(x, y);
        self.data[idx] = self.blend.apply(color, Rgba(self.data[idx])).0;
    }
}

impl std::fmt::Debug for Canvas<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.layout.width)
            .field("height", &self.layout.height)
            .field("stride", &self.layout.stride)
            .field("blend", &self.blend)
            .field("bounds", &self.bounds)
            .finish()
    }
}

/// Restores a canvas's previous blend mode on drop.
pub struct BlendModeGuard<'c, 'a> {
    canvas: &'c mut Canvas<'a>,
    previous: BlendMode,
}

impl<'a> Deref for BlendModeGuard<'_, 'a> {
    type Target = Canvas<'a>;

    fn deref(&self) -> &Self::Target {
        self.canvas
    }
}

impl DerefMut for BlendModeGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.canvas
    }
}

impl Drop for BlendModeGuard<'_, '_> {
    fn drop(&mut self) {
        self.canvas.blend = self.previous;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/surface.rs"]
mod tests;
