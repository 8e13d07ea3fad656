use crate::canvas::layout::{BoundsCheck, CanvasOpts, Layout};
use crate::foundation::core::Rgba;
use crate::foundation::error::{PixmillError, PixmillResult};

/// Read-only counterpart of [`crate::Canvas`], used as the source of copies and filters.
#[derive(Clone, Copy)]
pub struct CanvasView<'a> {
    data: &'a [u32],
    layout: Layout,
    bounds: BoundsCheck,
}

impl<'a> CanvasView<'a> {
    /// Wrap `buffer` as a `width x height` view with `stride` pixels per row.
    pub fn new(buffer: &'a [u32], width: i32, height: i32, stride: i32) -> PixmillResult<Self> {
        Self::with_opts(buffer, CanvasOpts::new(width, height).with_stride(stride))
    }

    /// Wrap `buffer` using explicit construction options. `opts.blend` is ignored.
    pub fn with_opts(buffer: &'a [u32], opts: CanvasOpts) -> PixmillResult<Self> {
        let layout = Layout::validate(&opts, buffer.len())?;
        Ok(Self::from_parts(buffer, layout, opts.bounds))
    }

    /// Wrap a raw RGBA8 byte buffer. The slice must be 4-byte aligned.
    pub fn from_bytes(bytes: &'a [u8], opts: CanvasOpts) -> PixmillResult<Self> {
        let pixels: &[u32] = bytemuck::try_cast_slice(bytes).map_err(|e| {
            PixmillError::construction(format!("byte buffer is not a pixel slice: {e}"))
        })?;
        Self::with_opts(pixels, opts)
    }

    pub(crate) fn from_parts(data: &'a [u32], layout: Layout, bounds: BoundsCheck) -> Self {
        Self {
            data,
            layout,
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

    pub fn is_empty(&self) -> bool {
        self.layout.width == 0 || self.layout.height == 0
    }

    pub fn is_within_bounds(&self, x: i32, y: i32) -> bool {
        self.layout.is_within_bounds(x, y)
    }

    /// View over the rectangle spanned by two corners given in any order.
    pub fn sub_view(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> PixmillResult<CanvasView<'a>> {
        let (left, top, right, bottom) = self.layout.sub_rect(x0, y0, x1, y1)?;
        let layout = self.layout.narrowed(right - left, bottom - top);
        let data = if layout.required_len() == 0 {
            &self.data[..0]
        } else {
            &self.data[self.layout.index(left, top)..]
        };
        Ok(Self::from_parts(data, layout, self.bounds))
    }

    pub fn pixel(&self, x: i32, y: i32) -> PixmillResult<Rgba> {
        self.layout.check(self.bounds, x, y)?;
        Ok(self.pixel_at(x, y))
    }

    /// Backing pixels as RGBA8 bytes, from the first pixel of this view to its last.
    pub fn as_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(&self.data[..self.layout.required_len()])
    }

    #[inline]
    pub(crate) fn pixel_at(&self, x: i32, y: i32) -> Rgba {
        Rgba(self.data[self.layout.index(x, y)])
    }
}

impl std::fmt::Debug for CanvasView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasView")
            .field("width", &self.layout.width)
            .field("height", &self.layout.height)
            .field("stride", &self.layout.stride)
            .field("bounds", &self.bounds)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/view.rs"]
mod tests;
