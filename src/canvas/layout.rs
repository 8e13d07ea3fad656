use crate::composite::blend::BlendMode;
use crate::foundation::error::{PixmillError, PixmillResult};

/// Whether per-pixel accessors validate coordinates.
///
/// Both policies address pixels with the same formula; `Trusting` only drops the explicit
/// check, so an invalid coordinate is caught (if at all) by slice indexing.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BoundsCheck {
    /// Reject out-of-range coordinates with [`PixmillError::OutOfBounds`].
    #[default]
    Strict,
    /// Skip coordinate validation.
    Trusting,
}

/// Construction parameters for [`crate::Canvas`] and [`crate::CanvasView`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasOpts {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Pixels per backing row, `>= width`.
    pub stride: i32,
    /// Initial blend mode.
    #[serde(default)]
    pub blend: BlendMode,
    /// Bounds checking policy.
    #[serde(default)]
    pub bounds: BoundsCheck,
}

impl CanvasOpts {
    /// Tightly packed canvas (`stride == width`) with default blend mode and strict bounds.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            stride: width,
            blend: BlendMode::default(),
            bounds: BoundsCheck::default(),
        }
    }

    /// Return options with a different stride.
    pub fn with_stride(mut self, stride: i32) -> Self {
        self.stride = stride;
        self
    }

    /// Return options with a different initial blend mode.
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    /// Return options with a different bounds policy.
    pub fn with_bounds(mut self, bounds: BoundsCheck) -> Self {
        self.bounds = bounds;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) stride: i32,
}

impl Layout {
    pub(crate) fn validate(opts: &CanvasOpts, buffer_len: usize) -> PixmillResult<Self> {
        if opts.width < 0 {
            return Err(PixmillError::construction(format!(
                "invalid width: {}",
                opts.width
            )));
        }
        if opts.height < 0 {
            return Err(PixmillError::construction(format!(
                "invalid height: {}",
                opts.height
            )));
        }
        if opts.stride < opts.width {
            return Err(PixmillError::construction(format!(
                "invalid stride: {} (width {})",
                opts.stride, opts.width
            )));
        }

        let layout = Self {
            width: opts.width,
            height: opts.height,
            stride: opts.stride,
        };
        let needed = layout.required_len();
        if buffer_len < needed {
            return Err(PixmillError::construction(format!(
                "buffer holds {buffer_len} pixels, layout needs {needed}"
            )));
        }
        Ok(layout)
    }

    /// Pixels spanned from the first addressable pixel to the last.
    pub(crate) fn required_len(self) -> usize {
        if self.width == 0 || self.height == 0 {
            return 0;
        }
        (self.stride as usize) * (self.height as usize - 1) + self.width as usize
    }

    #[inline]
    pub(crate) fn is_within_bounds(self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[inline]
    pub(crate) fn index(self, x: i32, y: i32) -> usize {
        (i64::from(self.stride) * i64::from(y) + i64::from(x)) as usize
    }

    #[inline]
    pub(crate) fn check(self, bounds: BoundsCheck, x: i32, y: i32) -> PixmillResult<()> {
        if bounds == BoundsCheck::Strict && !self.is_within_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(())
    }

    pub(crate) fn out_of_bounds(self, x: i32, y: i32) -> PixmillError {
        PixmillError::out_of_bounds(i64::from(x), i64::from(y), self.width, self.height)
    }

    /// Sort the corners and verify the rectangle lies inside this extent.
    ///
    /// Returns `(left, top, right, bottom)` with exclusive right/bottom.
    pub(crate) fn sub_rect(
        self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> PixmillResult<(i32, i32, i32, i32)> {
        let (left, top, right, bottom) = crate::foundation::math::sort_corners(x0, y0, x1, y1);
        if left < 0 || top < 0 {
            return Err(self.out_of_bounds(left, top));
        }
        if right > self.width || bottom > self.height {
            return Err(self.out_of_bounds(right - 1, bottom - 1));
        }
        Ok((left, top, right, bottom))
    }

    pub(crate) fn narrowed(self, width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            stride: self.stride,
        }
    }
}
