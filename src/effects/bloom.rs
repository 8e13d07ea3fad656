use crate::canvas::surface::Canvas;
use crate::canvas::view::CanvasView;
use crate::composite::blend::{BlendMode, additive};
use crate::effects::brightness::{Brightness, filter_by_brightness};
use crate::effects::convolve::{ConvolveOpts, Threading, blur_with};
use crate::effects::ensure_same_size;
use crate::effects::kernel::Kernel1D;
use crate::foundation::core::Rgba;
use crate::foundation::error::{PixmillError, PixmillResult};
use crate::pool::buffer_pool::BufferPool;
use crate::transform::region::copy_region;

/// Bloom configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct BloomOpts {
    /// Blur applied to the extracted highlights.
    pub kernel: Kernel1D,
    /// Minimum brightness, in `[0, 1]`, for a pixel to glow.
    pub threshold: f64,
    pub measure: Brightness,
    pub threading: Threading,
}

impl Default for BloomOpts {
    fn default() -> Self {
        Self {
            kernel: Kernel1D::gaussian_default(9),
            threshold: 0.8,
            measure: Brightness::Luminance,
            threading: Threading::default(),
        }
    }
}

/// Luminance bloom with the given blur kernel. See [`bloom_with`].
pub fn bloom(
    src: &CanvasView<'_>,
    dst: &mut Canvas<'_>,
    kernel: &Kernel1D,
    threshold: f64,
    pool: &BufferPool,
) -> PixmillResult<()> {
    let opts = BloomOpts {
        kernel: kernel.clone(),
        threshold,
        ..BloomOpts::default()
    };
    bloom_with(src, dst, &opts, pool)
}

/// Extract highlights, blur them, and add them back over a copy of `src`.
///
/// `dst` is overwritten with `src` regardless of its blend mode, then the blurred highlights
/// are added per channel with saturation; `dst` alpha is kept. Two scratch canvases the size
/// of `src` are borrowed from `pool`.
#[tracing::instrument(
    skip(src, dst, opts, pool),
    fields(width = src.width(), height = src.height(), threshold = opts.threshold)
)]
pub fn bloom_with(
    src: &CanvasView<'_>,
    dst: &mut Canvas<'_>,
    opts: &BloomOpts,
    pool: &BufferPool,
) -> PixmillResult<()> {
    ensure_same_size("bloom", src, dst)?;
    if opts.threshold.is_nan() {
        return Err(PixmillError::validation("bloom threshold must be a number"));
    }
    let (w, h) = (src.width(), src.height());

    let mut bright = pool.borrow_canvas(w, h)?;
    filter_by_brightness(
        src,
        &mut bright.canvas(),
        opts.measure,
        opts.threshold,
        Rgba::BLACK,
    )?;

    let mut glow = pool.borrow_canvas(w, h)?;
    let convolve = ConvolveOpts {
        threading: opts.threading.clone(),
    };
    blur_with(&bright.view(), &mut glow.canvas(), &opts.kernel, &convolve, pool)?;

    copy_region(src, &mut dst.with_blend_mode(BlendMode::Overwrite), 0, 0, w, h);

    let glow = glow.view();
    for y in 0..h {
        for x in 0..w {
            let combined = additive(glow.pixel_at(x, y), dst.pixel_at(x, y));
            dst.write_at(x, y, combined);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/bloom.rs"]
mod tests;
