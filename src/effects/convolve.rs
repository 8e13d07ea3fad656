use rayon::prelude::*;

use crate::canvas::surface::Canvas;
use crate::canvas::view::CanvasView;
use crate::effects::ensure_same_size;
use crate::effects::kernel::Kernel1D;
use crate::foundation::core::Rgba;
use crate::foundation::error::{PixmillError, PixmillResult};
use crate::foundation::math::clamp_to_u8;
use crate::pool::buffer_pool::BufferPool;

/// Row-parallelism settings for whole-image passes.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Threading {
    /// Compute rows on a rayon pool. Output is identical to the serial path.
    #[serde(default)]
    pub parallel: bool,
    /// Worker count; `None` lets rayon decide. Must be >= 1 when set.
    #[serde(default)]
    pub threads: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConvolveOpts {
    #[serde(default)]
    pub threading: Threading,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Convolve each row of `src` with `kernel` and blend the result into `dst`.
///
/// Taps are alpha-weighted and out-of-range taps are skipped, so transparent neighbours do not
/// darken opaque pixels. `src` and `dst` must have the same size.
pub fn convolve_horizontal(
    src: &CanvasView<'_>,
    dst: &mut Canvas<'_>,
    kernel: &Kernel1D,
    opts: &ConvolveOpts,
) -> PixmillResult<()> {
    convolve(src, dst, kernel, Axis::Horizontal, opts)
}

/// Column counterpart of [`convolve_horizontal`].
pub fn convolve_vertical(
    src: &CanvasView<'_>,
    dst: &mut Canvas<'_>,
    kernel: &Kernel1D,
    opts: &ConvolveOpts,
) -> PixmillResult<()> {
    convolve(src, dst, kernel, Axis::Vertical, opts)
}

/// Separable blur: horizontal pass into a pooled scratch canvas, then vertical into `dst`.
pub fn blur(
    src: &CanvasView<'_>,
    dst: &mut Canvas<'_>,
    kernel: &Kernel1D,
    pool: &BufferPool,
) -> PixmillResult<()> {
    blur_with(src, dst, kernel, &ConvolveOpts::default(), pool)
}

#[tracing::instrument(
    skip(src, dst, kernel, pool),
    fields(width = src.width(), height = src.height(), taps = kernel.len())
)]
pub fn blur_with(
    src: &CanvasView<'_>,
    dst: &mut Canvas<'_>,
    kernel: &Kernel1D,
    opts: &ConvolveOpts,
    pool: &BufferPool,
) -> PixmillResult<()> {
    ensure_same_size("blur", src, dst)?;
    let mut scratch = pool.borrow_canvas(src.width(), src.height())?;
    convolve_horizontal(src, &mut scratch.canvas(), kernel, opts)?;
    convolve_vertical(&scratch.view(), dst, kernel, opts)
}

fn convolve(
    src: &CanvasView<'_>,
    dst: &mut Canvas<'_>,
    kernel: &Kernel1D,
    axis: Axis,
    opts: &ConvolveOpts,
) -> PixmillResult<()> {
    ensure_same_size("convolution", src, dst)?;
    let height = src.height();

    let rows: Vec<Vec<Rgba>> = if opts.threading.parallel {
        let workers = build_thread_pool(opts.threading.threads)?;
        workers.install(|| {
            (0..height)
                .into_par_iter()
                .map(|y| convolve_row(src, kernel, axis, y))
                .collect()
        })
    } else {
        (0..height)
            .map(|y| convolve_row(src, kernel, axis, y))
            .collect()
    };

    for (y, row) in rows.into_iter().enumerate() {
        for (x, color) in row.into_iter().enumerate() {
            dst.blend_at(x as i32, y as i32, color);
        }
    }
    Ok(())
}

fn convolve_row(src: &CanvasView<'_>, kernel: &Kernel1D, axis: Axis, y: i32) -> Vec<Rgba> {
    let radius = kernel.radius() as i64;
    let (w, h) = (i64::from(src.width()), i64::from(src.height()));

    (0..src.width())
        .map(|x| {
            let mut color = [0.0f64; 3];
            let mut alpha = 0.0f64;
            let mut weight_sum = 0.0f64;

            for (i, &weight) in kernel.weights().iter().enumerate() {
                let offset = i as i64 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => (i64::from(x) + offset, i64::from(y)),
                    Axis::Vertical => (i64::from(x), i64::from(y) + offset),
                };
                if sx < 0 || sy < 0 || sx >= w || sy >= h {
                    continue;
                }

                let [r, g, b, a] = src.pixel_at(sx as i32, sy as i32).channels().map(f64::from);
                let coverage = weight * a / 255.0;
                color[0] += coverage * r;
                color[1] += coverage * g;
                color[2] += coverage * b;
                alpha += weight * a;
                weight_sum += weight;
            }

            if alpha <= 0.0 || weight_sum <= 0.0 {
                return Rgba::TRANSPARENT;
            }
            Rgba::new(
                clamp_to_u8(color[0] * 255.0 / alpha),
                clamp_to_u8(color[1] * 255.0 / alpha),
                clamp_to_u8(color[2] * 255.0 / alpha),
                clamp_to_u8(alpha / weight_sum),
            )
        })
        .collect()
}

fn build_thread_pool(threads: Option<usize>) -> PixmillResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PixmillError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| {
            PixmillError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/convolve.rs"]
mod tests;
