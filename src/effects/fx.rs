use crate::canvas::surface::Canvas;
use crate::canvas::view::CanvasView;
use crate::effects::bloom::{BloomOpts, bloom_with};
use crate::effects::brightness::{Brightness, filter_by_brightness};
use crate::effects::convolve::blur;
use crate::effects::ensure_same_size;
use crate::effects::kernel::Kernel1D;
use crate::foundation::core::Rgba;
use crate::foundation::error::{PixmillError, PixmillResult};
use crate::pool::buffer_pool::{BufferPool, PooledCanvas};
use crate::transform::region::copy_region;

const MAX_KERNEL_SIZE: u64 = 513;

/// Serialized effect: a kind name plus free-form parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectSpec {
    pub kind: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl EffectSpec {
    pub fn parse(&self) -> PixmillResult<Effect> {
        parse_effect(&self.kind, &self.params)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Blur {
        size: usize,
        stddev: Option<f64>,
    },
    Bloom {
        size: usize,
        stddev: Option<f64>,
        threshold: f64,
        measure: Brightness,
    },
    BrightPass {
        threshold: f64,
        measure: Brightness,
        fill: Rgba,
    },
}

impl Effect {
    fn kernel(size: usize, stddev: Option<f64>) -> Kernel1D {
        match stddev {
            Some(s) => Kernel1D::gaussian(size, s),
            None => Kernel1D::gaussian_default(size),
        }
    }

    /// Run this effect from `src` into `dst`.
    pub fn apply(
        &self,
        src: &CanvasView<'_>,
        dst: &mut Canvas<'_>,
        pool: &BufferPool,
    ) -> PixmillResult<()> {
        match *self {
            Self::Blur { size, stddev } => blur(src, dst, &Self::kernel(size, stddev), pool),
            Self::Bloom {
                size,
                stddev,
                threshold,
                measure,
            } => {
                let opts = BloomOpts {
                    kernel: Self::kernel(size, stddev),
                    threshold,
                    measure,
                    ..BloomOpts::default()
                };
                bloom_with(src, dst, &opts, pool)
            }
            Self::BrightPass {
                threshold,
                measure,
                fill,
            } => filter_by_brightness(src, dst, measure, threshold, fill),
        }
    }
}

/// Parse one effect from its kind name and JSON parameters.
///
/// Kind names are case-insensitive and accept `_` or `-` separators.
pub fn parse_effect(kind: &str, params: &serde_json::Value) -> PixmillResult<Effect> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(PixmillError::validation("effect kind must be non-empty"));
    }

    match kind.as_str() {
        "blur" => Ok(Effect::Blur {
            size: get_size(params, "size")?,
            stddev: get_stddev(params)?,
        }),
        "bloom" => Ok(Effect::Bloom {
            size: get_size(params, "size")?,
            stddev: get_stddev(params)?,
            threshold: get_threshold(params)?,
            measure: get_measure(params)?,
        }),
        "brightpass" | "bright_pass" | "bright-pass" => Ok(Effect::BrightPass {
            threshold: get_threshold(params)?,
            measure: get_measure(params)?,
            fill: match params.get("fill") {
                Some(v) => serde_json::from_value::<[u8; 4]>(v.clone())
                    .map(Rgba::from)
                    .map_err(|_| {
                        PixmillError::validation("BrightPass.fill must be [r,g,b,a] bytes")
                    })?,
                None => Rgba::TRANSPARENT,
            },
        }),
        _ => Err(PixmillError::validation(format!(
            "unknown effect kind '{kind}'"
        ))),
    }
}

/// Run `effects` in order from `src`, writing the last result into `dst`.
///
/// Intermediate results live in pooled scratch canvases. An empty chain copies `src` into
/// `dst` through its blend mode.
#[tracing::instrument(skip(src, dst, pool), fields(width = src.width(), height = src.height()))]
pub fn apply_effects(
    src: &CanvasView<'_>,
    dst: &mut Canvas<'_>,
    effects: &[Effect],
    pool: &BufferPool,
) -> PixmillResult<()> {
    ensure_same_size("effect chain", src, dst)?;
    let (w, h) = (src.width(), src.height());

    let Some((last, leading)) = effects.split_last() else {
        copy_region(src, dst, 0, 0, w, h);
        return Ok(());
    };

    let mut current: Option<PooledCanvas<'_>> = None;
    for effect in leading {
        let mut next = pool.borrow_canvas(w, h)?;
        let input = current.as_ref().map_or(*src, PooledCanvas::view);
        effect.apply(&input, &mut next.canvas(), pool)?;
        current = Some(next);
    }

    let input = current.as_ref().map_or(*src, PooledCanvas::view);
    last.apply(&input, dst, pool)
}

fn get_size(params: &serde_json::Value, key: &str) -> PixmillResult<usize> {
    let Some(v) = params.get(key) else {
        return Err(PixmillError::validation(format!(
            "missing effect param '{key}'"
        )));
    };
    let Some(n) = v.as_u64() else {
        return Err(PixmillError::validation(format!(
            "effect param '{key}' must be a non-negative integer"
        )));
    };
    if n > MAX_KERNEL_SIZE {
        return Err(PixmillError::validation(format!(
            "effect param '{key}' must be <= {MAX_KERNEL_SIZE}"
        )));
    }
    Ok(n as usize)
}

fn get_stddev(params: &serde_json::Value) -> PixmillResult<Option<f64>> {
    let Some(v) = params.get("stddev") else {
        return Ok(None);
    };
    let s = v
        .as_f64()
        .ok_or_else(|| PixmillError::validation("effect param 'stddev' must be a number"))?;
    if !s.is_finite() || s < 0.0 {
        return Err(PixmillError::validation(
            "effect param 'stddev' must be finite and >= 0",
        ));
    }
    Ok(Some(s))
}

fn get_threshold(params: &serde_json::Value) -> PixmillResult<f64> {
    let Some(v) = params.get("threshold") else {
        return Err(PixmillError::validation(
            "missing effect param 'threshold'",
        ));
    };
    let t = v
        .as_f64()
        .ok_or_else(|| PixmillError::validation("effect param 'threshold' must be a number"))?;
    if !(0.0..=1.0).contains(&t) {
        return Err(PixmillError::validation(
            "effect param 'threshold' must be in [0, 1]",
        ));
    }
    Ok(t)
}

fn get_measure(params: &serde_json::Value) -> PixmillResult<Brightness> {
    match params.get("measure") {
        Some(v) => serde_json::from_value(v.clone()).map_err(|e| {
            PixmillError::validation(format!("effect param 'measure' is invalid: {e}"))
        }),
        None => Ok(Brightness::default()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fx.rs"]
mod tests;
