//! pixmill is a CPU raster canvas engine over caller-owned packed RGBA pixels.
//!
//! A [`Canvas`] is a non-owning view (`width`, `height`, `stride`, blend mode) over a pixel
//! slice. Everything else operates on canvases:
//!
//! 1. **Composite**: every pixel write goes through the canvas [`BlendMode`]
//! 2. **Raster**: [`line`], [`polygon`], [`fill_triangle`], [`fill_rectangle`]
//! 3. **Transform**: nearest-neighbor [`copy_region`] and [`copy_rotated_scaled`]
//! 4. **Effects**: separable [`blur`], [`filter_by_brightness`] and [`bloom`], plus a JSON
//!    effect chain ([`parse_effect`], [`apply_effects`])
//!
//! Scratch canvases come from an explicit [`BufferPool`]; [`with_default_pool`] offers a
//! per-thread instance for convenience.
//!
//! Pixels are straight (not premultiplied) RGBA8 packed into a `u32` with red in the low byte,
//! so on little-endian targets the bytes of a pixel slice read `R, G, B, A`.
#![forbid(unsafe_code)]

mod canvas;
mod composite;
mod effects;
mod foundation;
mod pool;
mod raster;
mod transform;

pub use crate::canvas::layout::{BoundsCheck, CanvasOpts};
pub use crate::canvas::surface::{BlendModeGuard, Canvas};
pub use crate::canvas::view::CanvasView;
pub use crate::composite::blend::{
    BlendMode, additive, alpha_composite, fast_alpha_composite, overwrite,
};
pub use crate::effects::bloom::{BloomOpts, bloom, bloom_with};
pub use crate::effects::brightness::{Brightness, filter_by_brightness, luminance, max_channel};
pub use crate::effects::convolve::{
    ConvolveOpts, Threading, blur, blur_with, convolve_horizontal, convolve_vertical,
};
pub use crate::effects::fx::{Effect, EffectSpec, apply_effects, parse_effect};
pub use crate::effects::kernel::Kernel1D;
pub use crate::foundation::core::{Affine, Point, Rect, Rgba, Vec2};
pub use crate::foundation::error::{PixmillError, PixmillResult};
pub use crate::pool::buffer_pool::{
    BufferPool, BufferPoolStats, PooledBuffer, PooledCanvas, with_default_pool,
};
pub use crate::raster::fill::{fill_rectangle, fill_triangle};
pub use crate::raster::line::{line, polygon};
pub use crate::transform::region::copy_region;
pub use crate::transform::rotate::{RotateScale, copy_rotated_scaled};
