use crate::canvas::surface::Canvas;
use crate::canvas::view::CanvasView;
use crate::effects::ensure_same_size;
use crate::foundation::core::Rgba;
use crate::foundation::error::PixmillResult;

/// How a pixel's brightness is measured; both yield values in `[0, 1]` scaled by alpha.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Brightness {
    /// Brightest of the three color channels.
    MaxChannel,
    /// Weighted RMS of the color channels (0.299, 0.587, 0.114).
    #[default]
    Luminance,
}

impl Brightness {
    pub fn measure(self, p: Rgba) -> f64 {
        match self {
            Self::MaxChannel => max_channel(p),
            Self::Luminance => luminance(p),
        }
    }
}

pub fn max_channel(p: Rgba) -> f64 {
    let max = p.r().max(p.g()).max(p.b());
    f64::from(max) * f64::from(p.a()) / 255.0 / 255.0
}

pub fn luminance(p: Rgba) -> f64 {
    let [r, g, b, a] = p.channels().map(f64::from);
    (0.299 * r * r + 0.587 * g * g + 0.114 * b * b).sqrt() * a / 255.0 / 255.0
}

/// Keep pixels of `src` whose brightness is at least `threshold`; write `fill_below` elsewhere.
///
/// Results go through `dst`'s blend mode. Sizes must match.
pub fn filter_by_brightness(
    src: &CanvasView<'_>,
    dst: &mut Canvas<'_>,
    measure: Brightness,
    threshold: f64,
    fill_below: Rgba,
) -> PixmillResult<()> {
    ensure_same_size("brightness filter", src, dst)?;
    for y in 0..src.height() {
        for x in 0..src.width() {
            let p = src.pixel_at(x, y);
            let out = if measure.measure(p) >= threshold {
                p
            } else {
                fill_below
            };
            dst.blend_at(x, y, out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/brightness.rs"]
mod tests;
