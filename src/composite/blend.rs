use crate::foundation::core::{MASK_ALPHA, MASK_GREEN, MASK_RED_BLUE, Rgba};

/// Compositing rule applied by [`crate::Canvas::blend_pixel`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Replace the destination pixel.
    #[default]
    Overwrite,
    /// Exact straight-alpha "over" with truncating integer arithmetic.
    AlphaComposite,
    /// Approximate "over" that always produces an opaque result.
    FastAlphaComposite,
}

impl BlendMode {
    /// Combine `fg` onto `bg` under this mode.
    #[inline]
    pub fn apply(self, fg: Rgba, bg: Rgba) -> Rgba {
        match self {
            Self::Overwrite => overwrite(fg, bg),
            Self::AlphaComposite => alpha_composite(fg, bg),
            Self::FastAlphaComposite => fast_alpha_composite(fg, bg),
        }
    }
}

#[inline]
pub fn overwrite(fg: Rgba, _bg: Rgba) -> Rgba {
    fg
}

/// Straight-alpha "over".
///
/// All divisions truncate. A zero output alpha yields [`Rgba::TRANSPARENT`].
pub fn alpha_composite(fg: Rgba, bg: Rgba) -> Rgba {
    let [fr, fgc, fb, fa] = fg.channels().map(u32::from);
    let [br, bgc, bb, ba] = bg.channels().map(u32::from);

    let inv = 255 - fa;
    let a = fa + ba * inv / 255;
    if a == 0 {
        return Rgba::TRANSPARENT;
    }

    let channel = |f: u32, b: u32| (f * fa + b * ba * inv / 255) / a;
    Rgba::from_u32_channels(channel(fr, br), channel(fgc, bgc), channel(fb, bb), a)
}

/// Two-lane approximate "over" for opaque destinations.
///
/// Red and blue are weighted in one multiply, green in another. Output alpha is always 255.
pub fn fast_alpha_composite(fg: Rgba, bg: Rgba) -> Rgba {
    let fa = u64::from(fg.a());
    if fa == 0 {
        return bg;
    }

    let alpha = fa + 1;
    let inv_alpha = 256 - fa;
    let (f, b) = (u64::from(fg.0), u64::from(bg.0));
    let (rb_mask, g_mask) = (u64::from(MASK_RED_BLUE), u64::from(MASK_GREEN));

    let rb = (alpha * (f & rb_mask) + inv_alpha * (b & rb_mask)) >> 8;
    let g = (alpha * (f & g_mask) + inv_alpha * (b & g_mask)) >> 8;

    Rgba(((rb & rb_mask) | (g & g_mask)) as u32 | MASK_ALPHA)
}

/// Per-channel saturating add of `fg` color onto `bg`, keeping `bg` alpha.
pub fn additive(fg: Rgba, bg: Rgba) -> Rgba {
    Rgba::new(
        bg.r().saturating_add(fg.r()),
        bg.g().saturating_add(fg.g()),
        bg.b().saturating_add(fg.b()),
        bg.a(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/composite/blend.rs"]
mod tests;
