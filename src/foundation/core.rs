pub use kurbo::{Affine, Point, Rect, Vec2};

pub(crate) const SHIFT_RED: u32 = 0;
pub(crate) const SHIFT_GREEN: u32 = 8;
pub(crate) const SHIFT_BLUE: u32 = 16;
pub(crate) const SHIFT_ALPHA: u32 = 24;

pub(crate) const MASK_RED_BLUE: u32 = (0xFF << SHIFT_RED) | (0xFF << SHIFT_BLUE);
pub(crate) const MASK_GREEN: u32 = 0xFF << SHIFT_GREEN;
pub(crate) const MASK_ALPHA: u32 = 0xFF << SHIFT_ALPHA;

/// Packed straight-alpha RGBA8 pixel.
///
/// Red lives in the low byte and alpha in the high byte, so on little-endian targets the
/// in-memory byte order is `R, G, B, A`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[repr(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Pack four 8-bit channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_u32_channels(r as u32, g as u32, b as u32, a as u32)
    }

    /// Pack an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Pack wide channel values, keeping only the low 8 bits of each.
    pub const fn from_u32_channels(r: u32, g: u32, b: u32, a: u32) -> Self {
        Self(
            ((r & 0xFF) << SHIFT_RED)
                | ((g & 0xFF) << SHIFT_GREEN)
                | ((b & 0xFF) << SHIFT_BLUE)
                | ((a & 0xFF) << SHIFT_ALPHA),
        )
    }

    /// Red channel.
    pub const fn r(self) -> u8 {
        ((self.0 >> SHIFT_RED) & 0xFF) as u8
    }

    /// Green channel.
    pub const fn g(self) -> u8 {
        ((self.0 >> SHIFT_GREEN) & 0xFF) as u8
    }

    /// Blue channel.
    pub const fn b(self) -> u8 {
        ((self.0 >> SHIFT_BLUE) & 0xFF) as u8
    }

    /// Alpha channel.
    pub const fn a(self) -> u8 {
        ((self.0 >> SHIFT_ALPHA) & 0xFF) as u8
    }

    /// Unpack into `[r, g, b, a]`.
    pub const fn channels(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }

    /// Same color with a replaced alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self((self.0 & !MASK_ALPHA) | ((a as u32) << SHIFT_ALPHA))
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(p: Rgba) -> Self {
        p.channels()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
