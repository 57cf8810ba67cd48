//! Color types and helpers.
//!
//! Pixel colors are `smart-leds` RGB triples; the mirrored lighting-bridge
//! fixtures describe colors as a 16-bit hue plus 8-bit saturation.

use smart_leds::{RGB8, hsv::Hsv as HSV};

pub use smart_leds::hsv::hsv2rgb;

use crate::math8::blend8;

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Blend two RGB colors (0 = all `a`, 255 = all `b`).
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Create an RGB color from a `0xRRGGBB` literal.
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Full-value color from a lighting-bridge hue/saturation pair.
///
/// Bridge hues span 0-65535; only the high byte lands on the 0-255 wheel.
#[allow(clippy::cast_possible_truncation)]
pub fn bridge_color(hue: u16, sat: u8) -> Rgb {
    hsv2rgb(Hsv {
        hue: (hue >> 8) as u8,
        sat,
        val: 255,
    })
}

/// True if any channel is non-zero.
pub const fn is_lit(color: Rgb) -> bool {
    (color.r | color.g | color.b) != 0
}
