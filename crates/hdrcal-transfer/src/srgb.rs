//! IEC 61966-2-1 sRGB curve.
//!
//! Piecewise: linear segment near black, 2.4 power above.

const ENCODED_BREAK: f32 = 0.04045;
const LINEAR_BREAK: f32 = 0.0031308;
const SLOPE: f32 = 12.92;
const GAMMA: f32 = 2.4;
const A: f32 = 0.055;

/// Linear to sRGB-encoded.
///
/// ```rust
/// use hdrcal_transfer::srgb::apply_srgb;
///
/// assert!((apply_srgb(0.214) - 0.5).abs() < 0.001);
/// ```
#[inline]
pub fn apply_srgb(l: f32) -> f32 {
    if l <= 0.0 {
        0.0
    } else if l <= LINEAR_BREAK {
        l * SLOPE
    } else {
        (1.0 + A) * l.powf(1.0 / GAMMA) - A
    }
}

/// sRGB-encoded to linear.
#[inline]
pub fn remove_srgb(v: f32) -> f32 {
    if v <= 0.0 {
        0.0
    } else if v <= ENCODED_BREAK {
        v / SLOPE
    } else {
        ((v + A) / (1.0 + A)).powf(GAMMA)
    }
}

/// 8-bit sRGB code to nits for a given reference white.
///
/// The calibration screens report 8-bit values against an 80 nit white,
/// except the full-frame screen which uses 270.
#[inline]
pub fn code_to_nits(code: f32, white_nits: f32) -> f32 {
    remove_srgb(code / 255.0) * white_nits
}
