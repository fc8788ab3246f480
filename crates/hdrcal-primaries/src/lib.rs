//! # hdrcal-primaries
//!
//! Gamut primaries, RGB-XYZ matrix generation and gamut geometry.
//!
//! A gamut is a triangle of CIE 1931 xy primaries plus a white point. This
//! crate turns that triangle into:
//!
//! - the RGB-to-XYZ matrix ([`rgb_to_xyz_matrix`]) used by the color patches,
//! - its area in CIE 1976 u'v' ([`gamut_area`]),
//! - its coverage of a reference gamut ([`gamut_coverage`]).
//!
//! # Included Gamuts
//!
//! | Gamut | Primary Use |
//! |-------|-------------|
//! | sRGB / Rec.709 | SDR desktop, working space |
//! | Adobe RGB | Photography |
//! | DCI-P3 / Display P3 | Cinema, wide-gamut monitors |
//! | Rec.2020 (BT.2100) | HDR10 signal container |
//! | ACES AP0 | Reference for "everything visible" |
//!
//! # Usage
//!
//! ```rust
//! use hdrcal_primaries::{SRGB, REC2020, gamut_coverage, rgb_to_xyz_matrix};
//! use hdrcal_math::Vec3;
//!
//! let m = rgb_to_xyz_matrix(&SRGB).unwrap();
//! let white = m * Vec3::ONE;
//! assert!((white.y - 1.0).abs() < 1e-4);
//!
//! // 709 sits entirely inside 2020
//! assert!((gamut_coverage(&REC2020, &SRGB) - 1.0).abs() < 1e-6);
//! ```
//!
//! # Dependencies
//!
//! - `hdrcal-core` - [`Error::DegenerateGamut`]
//! - `hdrcal-math` - Matrices and polygon clipping
//!
//! # Used By
//!
//! - `hdrcal-color` - Patch colors and HDR10 conversion matrices
//! - `hdrcal-metadata` - Mastering display primaries

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod gamut;

pub use gamut::{
    CoverageReport, VISIBLE_LOCUS_UV_AREA, gamut_area, gamut_coverage, uv_triangle, xy_to_uv,
};

use hdrcal_core::{Error, Result};
use hdrcal_math::{Mat3, Vec3};

/// Gamut defined by three primaries and a white point.
///
/// ```rust
/// use hdrcal_primaries::Primaries;
///
/// let panel = Primaries::new((0.68, 0.31), (0.265, 0.69), (0.15, 0.06), (0.3127, 0.3290));
/// assert_eq!(panel.name, "Native");
/// assert_eq!(panel.white_xyz().y, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y)
    pub r: (f32, f32),
    /// Green primary (x, y)
    pub g: (f32, f32),
    /// Blue primary (x, y)
    pub b: (f32, f32),
    /// White point (x, y)
    pub w: (f32, f32),
    /// Display name
    pub name: &'static str,
}

impl Primaries {
    const fn fixed(
        r: (f32, f32),
        g: (f32, f32),
        b: (f32, f32),
        w: (f32, f32),
        name: &'static str,
    ) -> Self {
        Self { r, g, b, w, name }
    }

    /// A display's own gamut, named "Native".
    pub const fn new(r: (f32, f32), g: (f32, f32), b: (f32, f32), w: (f32, f32)) -> Self {
        Self::fixed(r, g, b, w, "Native")
    }

    /// The three primaries in R, G, B order.
    #[inline]
    pub fn vertices(&self) -> [(f32, f32); 3] {
        [self.r, self.g, self.b]
    }

    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w, 1.0)
    }

    /// Returns a copy with a different white point.
    pub const fn with_white(self, w: (f32, f32)) -> Self {
        Self::fixed(self.r, self.g, self.b, w, self.name)
    }
}

// ============================================================================
// White Points
// ============================================================================

/// D65 white point chromaticity.
pub const D65_XY: (f32, f32) = (0.31270, 0.32900);

/// D60 white point chromaticity (ACES).
pub const D60_XY: (f32, f32) = (0.32168, 0.33767);

/// DCI white point chromaticity.
pub const DCI_XY: (f32, f32) = (0.31400, 0.35100);

// ============================================================================
// Reference Gamuts
// ============================================================================

/// sRGB / Rec.709 primaries (D65).
pub const SRGB: Primaries = Primaries::fixed(
    (0.6400, 0.3300),
    (0.3000, 0.6000),
    (0.1500, 0.0600),
    D65_XY,
    "sRGB",
);

/// Rec.709 primaries (identical to sRGB).
pub const REC709: Primaries = SRGB;

/// Rec.2020 primaries (D65), the BT.2100 container.
pub const REC2020: Primaries = Primaries::fixed(
    (0.7080, 0.2920),
    (0.1700, 0.7970),
    (0.1310, 0.0460),
    D65_XY,
    "BT.2100",
);

/// DCI-P3 primaries (DCI white).
pub const DCI_P3: Primaries = Primaries::fixed(
    (0.6800, 0.3200),
    (0.2650, 0.6900),
    (0.1500, 0.0600),
    DCI_XY,
    "DCI-P3",
);

/// DCI-P3 primaries with a D65 white, as mastering displays report them.
pub const DISPLAY_P3: Primaries = DCI_P3_D65;

const DCI_P3_D65: Primaries = Primaries::fixed(
    (0.6800, 0.3200),
    (0.2650, 0.6900),
    (0.1500, 0.0600),
    D65_XY,
    "DCI-P3 D65",
);

/// Adobe RGB (1998) primaries (D65).
pub const ADOBE_RGB: Primaries = Primaries::fixed(
    (0.6400, 0.3300),
    (0.2100, 0.7100),
    (0.1500, 0.0600),
    D65_XY,
    "AdobeRGB",
);

/// ACES AP0 primaries (D60).
pub const ACES_AP0: Primaries = Primaries::fixed(
    (0.7347, 0.2653),
    (0.0000, 1.0000),
    (0.0001, -0.0770),
    D60_XY,
    "ACES",
);

// ============================================================================
// Matrix Generation
// ============================================================================

/// Projects chromaticity `xy` with luminance `big_y` to XYZ.
///
/// `X = Y*x/y`, `Z = Y*(1-x-y)/y`. A zero `y` yields black rather than
/// infinities.
///
/// ```rust
/// use hdrcal_primaries::{xy_to_xyz, D65_XY};
///
/// let w = xy_to_xyz(D65_XY, 1.0);
/// assert!((w.x - 0.9505).abs() < 1e-3);
/// assert!((w.z - 1.0891).abs() < 1e-3);
/// ```
#[inline]
pub fn xy_to_xyz(xy: (f32, f32), big_y: f32) -> Vec3 {
    let (x, y) = xy;
    if y.abs() < 1e-10 {
        return Vec3::ZERO;
    }
    Vec3::new(big_y * x / y, big_y, big_y * (1.0 - x - y) / y)
}

/// Matrix whose columns are the XYZ (Y=1) of each primary, unscaled.
#[inline]
pub fn primaries_matrix(p: &Primaries) -> Mat3 {
    Mat3::from_col_vecs(
        xy_to_xyz(p.r, 1.0),
        xy_to_xyz(p.g, 1.0),
        xy_to_xyz(p.b, 1.0),
    )
}

/// RGB to XYZ matrix for a gamut.
///
/// Primary XYZ values form the columns; the columns are then scaled by
/// `inverse(columns) * white_xyz` so that RGB (1,1,1) lands on the white point.
///
/// # Errors
///
/// [`Error::DegenerateGamut`] when the primaries are collinear.
pub fn rgb_to_xyz_matrix(p: &Primaries) -> Result<Mat3> {
    let m = primaries_matrix(p);
    let m_inv = m.inverse().ok_or_else(|| Error::degenerate(p.name))?;
    let s = m_inv * p.white_xyz();
    Ok(m.scale_cols(s))
}

/// XYZ to RGB matrix, the inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(p: &Primaries) -> Result<Mat3> {
    rgb_to_xyz_matrix(p)?
        .inverse()
        .ok_or_else(|| Error::degenerate(p.name))
}

/// RGB-to-RGB matrix via XYZ, without chromatic adaptation.
pub fn rgb_to_rgb_matrix(src: &Primaries, dst: &Primaries) -> Result<Mat3> {
    Ok(xyz_to_rgb_matrix(dst)? * rgb_to_xyz_matrix(src)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_srgb_matrix() {
        let m = rgb_to_xyz_matrix(&SRGB).unwrap();
        assert_abs_diff_eq!(m.m[0][0], 0.4124564, epsilon = 1e-3);
        assert_abs_diff_eq!(m.m[1][0], 0.2126729, epsilon = 1e-3);
        assert_abs_diff_eq!(m.m[1][1], 0.7151522, epsilon = 1e-3);
    }

    #[test]
    fn test_white_maps_to_white() {
        for p in [SRGB, REC2020, DCI_P3, DISPLAY_P3, ADOBE_RGB, ACES_AP0] {
            let white = rgb_to_xyz_matrix(&p).unwrap() * Vec3::ONE;
            let expected = p.white_xyz();
            assert_abs_diff_eq!(white.x, expected.x, epsilon = 1e-4);
            assert_abs_diff_eq!(white.y, 1.0, epsilon = 1e-4);
            assert_abs_diff_eq!(white.z, expected.z, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_roundtrip() {
        let to_xyz = rgb_to_xyz_matrix(&REC2020).unwrap();
        let to_rgb = xyz_to_rgb_matrix(&REC2020).unwrap();
        let rgb = Vec3::new(0.5, 0.3, 0.8);
        let back = to_rgb * (to_xyz * rgb);
        assert_abs_diff_eq!(back.x, rgb.x, epsilon = 1e-4);
        assert_abs_diff_eq!(back.y, rgb.y, epsilon = 1e-4);
        assert_abs_diff_eq!(back.z, rgb.z, epsilon = 1e-4);
    }

    #[test]
    fn test_2020_to_709_known_values() {
        let m = rgb_to_rgb_matrix(&REC2020, &SRGB).unwrap();
        assert_abs_diff_eq!(m.m[0][0], 1.6605, epsilon = 2e-3);
        assert_abs_diff_eq!(m.m[0][1], -0.5876, epsilon = 2e-3);
        assert_abs_diff_eq!(m.m[1][1], 1.1329, epsilon = 2e-3);
        assert_abs_diff_eq!(m.m[2][2], 1.1187, epsilon = 2e-3);
    }

    #[test]
    fn test_collinear_primaries_are_degenerate() {
        let flat = Primaries::new((0.3, 0.6), (0.3, 0.6), (0.15, 0.06), D65_XY);
        let err = rgb_to_xyz_matrix(&flat).unwrap_err();
        assert_eq!(err, Error::degenerate("Native"));
        assert!(xyz_to_rgb_matrix(&flat).is_err());
    }

    #[test]
    fn test_xy_to_xyz_zero_y() {
        assert_eq!(xy_to_xyz((0.3, 0.0), 1.0), Vec3::ZERO);
    }
}
