//! HDR10 signal conversions.
//!
//! An HDR10 signal is BT.2020 RGB with the ST.2084 curve applied per channel.
//! The renderer works in linear BT.709 where 1.0 is 80 nits, so showing a
//! given HDR10 code means decoding PQ, rescaling to the working space and
//! rotating the primaries from 2020 to 709.

use hdrcal_math::{Mat3, Vec3};
use hdrcal_transfer::{apply_pq, nits_to_working, pq, remove_pq};

// ============================================================================
// Pre-computed Matrices (D65, no adaptation)
// ============================================================================

/// CIE XYZ to linear BT.2020 RGB.
pub const XYZ_TO_BT2020: Mat3 = Mat3::from_rows([
    [1.7166512, -0.3556708, -0.2533663],
    [-0.6666844, 1.6164812, 0.0157685],
    [0.0176399, -0.0427706, 0.9421031],
]);

/// Linear BT.2020 RGB to linear BT.709 RGB.
pub const BT2020_TO_BT709: Mat3 = Mat3::from_rows([
    [1.6604910, -0.5876411, -0.0728499],
    [-0.1245505, 1.1328999, -0.0083494],
    [-0.0181508, -0.1005789, 1.1187297],
]);

/// Linear BT.709 RGB to linear BT.2020 RGB.
pub const BT709_TO_BT2020: Mat3 = Mat3::from_rows([
    [0.6274039, 0.3292830, 0.0433131],
    [0.0690973, 0.9195404, 0.0113623],
    [0.0163914, 0.0880133, 0.8955953],
]);

/// Normalized linear BT.2020 (1.0 = 10000 nits) to HDR10 signal in [0, 1].
#[inline]
pub fn linear2020_to_hdr10(rgb: Vec3) -> Vec3 {
    rgb.map(apply_pq)
}

/// HDR10 signal to normalized linear BT.2020.
#[inline]
pub fn hdr10_to_linear2020(code: Vec3) -> Vec3 {
    code.map(remove_pq)
}

/// HDR10 signal in [0, 1] to working-space linear BT.709.
///
/// Out-of-709 colors come back with negative components; the renderer's
/// float surface carries them through.
#[inline]
pub fn hdr10_to_linear709(code: Vec3) -> Vec3 {
    let nits = hdr10_to_linear2020(code) * pq::L_MAX;
    BT2020_TO_BT709 * nits.map(nits_to_working)
}

/// Working-space linear BT.709 to HDR10 signal.
#[inline]
pub fn linear709_to_hdr10(working: Vec3) -> Vec3 {
    let linear2020 = BT709_TO_BT2020 * working;
    linear2020_to_hdr10(linear2020.map(hdrcal_transfer::working_to_nits) / pq::L_MAX)
}

/// Same as [`hdr10_to_linear709`] for 10-bit integer-scale codes.
#[inline]
pub fn hdr10_code_to_linear709(code10: Vec3) -> Vec3 {
    hdr10_to_linear709(code10 / pq::CODE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hdrcal_primaries::{REC2020, SRGB, rgb_to_rgb_matrix, xyz_to_rgb_matrix};

    fn assert_mat_eq(a: &Mat3, b: &Mat3) {
        for i in 0..3 {
            for j in 0..3 {
                assert_abs_diff_eq!(a.m[i][j], b.m[i][j], epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_precomputed_matrices_match_primaries() {
        assert_mat_eq(&XYZ_TO_BT2020, &xyz_to_rgb_matrix(&REC2020).unwrap());
        assert_mat_eq(&BT2020_TO_BT709, &rgb_to_rgb_matrix(&REC2020, &SRGB).unwrap());
        assert_mat_eq(&BT709_TO_BT2020, &rgb_to_rgb_matrix(&SRGB, &REC2020).unwrap());
    }

    #[test]
    fn test_gray_stays_gray() {
        // 80 nits is working-space 1.0
        let code = linear2020_to_hdr10(Vec3::splat(80.0 / 10000.0));
        let w = hdr10_to_linear709(code);
        assert_abs_diff_eq!(w.x, 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(w.y, 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(w.z, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_2020_red_is_outside_709() {
        let w = hdr10_to_linear709(Vec3::new(0.5, 0.0, 0.0));
        assert!(w.x > 0.0);
        assert!(w.y < 0.0 && w.z < 0.0);
    }

    #[test]
    fn test_roundtrip_working() {
        let working = Vec3::new(2.0, 0.5, 0.25);
        let back = hdr10_to_linear709(linear709_to_hdr10(working));
        assert_abs_diff_eq!(back.x, working.x, epsilon = 2e-3);
        assert_abs_diff_eq!(back.y, working.y, epsilon = 2e-3);
        assert_abs_diff_eq!(back.z, working.z, epsilon = 2e-3);
    }

    #[test]
    fn test_code10_scale() {
        let a = hdr10_code_to_linear709(Vec3::splat(1023.0));
        let b = hdr10_to_linear709(Vec3::ONE);
        assert_eq!(a, b);
        assert_abs_diff_eq!(b.y, 125.0, epsilon = 0.05);
    }
}
