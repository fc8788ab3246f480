//! SMPTE ST 2084 Perceptual Quantizer.
//!
//! # Range
//!
//! - Encoded: [0, 1]
//! - Linear: [0, 1], normalized so that 1.0 is [`L_MAX`] nits
//!
//! The `*_code` helpers work on the 10-bit HDR10 scale (0..=1023) that the
//! calibration values are stored in.
//!
//! # Reference
//!
//! SMPTE ST 2084:2014
//!
//! ```rust
//! use hdrcal_transfer::pq;
//!
//! let signal = pq::apply_pq(100.0 / pq::L_MAX);
//! assert!((signal - 0.508).abs() < 0.001);
//! ```

/// Peak luminance of the PQ curve in nits.
pub const L_MAX: f32 = 10000.0;

/// Largest 10-bit code value.
pub const CODE_MAX: f32 = 1023.0;

const M1: f32 = 2610.0 / 16384.0;
const M2: f32 = 2523.0 / 4096.0 * 128.0;
const C1: f32 = 3424.0 / 4096.0;
const C2: f32 = 2413.0 / 4096.0 * 32.0;
const C3: f32 = 2392.0 / 4096.0 * 32.0;

/// Inverse EOTF: normalized linear light to PQ signal.
///
/// # Arguments
///
/// * `l` - Linear light, 1.0 = 10000 nits
///
/// # Returns
///
/// PQ signal in [0, 1].
#[inline]
pub fn apply_pq(l: f32) -> f32 {
    if l <= 0.0 {
        return 0.0;
    }
    let yp = l.min(1.0).powf(M1);
    ((C1 + C2 * yp) / (1.0 + C3 * yp)).powf(M2)
}

/// EOTF: PQ signal to normalized linear light.
///
/// # Arguments
///
/// * `v` - PQ signal in [0, 1]
///
/// # Returns
///
/// Linear light, 1.0 = 10000 nits.
#[inline]
pub fn remove_pq(v: f32) -> f32 {
    if v <= 0.0 {
        return 0.0;
    }
    let vp = v.min(1.0).powf(1.0 / M2);
    let num = (vp - C1).max(0.0);
    let den = C2 - C3 * vp;
    (num / den).powf(1.0 / M1)
}

/// Absolute luminance to PQ signal.
#[inline]
pub fn oetf(nits: f32) -> f32 {
    apply_pq(nits / L_MAX)
}

/// PQ signal to absolute luminance.
#[inline]
pub fn eotf(v: f32) -> f32 {
    remove_pq(v) * L_MAX
}

/// Nits to an unrounded 10-bit PQ code.
///
/// ```rust
/// use hdrcal_transfer::pq::nits_to_code;
///
/// assert_eq!(nits_to_code(10000.0), 1023.0);
/// ```
#[inline]
pub fn nits_to_code(nits: f32) -> f32 {
    oetf(nits) * CODE_MAX
}

/// 10-bit PQ code to nits.
#[inline]
pub fn code_to_nits(code: f32) -> f32 {
    eotf(code / CODE_MAX)
}

/// Applies [`apply_pq`] to each channel.
#[inline]
pub fn apply_pq_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(apply_pq)
}

/// Applies [`remove_pq`] to each channel.
#[inline]
pub fn remove_pq_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(remove_pq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_roundtrip() {
        for &nits in &[0.0, 0.005, 0.1, 1.0, 80.0, 100.0, 600.0, 1000.0, 4000.0, 10000.0] {
            let back = eotf(oetf(nits));
            assert!(
                (back - nits).abs() < nits * 0.001 + 0.001,
                "nits={}, back={}",
                nits,
                back
            );
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(apply_pq(0.0), 0.0);
        assert_eq!(remove_pq(0.0), 0.0);
        assert_abs_diff_eq!(apply_pq(1.0), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(remove_pq(1.0), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_negative_is_black() {
        assert_eq!(apply_pq(-0.5), 0.0);
        assert_eq!(remove_pq(-0.5), 0.0);
    }

    #[test]
    fn test_code_scale() {
        assert_abs_diff_eq!(nits_to_code(10000.0), 1023.0, epsilon = 1e-3);
        assert_abs_diff_eq!(code_to_nits(1023.0), 10000.0, epsilon = 0.5);
        // 668 and 712 are the dual-corner box levels
        assert!((code_to_nits(668.0) - 400.0).abs() < 10.0);
        assert!((code_to_nits(712.0) - 600.0).abs() < 10.0);
    }

    #[test]
    fn test_rgb() {
        let enc = apply_pq_rgb([0.01, 0.0, 1.0]);
        let dec = remove_pq_rgb(enc);
        assert_abs_diff_eq!(dec[0], 0.01, epsilon = 1e-5);
        assert_eq!(dec[1], 0.0);
        assert_abs_diff_eq!(dec[2], 1.0, epsilon = 1e-5);
    }
}
