//! ST.2084 and sRGB reference-value validation.
//!
//! Reference code values are the 10-bit HDR10 levels commonly published for
//! the PQ curve (full range, rounded to nearest).

use approx::assert_abs_diff_eq;
use hdrcal_transfer::{apply_pq, apply_srgb, pq, remove_pq, remove_srgb};
use proptest::prelude::*;

// ============================================================================
// PQ Reference Values
// ============================================================================

/// (nits, 10-bit code)
const PQ_REFERENCE: &[(f32, f32)] = &[
    (0.0, 0.0),
    (0.1, 64.0),
    (1.0, 153.0),
    (10.0, 307.0),
    (100.0, 520.0),
    (203.0, 594.0),
    (1000.0, 769.0),
    (4000.0, 923.0),
    (10000.0, 1023.0),
];

#[test]
fn test_pq_reference_codes() {
    for &(nits, code) in PQ_REFERENCE {
        let got = pq::nits_to_code(nits).round();
        assert_eq!(got, code, "nits={}", nits);
    }
}

#[test]
fn test_pq_monotonic() {
    let mut prev = -1.0;
    for i in 0..=1023 {
        let nits = pq::code_to_nits(i as f32);
        assert!(nits > prev || i == 0, "code {} not increasing", i);
        prev = nits;
    }
}

#[test]
fn test_srgb_mid_gray() {
    assert_abs_diff_eq!(remove_srgb(0.5), 0.2140, epsilon = 1e-4);
}

proptest! {
    #[test]
    fn pq_roundtrip(x in 0.0f32..=1.0) {
        let back = remove_pq(apply_pq(x));
        prop_assert!((back - x).abs() <= 1e-3 * x + 1e-6, "x={} back={}", x, back);
    }

    #[test]
    fn pq_code_in_unit_range(x in 0.0f32..=1.0) {
        let v = apply_pq(x);
        prop_assert!((0.0..=1.0 + 1e-6).contains(&v));
    }

    #[test]
    fn srgb_roundtrip(x in 0.0f32..=1.0) {
        let back = remove_srgb(apply_srgb(x));
        prop_assert!((back - x).abs() <= 1e-5);
    }
}
