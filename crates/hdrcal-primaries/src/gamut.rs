//! Gamut geometry in CIE 1976 u'v'.
//!
//! All area and coverage numbers are computed in u'v', which is closer to
//! perceptually uniform than xy. Coverage is the share of a reference
//! triangle that lies inside the device triangle:
//!
//! ```text
//! coverage = area(device ∩ reference) / area(reference)
//! ```
//!
//! Degenerate (zero-area) triangles give a coverage of 0 rather than NaN.

use crate::{ACES_AP0, ADOBE_RGB, DCI_P3, Primaries, REC2020, SRGB};
use hdrcal_math::{AREA_EPSILON_UV, DVec2, clip_convex, polygon_area};
use tracing::debug;

/// u'v' area used as the size of the visible spectrum locus.
pub const VISIBLE_LOCUS_UV_AREA: f64 = 0.195;

/// CIE 1931 xy to CIE 1976 u'v'.
///
/// ```rust
/// use hdrcal_primaries::{xy_to_uv, D65_XY};
///
/// let uv = xy_to_uv(D65_XY);
/// assert!((uv.x - 0.1978).abs() < 1e-4);
/// assert!((uv.y - 0.4683).abs() < 1e-4);
/// ```
#[inline]
pub fn xy_to_uv(xy: (f32, f32)) -> DVec2 {
    let (x, y) = (xy.0 as f64, xy.1 as f64);
    let d = -2.0 * x + 12.0 * y + 3.0;
    DVec2::new(4.0 * x / d, 9.0 * y / d)
}

/// The gamut's primaries as a u'v' triangle.
#[inline]
pub fn uv_triangle(p: &Primaries) -> [DVec2; 3] {
    p.vertices().map(xy_to_uv)
}

/// Triangle area in u'v'.
#[inline]
pub fn gamut_area(p: &Primaries) -> f64 {
    polygon_area(&uv_triangle(p))
}

/// Fraction of `reference` covered by `device`, in [0, 1].
///
/// ```rust
/// use hdrcal_primaries::{gamut_coverage, SRGB, DCI_P3};
///
/// assert!((gamut_coverage(&SRGB, &SRGB) - 1.0).abs() < 1e-9);
/// assert!(gamut_coverage(&SRGB, &DCI_P3) < 1.0);
/// ```
pub fn gamut_coverage(device: &Primaries, reference: &Primaries) -> f64 {
    let reference_tri = uv_triangle(reference);
    let reference_area = polygon_area(&reference_tri);
    if reference_area < AREA_EPSILON_UV {
        debug!(reference = reference.name, "zero-area reference gamut");
        return 0.0;
    }
    let device_tri = uv_triangle(device);
    if polygon_area(&device_tri) < AREA_EPSILON_UV {
        debug!(device = device.name, "zero-area device gamut");
        return 0.0;
    }
    let inter = clip_convex(&reference_tri, &device_tri);
    polygon_area(&inter) / reference_area
}

/// Panel gamut summary against the standard references.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    /// u'v' area of the panel gamut.
    pub area: f64,
    /// Panel area relative to [`VISIBLE_LOCUS_UV_AREA`].
    pub visible_fraction: f64,
    /// `(reference name, coverage)` for sRGB, AdobeRGB, DCI-P3, BT.2100, ACES.
    pub coverage: Vec<(&'static str, f64)>,
}

impl CoverageReport {
    /// Reference gamuts in report order.
    pub const REFERENCES: [Primaries; 5] = [SRGB, ADOBE_RGB, DCI_P3, REC2020, ACES_AP0];

    /// Builds the report for a panel.
    pub fn for_panel(panel: &Primaries) -> Self {
        let area = gamut_area(panel);
        let coverage = Self::REFERENCES
            .iter()
            .map(|r| (r.name, gamut_coverage(panel, r)))
            .collect();
        Self {
            area,
            visible_fraction: area / VISIBLE_LOCUS_UV_AREA,
            coverage,
        }
    }

    /// Coverage against a named reference.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.coverage
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
    }
}
