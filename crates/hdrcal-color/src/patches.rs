//! Primary and white patches for a panel.
//!
//! Given the panel's reported primaries and a target white luminance, each
//! primary is driven at the luminance it contributes to that white:
//!
//! 1. Build the panel matrix with the XYZ (Y=1) of each primary as columns.
//! 2. `Yrow = inverse(panel) * white_xyz * K`, with `K = nits / 10000`.
//! 3. Each primary's XYZ is its xy projected at luminance `Yrow[i]`.
//! 4. XYZ goes to BT.2020 linear, then PQ, giving the HDR10 signal.
//! 5. The signal is decoded back to working-space 709 for the renderer.
//!
//! The white patch uses the white point's XYZ scaled by `K` directly.

use crate::hdr10::{XYZ_TO_BT2020, hdr10_to_linear709, linear2020_to_hdr10};
use hdrcal_core::{Error, Result};
use hdrcal_math::Vec3;
use hdrcal_primaries::{Primaries, primaries_matrix, xy_to_xyz};
use hdrcal_transfer::{apply_pq, nits_to_working, pq};
use tracing::trace;

/// One patch in every representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchColor {
    /// Chromaticity of the patch.
    pub xy: (f32, f32),
    /// Absolute XYZ, normalized so Y = 1.0 is 10000 nits.
    pub xyz: Vec3,
    /// Linear BT.2020 RGB, same normalization.
    pub bt2020: Vec3,
    /// HDR10 signal in [0, 1].
    pub hdr10: Vec3,
    /// Working-space linear BT.709 for the renderer.
    pub working: Vec3,
}

impl PatchColor {
    fn from_xyz(xy: (f32, f32), xyz: Vec3) -> Self {
        let bt2020 = XYZ_TO_BT2020 * xyz;
        let hdr10 = linear2020_to_hdr10(bt2020);
        Self {
            xy,
            xyz,
            bt2020,
            hdr10,
            working: hdr10_to_linear709(hdr10),
        }
    }

    /// 10-bit HDR10 codes as the panel sees them with the OS brightness
    /// slider applied.
    ///
    /// `slider_factor` is raw peak over adjusted peak; the codes shown to
    /// the user account for the OS scaling the signal down by that factor.
    pub fn hdr10_codes(&self, slider_factor: f32) -> Vec3 {
        (self.bt2020 * slider_factor).map(|c| apply_pq(c) * pq::CODE_MAX)
    }
}

/// Red, green, blue and white patches for one panel and luminance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPatches {
    /// Red primary.
    pub red: PatchColor,
    /// Green primary.
    pub green: PatchColor,
    /// Blue primary.
    pub blue: PatchColor,
    /// White point.
    pub white: PatchColor,
}

impl PanelPatches {
    /// Patch for a rotation index: 0 red, 1 green, 2 blue, 3 white.
    ///
    /// Indices wrap modulo 4.
    pub fn by_index(&self, index: usize) -> &PatchColor {
        match index % 4 {
            0 => &self.red,
            1 => &self.green,
            2 => &self.blue,
            _ => &self.white,
        }
    }

    /// All four in rotation order.
    pub fn all(&self) -> [&PatchColor; 4] {
        [&self.red, &self.green, &self.blue, &self.white]
    }
}

/// Computes the four patches for `panel` with a white of `nits`.
///
/// # Errors
///
/// [`Error::DegenerateGamut`] when the panel primaries are collinear.
///
/// ```rust
/// use hdrcal_color::panel_patches;
/// use hdrcal_primaries::REC2020;
///
/// let p = panel_patches(&REC2020, 1000.0).unwrap();
/// let codes = p.red.hdr10_codes(1.0);
/// assert_eq!(codes.x.round(), 769.0);
/// assert!(codes.y < 4.0);
/// ```
pub fn panel_patches(panel: &Primaries, nits: f32) -> Result<PanelPatches> {
    trace!(panel = panel.name, nits, "panel_patches");

    let k = nits / pq::L_MAX;
    let inv = primaries_matrix(panel)
        .inverse()
        .ok_or_else(|| Error::degenerate(panel.name))?;
    let white = panel.white_xyz();
    let y_row = inv * white * k;

    let primary = |xy: (f32, f32), y: f32| PatchColor::from_xyz(xy, xy_to_xyz(xy, y));
    Ok(PanelPatches {
        red: primary(panel.r, y_row.x),
        green: primary(panel.g, y_row.y),
        blue: primary(panel.b, y_row.z),
        white: PatchColor::from_xyz(panel.w, white * k),
    })
}

/// SDR reference levels selectable on the 709 patch screen.
pub const SDR_BOOST_LEVELS: [f32; 4] = [80.0, 160.0, 240.0, 320.0];

/// Working-space red, green and blue bars for the 709 patch screen.
///
/// 709 primaries are the working-space primaries, so an SDR boost is a plain
/// linear scale.
pub fn rec709_bars(level_index: usize) -> [Vec3; 3] {
    let v = nits_to_working(SDR_BOOST_LEVELS[level_index % 4]);
    [Vec3::new(v, 0.0, 0.0), Vec3::new(0.0, v, 0.0), Vec3::new(0.0, 0.0, v)]
}

/// 10-bit code used for the saturated BT.2020 primaries screen.
pub const BT2020_PRIMARY_CODE: f32 = 636.0;

/// Working-space colors for BT.2020 primaries and white at a fixed PQ code.
///
/// Order: red, green, blue, white.
pub fn bt2020_code_patches(code10: f32) -> [Vec3; 4] {
    let c = code10 / pq::CODE_MAX;
    [
        Vec3::new(c, 0.0, 0.0),
        Vec3::new(0.0, c, 0.0),
        Vec3::new(0.0, 0.0, c),
        Vec3::splat(c),
    ]
    .map(hdr10_to_linear709)
}
