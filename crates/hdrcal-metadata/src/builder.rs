use std::fmt;

use hdrcal_display::DisplayDescriptor;
use hdrcal_primaries::{ADOBE_RGB, D65_XY, DCI_P3, Primaries, REC2020, SRGB};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Fixed-point scale for chromaticity coordinates.
pub const COORD_SCALE: f32 = 50000.0;

/// Fixed-point scale for the mastering minimum luminance.
pub const MIN_LUMINANCE_SCALE: f32 = 10000.0;

/// HDR10 static metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hdr10Metadata {
    /// Maximum content light level, nits.
    pub max_cll: u16,
    /// Maximum frame-average light level, nits.
    pub max_fall: u16,
    /// Mastering display peak, nits.
    pub max_mastering: u32,
    /// Mastering display black, 0.0001 nits.
    pub min_mastering: u32,
    /// Red primary, fixed point.
    pub red: [u16; 2],
    /// Green primary, fixed point.
    pub green: [u16; 2],
    /// Blue primary, fixed point.
    pub blue: [u16; 2],
    /// White point, fixed point.
    pub white: [u16; 2],
}

impl fmt::Display for Hdr10Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MaxCLL {} MaxFALL {} Mastering {}/{} R{:?} G{:?} B{:?} W{:?}",
            self.max_cll,
            self.max_fall,
            self.max_mastering,
            self.min_mastering,
            self.red,
            self.green,
            self.blue,
            self.white
        )
    }
}

/// Mastering gamut advertised in the metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamutSelector {
    /// Panel's own primaries.
    #[default]
    Native,
    /// sRGB / BT.709.
    Srgb,
    /// Adobe RGB (1998).
    Adobe,
    /// DCI-P3.
    DciP3,
    /// BT.2100 / BT.2020.
    Bt2100,
}

impl GamutSelector {
    /// All selectors in table order.
    pub const ALL: [GamutSelector; 5] = [
        GamutSelector::Native,
        GamutSelector::Srgb,
        GamutSelector::Adobe,
        GamutSelector::DciP3,
        GamutSelector::Bt2100,
    ];

    /// Primaries for this selector; `native` is used for [`GamutSelector::Native`].
    ///
    /// Fixed gamuts always advertise a D65 white.
    pub fn primaries(self, native: &Primaries) -> Primaries {
        match self {
            GamutSelector::Native => *native,
            GamutSelector::Srgb => SRGB.with_white(D65_XY),
            GamutSelector::Adobe => ADOBE_RGB.with_white(D65_XY),
            GamutSelector::DciP3 => DCI_P3.with_white(D65_XY),
            GamutSelector::Bt2100 => REC2020.with_white(D65_XY),
        }
    }
}

/// Rounds `coord * 50000` into the u16 range.
#[inline]
pub fn encode_xy(xy: (f32, f32)) -> [u16; 2] {
    [encode_u16(xy.0 * COORD_SCALE), encode_u16(xy.1 * COORD_SCALE)]
}

#[inline]
fn encode_u16(v: f32) -> u16 {
    v.round().clamp(0.0, u16::MAX as f32) as u16
}

#[inline]
fn encode_u32(v: f32) -> u32 {
    v.round().clamp(0.0, u32::MAX as f32) as u32
}

/// Metadata for a test frame: `peak` and `avg` in nits, zero mastering black.
///
/// Primaries follow `gamut`; the white point is always D65, also for
/// [`GamutSelector::Native`].
pub fn build_metadata(peak: f32, avg: f32, gamut: GamutSelector, native: &Primaries) -> Hdr10Metadata {
    trace!(peak, avg, ?gamut, "build_metadata");
    let p = gamut.primaries(native);
    Hdr10Metadata {
        max_cll: encode_u16(peak),
        max_fall: encode_u16(avg),
        max_mastering: encode_u32(peak),
        min_mastering: 0,
        red: encode_xy(p.r),
        green: encode_xy(p.g),
        blue: encode_xy(p.b),
        white: encode_xy(D65_XY),
    }
}

/// Metadata that mirrors the panel's own reported capabilities.
///
/// Used on informational screens so the display applies no tone mapping of
/// its own.
pub fn build_neutral_metadata(raw: &DisplayDescriptor) -> Hdr10Metadata {
    trace!(max = raw.max_luminance, "build_neutral_metadata");
    let p = raw.primaries();
    Hdr10Metadata {
        max_cll: encode_u16(raw.max_luminance),
        max_fall: encode_u16(raw.max_full_frame_luminance),
        max_mastering: encode_u32(raw.max_luminance),
        min_mastering: encode_u32(raw.min_luminance * MIN_LUMINANCE_SCALE),
        red: encode_xy(p.r),
        green: encode_xy(p.g),
        blue: encode_xy(p.b),
        white: encode_xy(p.w),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdrcal_display::DisplayInfo;

    #[test]
    fn test_srgb_encoding() {
        let md = build_metadata(1000.0, 100.0, GamutSelector::Srgb, &REC2020);
        assert_eq!(md.max_cll, 1000);
        assert_eq!(md.max_fall, 100);
        assert_eq!(md.max_mastering, 1000);
        assert_eq!(md.min_mastering, 0);
        assert_eq!(md.red, [32000, 16500]);
        assert_eq!(md.green, [15000, 30000]);
        assert_eq!(md.blue, [7500, 3000]);
        assert_eq!(md.white, [15635, 16450]);
    }

    #[test]
    fn test_bt2100_encoding() {
        let md = build_metadata(10000.0, 10000.0, GamutSelector::Bt2100, &SRGB);
        assert_eq!(md.red, [35400, 14600]);
        assert_eq!(md.green, [8500, 39850]);
        assert_eq!(md.blue, [6550, 2300]);
        assert_eq!(md.max_cll, 10000);
    }

    #[test]
    fn test_dci_uses_d65_white() {
        let md = build_metadata(600.0, 60.0, GamutSelector::DciP3, &SRGB);
        assert_eq!(md.white, encode_xy(D65_XY));
        assert_eq!(md.red, [34000, 16000]);
    }

    #[test]
    fn test_native_passes_through() {
        let native = Primaries::new((0.68, 0.32), (0.265, 0.69), (0.15, 0.06), (0.3127, 0.329));
        let md = build_metadata(800.0, 80.0, GamutSelector::Native, &native);
        assert_eq!(md.red, [34000, 16000]);
        assert_eq!(md.green, [13250, 34500]);
    }

    #[test]
    fn test_native_white_is_d65() {
        let native = Primaries::new((0.68, 0.32), (0.265, 0.69), (0.15, 0.06), (0.314, 0.351));
        let md = build_metadata(800.0, 80.0, GamutSelector::Native, &native);
        assert_eq!(md.red, [34000, 16000]);
        assert_eq!(md.white, [15635, 16450]);

        let raw = DisplayDescriptor {
            max_luminance: 800.0,
            red: native.r,
            green: native.g,
            blue: native.b,
            white: native.w,
            ..Default::default()
        };
        assert_eq!(build_neutral_metadata(&raw).white, [15700, 17550]);
    }

    #[test]
    fn test_rounding_and_saturation() {
        let md = build_metadata(1015.27, 101.527, GamutSelector::Srgb, &SRGB);
        assert_eq!(md.max_cll, 1015);
        assert_eq!(md.max_fall, 102);
        let md = build_metadata(1.0e6, -4.0, GamutSelector::Srgb, &SRGB);
        assert_eq!(md.max_cll, u16::MAX);
        assert_eq!(md.max_fall, 0);
        assert_eq!(md.max_mastering, 1_000_000);
    }

    #[test]
    fn test_neutral_from_raw() {
        let info = DisplayInfo::hdr10_reference(1000.0, 400.0, 0.05);
        let md = build_neutral_metadata(&info.raw);
        assert_eq!(md.max_cll, 1000);
        assert_eq!(md.max_fall, 400);
        assert_eq!(md.max_mastering, 1000);
        assert_eq!(md.min_mastering, 500);
        assert_eq!(md.red, [32000, 16500]);
    }

    #[test]
    fn test_neutral_zeroed_display() {
        let md = build_neutral_metadata(&Default::default());
        assert_eq!(md, Hdr10Metadata::default());
    }
}
