//! Display color spaces and the HDR/SDR color mode derived from them.
//!
//! The display pipeline reports its active signal format as one of a handful of
//! color space enumerations. Only one of them, full-range RGB with the ST.2084
//! curve and BT.2020 primaries, means the panel is receiving HDR10. Every
//! adjustable calibration value picks its unit domain (PQ code or 8-bit code)
//! from the resulting [`ColorMode`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signal color space reported for the active display output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayColorSpace {
    /// Full-range RGB, gamma 2.2, BT.709 primaries (SDR desktop).
    #[default]
    RgbFullG22NoneP709,
    /// Full-range RGB, linear, BT.709 primaries (scRGB).
    RgbFullG10NoneP709,
    /// Full-range RGB, ST.2084, BT.2020 primaries (HDR10).
    RgbFullG2084NoneP2020,
    /// Studio-range YCbCr, ST.2084, BT.2020 primaries.
    YcbcrStudioG2084LeftP2020,
    /// Anything the pipeline reports that is not listed above.
    Other,
}

impl DisplayColorSpace {
    /// Returns the color mode this signal format implies.
    #[inline]
    pub const fn color_mode(self) -> ColorMode {
        match self {
            Self::RgbFullG2084NoneP2020 => ColorMode::Hdr,
            _ => ColorMode::Sdr,
        }
    }

    /// Short identifier used in logs and reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RgbFullG22NoneP709 => "RGB_FULL_G22_NONE_P709",
            Self::RgbFullG10NoneP709 => "RGB_FULL_G10_NONE_P709",
            Self::RgbFullG2084NoneP2020 => "RGB_FULL_G2084_NONE_P2020",
            Self::YcbcrStudioG2084LeftP2020 => "YCBCR_STUDIO_G2084_LEFT_P2020",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for DisplayColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the output is currently HDR10 or SDR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// Values are 10-bit PQ codes.
    Hdr,
    /// Values are 8-bit sRGB codes.
    #[default]
    Sdr,
}

impl ColorMode {
    /// True for [`ColorMode::Hdr`].
    #[inline]
    pub const fn is_hdr(self) -> bool {
        matches!(self, Self::Hdr)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hdr => f.write_str("HDR10"),
            Self::Sdr => f.write_str("SDR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_g2084_p2020_is_hdr() {
        assert_eq!(
            DisplayColorSpace::RgbFullG2084NoneP2020.color_mode(),
            ColorMode::Hdr
        );
        assert_eq!(DisplayColorSpace::RgbFullG22NoneP709.color_mode(), ColorMode::Sdr);
        assert_eq!(DisplayColorSpace::RgbFullG10NoneP709.color_mode(), ColorMode::Sdr);
        assert_eq!(
            DisplayColorSpace::YcbcrStudioG2084LeftP2020.color_mode(),
            ColorMode::Sdr
        );
        assert_eq!(DisplayColorSpace::Other.color_mode(), ColorMode::Sdr);
    }

    #[test]
    fn test_yaml_names() {
        let cs: DisplayColorSpace = serde_yaml::from_str("rgb_full_g2084_none_p2020").unwrap();
        assert_eq!(cs, DisplayColorSpace::RgbFullG2084NoneP2020);
    }
}
