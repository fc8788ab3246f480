//! Display descriptors.

use hdrcal_core::{ColorMode, DisplayColorSpace};
use hdrcal_primaries::{D65_XY, Primaries, REC709};
use serde::{Deserialize, Serialize};

/// Capabilities of one display output.
///
/// A zeroed descriptor (the [`Default`]) stands for "no data".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayDescriptor {
    /// Peak luminance of a small window, nits.
    pub max_luminance: f32,
    /// Sustained full-screen luminance, nits.
    pub max_full_frame_luminance: f32,
    /// Black level, nits.
    pub min_luminance: f32,
    /// Signal format of the output.
    pub color_space: DisplayColorSpace,
    /// Red primary (x, y).
    pub red: (f32, f32),
    /// Green primary (x, y).
    pub green: (f32, f32),
    /// Blue primary (x, y).
    pub blue: (f32, f32),
    /// White point (x, y).
    pub white: (f32, f32),
    /// Bits per color channel on the link.
    pub bits_per_color: u32,
    /// OS device path.
    pub device_name: String,
    /// Friendly monitor name.
    pub monitor_name: String,
    /// Physical connector, e.g. "HDMI".
    pub connection: String,
    /// Native resolution in pixels.
    pub resolution: (u32, u32),
}

impl DisplayDescriptor {
    /// The panel's gamut as [`Primaries`] named "Native".
    #[inline]
    pub fn primaries(&self) -> Primaries {
        Primaries::new(self.red, self.green, self.blue, self.white)
    }

    /// HDR or SDR, from the signal format.
    #[inline]
    pub fn color_mode(&self) -> ColorMode {
        self.color_space.color_mode()
    }

    /// True when nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.max_luminance == 0.0 && self.max_full_frame_luminance == 0.0 && self.min_luminance == 0.0
    }
}

/// Raw and adjusted descriptors, always replaced together.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayInfo {
    /// As reported by the panel (EDID / DisplayID).
    pub raw: DisplayDescriptor,
    /// As modified by the OS, e.g. by the SDR brightness slider.
    pub adjusted: DisplayDescriptor,
}

impl DisplayInfo {
    /// Same descriptor for raw and adjusted.
    pub fn uniform(desc: DisplayDescriptor) -> Self {
        Self {
            raw: desc.clone(),
            adjusted: desc,
        }
    }

    /// A 709-primaries HDR10 output with the given luminances.
    ///
    /// Handy starting point for tests and the built-in CLI profile.
    pub fn hdr10_reference(max: f32, max_full_frame: f32, min: f32) -> Self {
        Self::uniform(DisplayDescriptor {
            max_luminance: max,
            max_full_frame_luminance: max_full_frame,
            min_luminance: min,
            color_space: DisplayColorSpace::RgbFullG2084NoneP2020,
            red: REC709.r,
            green: REC709.g,
            blue: REC709.b,
            white: D65_XY,
            bits_per_color: 10,
            device_name: "\\\\.\\DISPLAY1".into(),
            monitor_name: "Reference HDR10".into(),
            connection: "HDMI".into(),
            resolution: (3840, 2160),
        })
    }
}
