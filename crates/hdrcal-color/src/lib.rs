//! # hdrcal-color
//!
//! Color conversions between the three representations a calibration patch
//! passes through:
//!
//! ```text
//! panel xy + nits --> XYZ --> BT.2020 linear --PQ--> HDR10 code
//!                                                      |
//!                   working-space linear 709  <--------+
//! ```
//!
//! - [`hdr10`] - HDR10 code to and from renderer working space
//! - [`patches`] - Primary and white patches for a panel at a target luminance
//!
//! # Usage
//!
//! ```rust
//! use hdrcal_color::hdr10;
//! use hdrcal_math::Vec3;
//!
//! // 100 nit gray as an HDR10 signal
//! let code = hdr10::linear2020_to_hdr10(Vec3::splat(0.01));
//! let working = hdr10::hdr10_to_linear709(code);
//! assert!((working.y - 1.25).abs() < 1e-3);
//! ```
//!
//! # Dependencies
//!
//! - `hdrcal-transfer` - PQ curve
//! - `hdrcal-primaries` - Panel matrices

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod hdr10;
pub mod patches;

pub use hdr10::{
    BT709_TO_BT2020, BT2020_TO_BT709, XYZ_TO_BT2020, hdr10_code_to_linear709, hdr10_to_linear709,
    hdr10_to_linear2020, linear709_to_hdr10, linear2020_to_hdr10,
};
pub use patches::{
    BT2020_PRIMARY_CODE, PanelPatches, PatchColor, SDR_BOOST_LEVELS, bt2020_code_patches, panel_patches, rec709_bars,
};
