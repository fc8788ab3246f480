//! # hdrcal-metadata
//!
//! HDR10 static metadata as sent with every calibration frame.
//!
//! Chromaticities are fixed point in units of 0.00002 (x50000), luminance
//! fields follow the swap-chain conventions: MaxCLL/MaxFALL and the mastering
//! peak in whole nits, the mastering minimum in 0.0001 nit units.
//!
//! ```rust
//! use hdrcal_metadata::{GamutSelector, build_metadata};
//! use hdrcal_primaries::SRGB;
//!
//! let md = build_metadata(1000.0, 100.0, GamutSelector::Srgb, &SRGB);
//! assert_eq!(md.red, [32000, 16500]);
//! assert_eq!(md.max_cll, 1000);
//! ```

#![warn(missing_docs)]

mod builder;

pub use builder::{
    COORD_SCALE, GamutSelector, Hdr10Metadata, MIN_LUMINANCE_SCALE, build_metadata, build_neutral_metadata,
    encode_xy,
};
