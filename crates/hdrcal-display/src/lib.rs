//! # hdrcal-display
//!
//! Everything the calibration core knows about the attached display.
//!
//! - [`DisplayDescriptor`] - Luminance, primaries and signal format of one output
//! - [`DisplayInfo`] - The raw (panel-reported) and adjusted (OS-modified) pair
//! - [`Tier`] - DisplayHDR certification tier guessed from peak luminance
//! - [`CalibrationState`] - Cached display info, derived values, effective bounds
//! - [`DisplayProvider`] - Source of display info, queried only when stale
//!
//! # Usage
//!
//! ```rust
//! use hdrcal_display::{CalibrationState, DisplayInfo, StaticProvider, Tier};
//!
//! let mut provider = StaticProvider::new(DisplayInfo::hdr10_reference(1000.0, 400.0, 0.05));
//! let mut state = CalibrationState::new();
//! state.update(&mut provider);
//!
//! assert_eq!(state.tier(), Tier::Hdr1000);
//! assert!(state.color_mode().is_hdr());
//! ```
//!
//! # Used By
//!
//! - `hdrcal-metadata` - Native primaries and neutral metadata
//! - `hdrcal-sequencer` - Owns a [`CalibrationState`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod descriptor;
pub mod provider;
pub mod state;
pub mod tier;

pub use descriptor::{DisplayDescriptor, DisplayInfo};
pub use provider::{DisplayProvider, StaticProvider};
pub use state::{CalibrationState, EffectiveValues, RefreshOutcome, is_os_default};
pub use tier::Tier;
