//! # hdrcal-core
//!
//! Core types shared by every HDR calibration crate.
//!
//! - [`Error`], [`Result`] - Failure modes of the colorimetry and sequencing code
//! - [`DisplayColorSpace`] - Color space reported by the display pipeline
//! - [`ColorMode`] - HDR vs SDR, derived from the reported color space
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. Everything else builds on it:
//!
//! ```text
//! hdrcal-core (this crate)
//!    ^
//!    |
//!    +-- hdrcal-transfer (PQ, sRGB, working space)
//!    +-- hdrcal-primaries (gamuts, matrices, coverage)
//!    +-- hdrcal-display (calibration state)
//!    +-- hdrcal-sequencer (test state machine)
//!    +-- ...
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod colorspace;
pub mod error;

pub use colorspace::*;
pub use error::*;

/// Prelude module for convenient imports.
///
/// ```
/// use hdrcal_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::colorspace::{ColorMode, DisplayColorSpace};
    pub use crate::error::{Error, Result};
}
