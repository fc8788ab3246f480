//! # hdrcal-transfer
//!
//! Transfer functions used by the calibration patterns.
//!
//! | Module | Encoded | Linear |
//! |--------|---------|--------|
//! | [`pq`] | [0, 1] code (x1023 for 10-bit) | [0, 1] where 1.0 = 10000 nits |
//! | [`srgb`] | [0, 1] code (x255 for 8-bit) | [0, 1] display-relative |
//! | [`working`] | - | working space, 1.0 = 80 nits |
//!
//! Every function is total. Inputs outside the physical range are the caller's
//! responsibility; negative inputs map to 0.
//!
//! # Usage
//!
//! ```rust
//! use hdrcal_transfer::{pq, working};
//!
//! // 10-bit PQ code for a 1000 nit patch
//! let code = pq::nits_to_code(1000.0);
//! assert_eq!(code.round(), 769.0);
//!
//! // Same patch as a renderer value
//! let v = working::nits_to_working(1000.0);
//! assert_eq!(v, 12.5);
//! ```
//!
//! # Used By
//!
//! - `hdrcal-color` - HDR10 code conversions
//! - `hdrcal-display` - Effective value seeding
//! - `hdrcal-sequencer` - Displayed nits per test

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod pq;
pub mod srgb;
pub mod working;

pub use pq::{apply_pq, remove_pq};
pub use srgb::{apply_srgb, remove_srgb};
pub use working::{nits_to_working, working_to_nits};
