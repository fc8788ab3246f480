//! # hdrcal-math
//!
//! Math primitives for the calibration pipeline.
//!
//! - [`Mat3`] - 3x3 matrices for RGB/XYZ transforms
//! - [`Vec3`] - RGB and XYZ triplets
//! - [`polygon`] - Shoelace area and Sutherland-Hodgman clipping for gamut geometry
//!
//! # Design
//!
//! Matrices are **row-major** and multiply **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Gamut geometry runs in `f64` on [`glam::DVec2`] so that coverage ratios of
//! nearly identical triangles stay stable.
//!
//! # Usage
//!
//! ```rust
//! use hdrcal_math::{Mat3, Vec3};
//!
//! let m = Mat3::diagonal(2.0, 3.0, 4.0);
//! assert_eq!(m * Vec3::ONE, Vec3::new(2.0, 3.0, 4.0));
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - Vector types for polygon math and interop

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod mat3;
pub mod polygon;
mod vec3;

pub use mat3::*;
pub use polygon::{AREA_EPSILON, AREA_EPSILON_UV, clip_convex, polygon_area, signed_area};
pub use vec3::*;

pub use glam::DVec2;
