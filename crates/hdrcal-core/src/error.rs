//! Error types for calibration operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the recoverable failure modes of the core:
//! - Singular primaries matrices ([`Error::DegenerateGamut`])
//! - Capability queries that find no active monitor ([`Error::MissingDisplayData`])
//! - Out-of-range test indices ([`Error::InvalidTestTransition`])
//!
//! Transfer functions are total and never fail.
//!
//! # Usage
//!
//! ```rust
//! use hdrcal_core::{Error, Result};
//!
//! fn pick(index: usize, count: usize) -> Result<usize> {
//!     if index >= count {
//!         return Err(Error::InvalidTestTransition { index, count });
//!     }
//!     Ok(index)
//! }
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Derive macro error implementation
//!
//! # Used By
//!
//! - `hdrcal-primaries` - Matrix construction
//! - `hdrcal-display` - Capability providers
//! - `hdrcal-sequencer` - Test index conversion

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the calibration core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The primaries matrix of a gamut is singular.
    ///
    /// Area and coverage for that one computation are undefined and skipped.
    #[error("degenerate gamut '{name}': primaries matrix is singular")]
    DegenerateGamut {
        /// Name of the offending gamut.
        name: String,
    },

    /// The capability query returned no active monitor.
    #[error("no display data available: {reason}")]
    MissingDisplayData {
        /// What the provider reported.
        reason: String,
    },

    /// A test index outside the valid range was requested.
    #[error("invalid test transition: index {index} outside 0..{count}")]
    InvalidTestTransition {
        /// Requested index.
        index: usize,
        /// Number of valid tests.
        count: usize,
    },
}

impl Error {
    /// Creates a [`Error::DegenerateGamut`] for the named gamut.
    pub fn degenerate(name: impl Into<String>) -> Self {
        Self::DegenerateGamut { name: name.into() }
    }

    /// Creates a [`Error::MissingDisplayData`] with a reason.
    pub fn missing_display(reason: impl Into<String>) -> Self {
        Self::MissingDisplayData {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::degenerate("Native");
        assert_eq!(
            err.to_string(),
            "degenerate gamut 'Native': primaries matrix is singular"
        );

        let err = Error::InvalidTestTransition { index: 99, count: 47 };
        assert!(err.to_string().contains("99"));
        assert!(err.to_string().contains("0..47"));
    }

    #[test]
    fn test_missing_display() {
        let err = Error::missing_display("no active monitor");
        assert!(matches!(err, Error::MissingDisplayData { .. }));
    }
}
