//! Display-capability providers.
//!
//! The platform side (DXGI output enumeration, EDID parsing, ...) lives outside
//! this workspace. All the calibration core needs is something that can hand
//! back a [`DisplayInfo`] or report that no monitor is active.

use hdrcal_core::{Error, Result};

use crate::descriptor::DisplayInfo;

/// Source of display capabilities.
///
/// [`CalibrationState::update`](crate::CalibrationState::update) calls
/// [`query`](Self::query) only while the state is stale, so implementations
/// may be slow.
pub trait DisplayProvider {
    /// Reads the current raw and adjusted descriptors.
    ///
    /// # Errors
    ///
    /// [`Error::MissingDisplayData`] when no active monitor is attached to the
    /// output hosting the calibration window.
    fn query(&mut self) -> Result<DisplayInfo>;
}

/// Provider backed by a fixed descriptor pair, e.g. loaded from a profile file.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    info: Option<DisplayInfo>,
    queries: usize,
}

impl StaticProvider {
    /// Provider that always reports `info`.
    pub fn new(info: DisplayInfo) -> Self {
        Self {
            info: Some(info),
            queries: 0,
        }
    }

    /// Provider with no active monitor.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Replaces the reported info, e.g. after a simulated mode switch.
    pub fn set(&mut self, info: Option<DisplayInfo>) {
        self.info = info;
    }

    /// Number of times [`query`](DisplayProvider::query) was called.
    pub fn queries(&self) -> usize {
        self.queries
    }
}

impl DisplayProvider for StaticProvider {
    fn query(&mut self) -> Result<DisplayInfo> {
        self.queries += 1;
        self.info
            .clone()
            .ok_or_else(|| Error::missing_display("no active monitor on this output"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_provider() {
        let info = DisplayInfo::hdr10_reference(1000.0, 500.0, 0.05);
        let mut p = StaticProvider::new(info.clone());
        assert_eq!(p.query().unwrap(), info);
        assert_eq!(p.queries(), 1);
    }

    #[test]
    fn test_disconnected() {
        let mut p = StaticProvider::disconnected();
        assert!(matches!(p.query(), Err(Error::MissingDisplayData { .. })));
    }
}
