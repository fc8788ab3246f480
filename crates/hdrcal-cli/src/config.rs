//! Display profiles.
//!
//! A profile stands in for the operating system's display query. It is a
//! small YAML document:
//!
//! ```yaml
//! name: Living room OLED
//! raw:
//!   max_luminance: 750
//!   max_full_frame_luminance: 200
//!   min_luminance: 0.0005
//!   color_space: rgb_full_g2084_none_p2020
//!   red: [0.680, 0.320]
//!   green: [0.265, 0.690]
//!   blue: [0.150, 0.060]
//!   white: [0.3127, 0.3290]
//! adjusted:            # optional, defaults to raw
//!   max_luminance: 700
//! ```
//!
//! `connected: false` simulates a machine with no active monitor.

use anyhow::{Context, Result};
use hdrcal_display::{DisplayDescriptor, DisplayInfo, StaticProvider};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Parsed display profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Profile name, for reports.
    pub name: String,
    /// `None` when the profile simulates a missing display.
    pub info: Option<DisplayInfo>,
}

impl Default for Profile {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Profile {
    /// 1000-nit HDR10 reference panel used when no profile is given.
    pub fn builtin() -> Self {
        Self {
            name: "builtin HDR10 reference".into(),
            info: Some(DisplayInfo::hdr10_reference(1000.0, 400.0, 0.05)),
        }
    }

    /// Loads the profile at `path`, or the built-in one.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("no profile given, using builtin");
            return Ok(Self::builtin());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile: {}", path.display()))?;
        let profile = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse profile: {}", path.display()))?;
        info!(name = %profile.name, path = %path.display(), "profile loaded");
        Ok(profile)
    }

    /// Parses a profile from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let raw: RawProfile = serde_yaml::from_str(yaml)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawProfile) -> Self {
        let info = raw.connected.then(|| {
            let adjusted = raw.adjusted.unwrap_or_else(|| raw.raw.clone());
            DisplayInfo {
                raw: raw.raw,
                adjusted,
            }
        });
        Self {
            name: raw.name.unwrap_or_else(|| "unnamed".into()),
            info,
        }
    }

    /// Provider answering display queries from this profile.
    pub fn provider(&self) -> StaticProvider {
        match &self.info {
            Some(info) => StaticProvider::new(info.clone()),
            None => StaticProvider::disconnected(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawProfile {
    name: Option<String>,
    #[serde(default = "connected_default")]
    connected: bool,
    #[serde(default)]
    raw: DisplayDescriptor,
    adjusted: Option<DisplayDescriptor>,
}

fn connected_default() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdrcal_core::{ColorMode, DisplayColorSpace};
    use hdrcal_display::DisplayProvider;
    use std::io::Write;

    const OLED: &str = "
name: oled
raw:
  max_luminance: 750
  max_full_frame_luminance: 200
  min_luminance: 0.0005
  color_space: rgb_full_g2084_none_p2020
  red: [0.680, 0.320]
  green: [0.265, 0.690]
  blue: [0.150, 0.060]
  white: [0.3127, 0.3290]
adjusted:
  max_luminance: 700
  max_full_frame_luminance: 180
  color_space: rgb_full_g2084_none_p2020
";

    #[test]
    fn test_adjusted_is_separate() {
        let p = Profile::from_yaml_str(OLED).unwrap();
        let info = p.info.unwrap();
        assert_eq!(p.name, "oled");
        assert_eq!(info.raw.max_luminance, 750.0);
        assert_eq!(info.adjusted.max_luminance, 700.0);
        assert_eq!(info.adjusted.color_mode(), ColorMode::Hdr);
        assert_eq!(info.raw.red, (0.680, 0.320));
    }

    #[test]
    fn test_adjusted_defaults_to_raw() {
        let p = Profile::from_yaml_str("raw:\n  max_luminance: 400\n").unwrap();
        let info = p.info.unwrap();
        assert_eq!(info.adjusted, info.raw);
        assert_eq!(info.raw.color_space, DisplayColorSpace::RgbFullG22NoneP709);
        assert_eq!(p.name, "unnamed");
    }

    #[test]
    fn test_disconnected() {
        let p = Profile::from_yaml_str("connected: false\n").unwrap();
        assert!(p.info.is_none());
        assert!(p.provider().query().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(OLED.as_bytes()).unwrap();
        let p = Profile::load(Some(file.path())).unwrap();
        assert_eq!(p.name, "oled");
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = Profile::load(Some(&dir.path().join("none.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read profile"));
    }

    #[test]
    fn test_builtin_when_no_path() {
        assert_eq!(Profile::load(None).unwrap(), Profile::builtin());
    }

    #[test]
    fn test_bad_yaml() {
        assert!(Profile::from_yaml_str("raw: [1, 2").is_err());
    }
}
