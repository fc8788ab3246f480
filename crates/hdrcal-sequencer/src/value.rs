//! Adjustable calibration values and their clamp / wrap policies.

use hdrcal_core::ColorMode;
use serde::{Deserialize, Serialize};

/// Unit a calibration value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueDomain {
    /// 10-bit ST.2084 code.
    PqCode,
    /// Absolute luminance.
    Nits,
    /// 8-bit sRGB code.
    Code8,
    /// Index into a list of options.
    Index,
}

/// Inclusive range of a clamped value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Unit of the bounds.
    pub domain: ValueDomain,
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl ValueRange {
    /// Range in `domain`.
    pub const fn new(domain: ValueDomain, min: f32, max: f32) -> Self {
        Self { domain, min, max }
    }

    /// `v + step`, clamped.
    #[inline]
    pub fn step(&self, v: f32, step: f32) -> f32 {
        (v + step).clamp(self.min, self.max)
    }

    /// True when `v` lies inside.
    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        (self.min..=self.max).contains(&v)
    }
}

/// Calibration values that clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelSlot {
    /// Checkerboard white level.
    StaticContrast,
    /// 50 nit active dimming level.
    ActiveDimming,
    /// 5 nit active dimming level.
    ActiveDimmingDark,
    /// White crush threshold.
    EffectiveMax,
    /// Full-frame white threshold.
    EffectiveMaxFullFrame,
    /// Black crush threshold.
    EffectiveMin,
}

const PQ_FULL: ValueRange = ValueRange::new(ValueDomain::PqCode, 0.0, 1023.0);
const CODE8_FULL: ValueRange = ValueRange::new(ValueDomain::Code8, 0.0, 255.0);

impl LevelSlot {
    /// Range of the slot in `mode`.
    ///
    /// Active dimming levels are PQ codes regardless of mode.
    pub const fn range(self, mode: ColorMode) -> ValueRange {
        match (self, mode) {
            (LevelSlot::StaticContrast, ColorMode::Hdr) => ValueRange::new(ValueDomain::PqCode, 100.0, 750.0),
            (LevelSlot::StaticContrast, ColorMode::Sdr) => CODE8_FULL,
            (LevelSlot::ActiveDimming, _) => ValueRange::new(ValueDomain::PqCode, 420.0, 488.0),
            (LevelSlot::ActiveDimmingDark, _) => ValueRange::new(ValueDomain::PqCode, 208.0, 292.0),
            (
                LevelSlot::EffectiveMax | LevelSlot::EffectiveMaxFullFrame | LevelSlot::EffectiveMin,
                ColorMode::Hdr,
            ) => PQ_FULL,
            (_, ColorMode::Sdr) => CODE8_FULL,
        }
    }
}

/// Selector indices that wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexSlot {
    /// Red, green, blue, white rotation (also reused as a level selector).
    PatchColor,
    /// Local dimming bar layout.
    DimmingBars,
    /// Black level crush step.
    BlackLevel,
}

impl IndexSlot {
    /// Inclusive bounds.
    pub const fn bounds(self) -> (i32, i32) {
        match self {
            IndexSlot::PatchColor | IndexSlot::DimmingBars => (0, 3),
            IndexSlot::BlackLevel => (0, 4),
        }
    }
}

/// `v + step` wrapped into `[min, max]`.
///
/// ```rust
/// use hdrcal_sequencer::value::wrap;
///
/// assert_eq!(wrap(0, -1, 0, 3), 3);
/// assert_eq!(wrap(3, 1, 0, 3), 0);
/// assert_eq!(wrap(2, 10, 0, 4), 2);
/// ```
#[inline]
pub fn wrap(v: i32, step: i32, min: i32, max: i32) -> i32 {
    let range = i64::from(max) - i64::from(min) + 1;
    if range <= 0 {
        return min;
    }
    let wrapped = (i64::from(v) + i64::from(step) - i64::from(min)).rem_euclid(range) + i64::from(min);
    // lies in [min, max]
    wrapped as i32
}
