//! Test identifiers and their total order.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! tests {
    ($($variant:ident => $title:literal,)+) => {
        /// One calibration screen.
        ///
        /// The discriminant is the position in the run order; Next/Previous
        /// navigation walks it. Everything up to and including
        /// [`TestId::EndOfMandatoryTests`] is required for certification.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[repr(u8)]
        #[allow(missing_docs)]
        pub enum TestId {
            $($variant,)+
        }

        impl TestId {
            /// Every test in run order.
            pub const ALL: &'static [TestId] = &[$(TestId::$variant,)+];

            /// Title shown above the pattern.
            pub const fn title(self) -> &'static str {
                match self {
                    $(TestId::$variant => $title,)+
                }
            }
        }
    };
}

tests! {
    StartOfTest => "HDR Display Calibration",
    ConnectionProperties => "Connection Properties",
    PanelCharacteristics => "Panel Characteristics",
    ResetInstructions => "Reset Instructions",
    PqLevelsInNits => "PQ Levels in Nits",
    WarmUp => "Warm-up",
    TenPercentPeak => "1. 10% Peak Luminance",
    TenPercentPeakMax => "1.MAX 10% Peak at 10000 nits",
    FlashTest => "2. Flash Test",
    FlashTestMax => "2.MAX Flash Test at 10000 nits",
    LongDurationWhite => "3. Long Duration White",
    FullFramePeak => "3.MAX Full Frame Peak",
    BlackLevelHdrCorners => "4. Black Level (HDR Corners)",
    DualCornerBox => "4. Dual Corner Box",
    StaticContrastRatio => "5. Static Contrast Ratio",
    ActiveDimming => "5.1 Active Dimming",
    ActiveDimmingDark => "5.2 Active Dimming Dark",
    ActiveDimmingSplit => "5.3 Active Dimming Split",
    ColorPatches10 => "6. Color Patches (10% OPR)",
    ColorPatches => "6. Color Patches (100% OPR)",
    BitDepthPrecision => "7. Bit-Depth Precision",
    RiseFallTime => "8. Rise/Fall Time",
    ProfileCurve => "9. ST.2084 Profile Curve",
    LocalDimmingContrast => "10. Local Dimming Contrast",
    BlackLevelHdrVsSdr => "11. Black Level HDR vs SDR",
    BlackLevelCrush => "12. Black Level Crush",
    SubtitleFlicker => "13. Subtitle Flicker",
    XRiteColors => "14. X-Rite Colors",
    EndOfMandatoryTests => "End of Mandatory Tests",
    SharpeningFilter => "Sharpening Filter (Zone Plate)",
    ToneMapSpike => "ST.2084 Spike (Tone Map)",
    TextQuality => "Text Quality",
    OnePixelLinesBw => "Single Pixel Lines (Black/White)",
    OnePixelLinesRg => "Single Pixel Lines (Red/Green)",
    ColorPatches709 => "Color Patches (709)",
    FullFrameSdrWhite => "Full Frame SDR White",
    FullFrameSdrWhiteWithHdr => "Full Frame SDR White with HDR",
    CalibrateMaxEffectiveValue => "Calibrate Max Effective Value",
    CalibrateMaxEffectiveFullFrameValue => "Calibrate Max Full Frame Value",
    CalibrateMinEffectiveValue => "Calibrate Min Effective Value",
    StaticGradient => "Static Gradient",
    AnimatedGrayGradient => "Animated Gray Gradient",
    AnimatedColorGradient => "Animated Color Gradient",
    BlackLevelSdrTunnel => "Black Level SDR Tunnel",
    ColorPatchesMax => "6.MAX BT.2020 Primaries",
    EndOfTest => "End of Test",
    Cooldown => "Cooldown",
}

impl TestId {
    /// Number of tests.
    pub const COUNT: usize = Self::ALL.len();

    /// First test.
    pub const FIRST: TestId = TestId::StartOfTest;

    /// Last test reachable by stepping forward.
    pub const LAST: TestId = TestId::EndOfTest;

    /// Position in run order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Test at `index`, `None` past the end.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Test at `index`, clamped into range.
    ///
    /// An out-of-range index is a caller bug: debug builds assert, release
    /// builds clamp to the last test.
    pub fn from_index_clamped(index: usize) -> Self {
        debug_assert!(index < Self::COUNT, "test index {index} out of range");
        Self::ALL[index.min(Self::COUNT - 1)]
    }

    /// Part of the certification run.
    #[inline]
    pub fn is_mandatory(self) -> bool {
        self <= TestId::EndOfMandatoryTests
    }

    /// Following test, saturating at [`TestId::LAST`].
    pub fn next(self) -> Self {
        if self >= Self::LAST {
            self
        } else {
            Self::ALL[self.index() + 1]
        }
    }

    /// Preceding test, saturating at [`TestId::FIRST`].
    pub fn prev(self) -> Self {
        if self == Self::FIRST {
            self
        } else {
            Self::ALL[self.index() - 1]
        }
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index(), self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_positions() {
        assert_eq!(TestId::COUNT, 47);
        assert_eq!(TestId::TenPercentPeakMax.index(), 7);
        assert_eq!(TestId::EndOfMandatoryTests.index(), 28);
        assert_eq!(TestId::ColorPatchesMax.index(), 44);
        assert_eq!(TestId::EndOfTest.index(), 45);
        assert_eq!(TestId::Cooldown.index(), 46);
        for (i, t) in TestId::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
            assert_eq!(TestId::from_index(i), Some(*t));
        }
        assert_eq!(TestId::from_index(47), None);
    }

    #[test]
    fn test_mandatory() {
        assert!(TestId::XRiteColors.is_mandatory());
        assert!(TestId::EndOfMandatoryTests.is_mandatory());
        assert!(!TestId::SharpeningFilter.is_mandatory());
        assert!(!TestId::Cooldown.is_mandatory());
    }

    #[test]
    fn test_next_prev_saturate() {
        assert_eq!(TestId::StartOfTest.prev(), TestId::StartOfTest);
        assert_eq!(TestId::EndOfTest.next(), TestId::EndOfTest);
        assert_eq!(TestId::ColorPatchesMax.next(), TestId::EndOfTest);
        assert_eq!(TestId::WarmUp.next(), TestId::TenPercentPeak);
        assert_eq!(TestId::WarmUp.prev(), TestId::PqLevelsInNits);
    }

    #[test]
    fn test_display() {
        assert_eq!(TestId::WarmUp.to_string(), "#5 Warm-up");
    }
}
