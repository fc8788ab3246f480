//! Per-test descriptor table.
//!
//! Navigation, timers and value adjustment are generic; everything that
//! varies between tests is looked up here.

use crate::test_id::TestId;
use crate::timer::TimerKind;
use crate::value::{IndexSlot, LevelSlot};

/// What the adjust command changes on a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustPolicy {
    /// Adjust is ignored.
    None,
    /// Testing tier, clamped to the tier ladder.
    Tier,
    /// A clamped level.
    Level(LevelSlot),
    /// A wrapping selector; the increment is subtracted.
    Rotate(IndexSlot),
    /// Profile curve tile, wrapping over the panel's reachable tiles; the
    /// increment is added.
    ProfileTile,
    /// Subtitle visibility flips when the step is odd.
    ToggleSubtitle,
}

/// How the OS brightness slider factor enters a test's drawn values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderPolicy {
    /// Drawn at the nominal level.
    Ignore,
    /// Working-space level divided by the factor.
    Divide,
    /// BT.2020 signal multiplied by the factor before PQ encoding.
    ScaleSignal,
}

/// Test-specific logic beyond the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Panel or reference primaries.
    ColorPatches,
    /// Checkerboard layout selection.
    Checkerboard,
    /// Profile curve tile search.
    ProfileCurve,
}

/// Everything generic logic needs to know about one test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestDescriptor {
    /// The test.
    pub id: TestId,
    /// Timer behavior.
    pub timer: TimerKind,
    /// Adjust behavior.
    pub adjust: AdjustPolicy,
    /// Values or drawing differ between HDR and SDR.
    pub mode_sensitive: bool,
    /// Brightness slider handling.
    pub slider: SliderPolicy,
    /// Non-table logic, if any.
    pub strategy: Option<Strategy>,
    /// Shader effect or image the renderer must load.
    pub resource: Option<&'static str>,
    /// Display info is re-read every frame while shown.
    pub live_display: bool,
}

const HALF_HOUR: TimerKind = TimerKind::Countdown { seconds: 1800.0 };
const FLASH: TimerKind = TimerKind::Blink {
    initial: 4.0,
    on: 2.0,
    off: 10.0,
    reset_on_entry: true,
};
const RISE_FALL: TimerKind = TimerKind::Blink {
    initial: 3.0,
    on: 5.0,
    off: 5.0,
    reset_on_entry: false,
};
const COOLDOWN: TimerKind = TimerKind::Countdown { seconds: 60.0 };

impl TestDescriptor {
    const fn plain(id: TestId) -> Self {
        Self {
            id,
            timer: TimerKind::None,
            adjust: AdjustPolicy::None,
            mode_sensitive: false,
            slider: SliderPolicy::Ignore,
            strategy: None,
            resource: None,
            live_display: false,
        }
    }

    const fn timer(mut self, timer: TimerKind) -> Self {
        self.timer = timer;
        self
    }

    const fn adjust(mut self, adjust: AdjustPolicy) -> Self {
        self.adjust = adjust;
        self
    }

    const fn mode_sensitive(mut self) -> Self {
        self.mode_sensitive = true;
        self
    }

    const fn slider(mut self, slider: SliderPolicy) -> Self {
        self.slider = slider;
        self
    }

    const fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    const fn resource(mut self, name: &'static str) -> Self {
        self.resource = Some(name);
        self
    }

    const fn live_display(mut self) -> Self {
        self.live_display = true;
        self
    }

    /// Descriptor for `id`.
    pub const fn of(id: TestId) -> Self {
        use AdjustPolicy::{Level, ProfileTile, Rotate, Tier, ToggleSubtitle};
        use SliderPolicy::{Divide, ScaleSignal};
        use TestId as T;

        let d = Self::plain(id);
        match id {
            T::PanelCharacteristics => d.adjust(Tier).live_display(),
            T::PqLevelsInNits => d.slider(Divide),
            T::WarmUp => d.timer(HALF_HOUR).slider(Divide),
            T::TenPercentPeak | T::TenPercentPeakMax | T::LongDurationWhite => d.timer(HALF_HOUR),
            T::FullFramePeak => d.timer(HALF_HOUR).slider(Divide),
            T::FlashTest | T::FlashTestMax => d.timer(FLASH),
            T::DualCornerBox => d.slider(Divide),
            T::StaticContrastRatio => d
                .adjust(Level(LevelSlot::StaticContrast))
                .mode_sensitive()
                .strategy(Strategy::Checkerboard),
            T::ActiveDimming => d
                .adjust(Level(LevelSlot::ActiveDimming))
                .slider(Divide)
                .strategy(Strategy::Checkerboard),
            T::ActiveDimmingDark => d
                .adjust(Level(LevelSlot::ActiveDimmingDark))
                .slider(Divide)
                .strategy(Strategy::Checkerboard),
            T::ActiveDimmingSplit => d.slider(Divide).strategy(Strategy::Checkerboard),
            T::ColorPatches10 | T::ColorPatches => d
                .adjust(Rotate(IndexSlot::PatchColor))
                .slider(ScaleSignal)
                .strategy(Strategy::ColorPatches),
            T::ColorPatchesMax | T::ColorPatches709 => d
                .adjust(Rotate(IndexSlot::PatchColor))
                .strategy(Strategy::ColorPatches),
            T::FullFrameSdrWhite | T::FullFrameSdrWhiteWithHdr => d.adjust(Rotate(IndexSlot::PatchColor)),
            T::SharpeningFilter => d
                .adjust(Rotate(IndexSlot::PatchColor))
                .resource("SineSweepEffect"),
            T::ToneMapSpike => d
                .adjust(Rotate(IndexSlot::PatchColor))
                .resource("ToneSpikeEffect"),
            T::BitDepthPrecision => d.resource("BandedGradientEffect"),
            T::RiseFallTime => d.timer(RISE_FALL),
            T::ProfileCurve => d
                .adjust(ProfileTile)
                .slider(Divide)
                .strategy(Strategy::ProfileCurve),
            T::XRiteColors => d.slider(Divide).strategy(Strategy::ProfileCurve),
            T::LocalDimmingContrast => d.adjust(Rotate(IndexSlot::DimmingBars)),
            T::BlackLevelHdrVsSdr => d.mode_sensitive(),
            T::BlackLevelCrush => d.adjust(Rotate(IndexSlot::BlackLevel)).slider(Divide),
            T::SubtitleFlicker => d.adjust(ToggleSubtitle).slider(Divide),
            T::TextQuality => d.resource("CalibriBoth96Dpi.png"),
            T::OnePixelLinesBw => d.resource("OnePixelLinesBW1200x700.png"),
            T::OnePixelLinesRg => d.resource("OnePixelLinesRG1200x700.png"),
            T::CalibrateMaxEffectiveValue => d.adjust(Level(LevelSlot::EffectiveMax)).mode_sensitive(),
            T::CalibrateMaxEffectiveFullFrameValue => {
                d.adjust(Level(LevelSlot::EffectiveMaxFullFrame)).mode_sensitive()
            }
            T::CalibrateMinEffectiveValue => d.adjust(Level(LevelSlot::EffectiveMin)).mode_sensitive(),
            T::Cooldown => d.timer(COOLDOWN),
            _ => d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_tests() {
        let timed: Vec<TestId> = TestId::ALL
            .iter()
            .copied()
            .filter(|&t| TestDescriptor::of(t).timer != TimerKind::None)
            .collect();
        assert_eq!(
            timed,
            vec![
                TestId::WarmUp,
                TestId::TenPercentPeak,
                TestId::TenPercentPeakMax,
                TestId::FlashTest,
                TestId::FlashTestMax,
                TestId::LongDurationWhite,
                TestId::FullFramePeak,
                TestId::RiseFallTime,
                TestId::Cooldown,
            ]
        );
    }

    #[test]
    fn test_rotating_tests() {
        for t in [
            TestId::ColorPatches,
            TestId::ColorPatches10,
            TestId::ColorPatchesMax,
            TestId::ColorPatches709,
            TestId::FullFrameSdrWhite,
            TestId::FullFrameSdrWhiteWithHdr,
            TestId::SharpeningFilter,
            TestId::ToneMapSpike,
        ] {
            assert_eq!(TestDescriptor::of(t).adjust, AdjustPolicy::Rotate(IndexSlot::PatchColor), "{t}");
        }
    }

    #[test]
    fn test_descriptor_ids_match() {
        for &t in TestId::ALL {
            assert_eq!(TestDescriptor::of(t).id, t);
        }
    }
}
