//! Clamp and wrap policies of adjustable values.

use hdrcal_core::{ColorMode, DisplayColorSpace};
use hdrcal_display::{CalibrationState, DisplayInfo};
use hdrcal_sequencer::{Checkerboard, Command, LevelSlot, ProfileCurve, Sequencer, TestId};
use proptest::prelude::*;

fn hdr() -> Sequencer {
    Sequencer::new(CalibrationState::with_info(DisplayInfo::hdr10_reference(
        1000.0, 400.0, 0.05,
    )))
}

fn sdr() -> Sequencer {
    let mut info = DisplayInfo::hdr10_reference(270.0, 270.0, 0.5);
    info.adjusted.color_space = DisplayColorSpace::RgbFullG22NoneP709;
    Sequencer::new(CalibrationState::with_info(info))
}

#[test]
fn static_contrast_hdr_clamps_at_750() {
    let mut s = hdr();
    s.state_mut().static_contrast = 100.0;
    for _ in 0..5 {
        s.adjust_value(TestId::StaticContrastRatio, 1000, false);
        assert!(s.state().static_contrast <= 750.0);
    }
    assert_eq!(s.state().static_contrast, 750.0);
}

#[test]
fn static_contrast_sdr_uses_8bit_range() {
    let mut s = sdr();
    assert_eq!(s.state().color_mode(), ColorMode::Sdr);
    s.adjust_value(TestId::StaticContrastRatio, 100, true);
    assert_eq!(s.state().static_contrast, 255.0);
    s.adjust_value(TestId::StaticContrastRatio, -100, true);
    assert_eq!(s.state().static_contrast, 0.0);
}

#[test]
fn color_rotation_wraps_down() {
    let mut s = hdr();
    s.set_test(TestId::ColorPatches);
    assert_eq!(s.selection().color, 0);
    s.adjust(1, false);
    assert_eq!(s.selection().color, 3);
    s.adjust(-1, false);
    assert_eq!(s.selection().color, 0);
}

#[test]
fn black_level_wraps_over_five() {
    let mut s = hdr();
    s.set_test(TestId::BlackLevelCrush);
    s.adjust(1, false);
    assert_eq!(s.selection().black_level, 4);
    s.adjust(-1, true);
    assert_eq!(s.selection().black_level, 4);
}

#[test]
fn dimming_bars_start_at_one() {
    let mut s = hdr();
    s.set_test(TestId::LocalDimmingContrast);
    assert_eq!(s.selection().dimming_bars, 1);
    s.adjust(1, false);
    assert_eq!(s.selection().dimming_bars, 0);
    s.adjust(1, false);
    assert_eq!(s.selection().dimming_bars, 3);
}

#[test]
fn active_dimming_clamps() {
    let mut s = hdr();
    s.adjust_value(TestId::ActiveDimming, 100, true);
    assert_eq!(s.state().active_dimming, 488.0);
    s.adjust_value(TestId::ActiveDimmingDark, -100, true);
    assert_eq!(s.state().active_dimming_dark, 208.0);
}

#[test]
fn effective_values_adjust_in_pq() {
    let mut s = hdr();
    s.set_test(TestId::CalibrateMaxEffectiveValue);
    s.render();
    let before = s.state().effective().map(|e| e.max).unwrap_or_default();
    s.adjust(1, true);
    let after = s.state().effective().map(|e| e.max).unwrap_or_default();
    assert!((after - before - 10.0).abs() < 1e-3);
    s.adjust(100, true);
    assert_eq!(s.state().effective().map(|e| e.max), Some(1023.0));
}

#[test]
fn profile_tile_wraps_over_reachable_tiles() {
    let mut s = hdr();
    s.set_test(TestId::ProfileCurve);
    let max = ProfileCurve::max_tile(s.state().max_pq_code()) as i32;
    assert_eq!(max, 33);
    s.adjust(-1, false);
    assert_eq!(s.selection().profile_tile, max);
    s.adjust(1, false);
    assert_eq!(s.selection().profile_tile, 0);
}

#[test]
fn untargeted_tests_ignore_adjust() {
    let mut s = hdr();
    s.set_test(TestId::WarmUp);
    let before = *s.selection();
    s.adjust(1, true);
    assert_eq!(*s.selection(), before);
}

#[test]
fn checkerboard_cycles_with_wrap() {
    let mut s = hdr();
    s.apply(Command::SelectCheckerboard(-1)).unwrap();
    assert_eq!(s.selection().checkerboard, Checkerboard::Cb4x3Not);
    s.apply(Command::SelectCheckerboard(1)).unwrap();
    assert_eq!(s.selection().checkerboard, Checkerboard::Cb6x4);
}

#[test]
fn extreme_increments_saturate() {
    let mut s = hdr();
    s.set_test(TestId::ColorPatches);
    s.adjust(300_000_000, true);
    assert!((0..=3).contains(&s.selection().color));
    s.adjust(1, false);
    s.adjust(-2_147_483_647, false);
    assert!((0..=3).contains(&s.selection().color));
    s.adjust(i32::MIN, true);
    assert!((0..=3).contains(&s.selection().color));

    s.adjust_value(TestId::StaticContrastRatio, i32::MAX, true);
    assert_eq!(s.state().static_contrast, 750.0);
    s.adjust_value(TestId::StaticContrastRatio, i32::MIN, true);
    assert_eq!(s.state().static_contrast, 100.0);

    s.adjust_value(TestId::ProfileCurve, i32::MAX, true);
    assert!((0..=33).contains(&s.selection().profile_tile));
    s.adjust_value(TestId::PanelCharacteristics, i32::MIN, true);
    assert_eq!(s.state().tier(), hdrcal_display::Tier::Hdr400);
}

proptest! {
    #[test]
    fn levels_stay_in_range(steps in proptest::collection::vec((-50i32..50, any::<bool>()), 1..40)) {
        let mut s = hdr();
        for (inc, shift) in steps {
            for test in [
                TestId::StaticContrastRatio,
                TestId::ActiveDimming,
                TestId::ActiveDimmingDark,
                TestId::CalibrateMinEffectiveValue,
            ] {
                s.adjust_value(test, inc, shift);
            }
            let mode = s.state().color_mode();
            prop_assert!(LevelSlot::StaticContrast.range(mode).contains(s.state().static_contrast));
            prop_assert!(LevelSlot::ActiveDimming.range(mode).contains(s.state().active_dimming));
            prop_assert!(LevelSlot::ActiveDimmingDark.range(mode).contains(s.state().active_dimming_dark));
            let min = s.state().effective().map(|e| e.min).unwrap_or_default();
            prop_assert!(LevelSlot::EffectiveMin.range(mode).contains(min));
        }
    }

    #[test]
    fn selectors_stay_in_bounds(steps in proptest::collection::vec(-25i32..25, 1..40)) {
        let mut s = hdr();
        for inc in steps {
            for test in [TestId::ColorPatches, TestId::BlackLevelCrush, TestId::LocalDimmingContrast, TestId::ProfileCurve] {
                s.adjust_value(test, inc, false);
            }
            let sel = s.selection();
            prop_assert!((0..=3).contains(&sel.color));
            prop_assert!((0..=4).contains(&sel.black_level));
            prop_assert!((0..=3).contains(&sel.dimming_bars));
            prop_assert!((0..=33).contains(&sel.profile_tile));
        }
    }
}
