//! Per-frame output.
//!
//! Everything a renderer needs to draw the current test is computed here
//! from one [`FrameContext`]. Nothing in this module mutates state; the
//! sequencer decides when metadata has to be re-sent.

use hdrcal_color::SDR_BOOST_LEVELS;
use hdrcal_core::ColorMode;
use hdrcal_display::{CalibrationState, EffectiveValues, Tier};
use hdrcal_math::Vec3;
use hdrcal_metadata::{GamutSelector, Hdr10Metadata, build_metadata, build_neutral_metadata};
use hdrcal_transfer::{nits_to_working, pq, srgb};

use crate::strategy::{Checkerboard, ProfileCurve, bt2020_patches, color_patches, rec709_patches};
use crate::table::{SliderPolicy, Strategy, TestDescriptor};
use crate::test_id::TestId;
use crate::timer::{TestTimer, TimerKind};

/// Gray ladder of the PQ levels screen.
pub const PQ_LEVEL_NITS: [f32; 16] = [
    0.0, 1.0, 2.0, 2.5, 5.0, 10.0, 20.0, 40.0, 80.0, 160.0, 320.0, 640.0, 1000.0, 2000.0, 4000.0, 10000.0,
];

/// Backgrounds of the black level crush screen.
pub const BLACK_CRUSH_NITS: [f32; 5] = [0.5, 0.3, 0.1, 0.05, 0.0];

/// Tone map targets selectable on the spike screen.
pub const TONE_MAP_SPIKE_NITS: [f32; 4] = [350.0, 700.0, 1015.0, 10000.0];

/// Highlight levels over the SDR white background; index 0 uses the panel peak.
const SDR_WITH_HDR_HIGHLIGHTS: [f32; 3] = [600.0, 1000.0, 1400.0];

/// Dual corner box code for DisplayHDR 400 panels and for brighter ones.
const CORNER_BOX_CODES: (f32, f32) = (668.0, 712.0);

const GRADIENT_BASE: f32 = 0.25;

/// One drawable color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patch {
    /// Linear working-space RGB (1.0 = 80 nits) as handed to the renderer.
    pub working: Vec3,
    /// 10-bit HDR10 codes the patch is meant to produce.
    pub hdr10: Vec3,
}

impl Patch {
    /// Patch from both representations.
    pub const fn new(working: Vec3, hdr10: Vec3) -> Self {
        Self { working, hdr10 }
    }

    /// Gray at `nits`, with the slider factor applied per `policy`.
    pub fn gray(nits: f32, policy: SliderPolicy, slider_factor: f32) -> Self {
        let mut w = nits_to_working(nits);
        if policy == SliderPolicy::Divide && slider_factor > 0.0 {
            w /= slider_factor;
        }
        Self::new(Vec3::splat(w), Vec3::splat(pq::nits_to_code(nits)))
    }

    /// Patch known only in the working space; codes are derived per channel
    /// assuming BT.709 primaries.
    pub fn from_working(working: Vec3) -> Self {
        let hdr10 = hdrcal_color::linear709_to_hdr10(working) * pq::CODE_MAX;
        Self::new(working, hdr10)
    }
}

/// User selections that survive navigation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Patch color / level index, 0..=3.
    pub color: i32,
    /// Local dimming bar layout, 0..=3.
    pub dimming_bars: i32,
    /// Black crush step, 0..=4.
    pub black_level: i32,
    /// Profile curve tile.
    pub profile_tile: i32,
    /// Subtitle shown on the flicker screen.
    pub subtitle_visible: bool,
    /// Layout for checkerboard screens.
    pub checkerboard: Checkerboard,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            color: 0,
            dimming_bars: 1,
            black_level: 0,
            profile_tile: 0,
            subtitle_visible: true,
            checkerboard: Checkerboard::default(),
        }
    }
}

/// Inputs for computing one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Display info and calibration values.
    pub state: &'a CalibrationState,
    /// Test on screen.
    pub test: TestId,
    /// User selections.
    pub selection: &'a Selection,
    /// Timer of the current test.
    pub timer: &'a TestTimer,
    /// Explanatory text visible.
    pub show_text: bool,
    /// The test's effect or image loaded.
    pub resource_valid: bool,
    /// Seconds since the sequencer started, for animations.
    pub total_seconds: f32,
}

/// Everything a frame sink needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Test on screen.
    pub test: TestId,
    /// Active color mode.
    pub color_mode: ColorMode,
    /// HDR10 static metadata for this frame.
    pub metadata: Hdr10Metadata,
    /// Metadata differs from what was last sent.
    pub metadata_dirty: bool,
    /// Countdown for timed tests.
    pub remaining_seconds: Option<f32>,
    /// Flash state of blinking tests.
    pub flash_on: bool,
    /// Headline luminance of the test, nits.
    pub nits: f32,
    /// Colors to draw, in the test's layout order.
    pub patches: Vec<Patch>,
    /// Highlighted patch or option, for selectable tests.
    pub selected: Option<usize>,
    /// Layout for checkerboard tests.
    pub checkerboard: Option<Checkerboard>,
    /// Profile curve tile and its upper bound.
    pub profile_tile: Option<(usize, usize)>,
    /// Subtitle shown on the flicker screen.
    pub subtitle_visible: bool,
    /// Explanatory text visible.
    pub show_text: bool,
    /// Resource of the test loaded; always true for tests without one.
    pub resource_valid: bool,
    /// Display luminances are OS fallbacks or missing.
    pub defaults_in_use: bool,
}

enum MetadataRequest {
    Neutral,
    Levels { peak: f32, avg: f32, gamut: GamutSelector },
}

impl MetadataRequest {
    const fn native(peak: f32, avg: f32) -> Self {
        MetadataRequest::Levels {
            peak,
            avg,
            gamut: GamutSelector::Native,
        }
    }
}

struct Scene {
    metadata: MetadataRequest,
    nits: f32,
    patches: Vec<Patch>,
    selected: Option<usize>,
}

impl Scene {
    fn new(metadata: MetadataRequest, nits: f32, patches: Vec<Patch>) -> Self {
        Self {
            metadata,
            nits,
            patches,
            selected: None,
        }
    }

    fn neutral() -> Self {
        Self::new(MetadataRequest::Neutral, 0.0, Vec::new())
    }

    fn selected(mut self, index: i32) -> Self {
        self.selected = Some(index.max(0) as usize);
        self
    }
}

/// Computes the output for one frame; `metadata_dirty` is left false.
pub fn compute_frame(ctx: &FrameContext<'_>) -> FrameOutput {
    let desc = TestDescriptor::of(ctx.test);
    let scene = scene(ctx, &desc);
    let state = ctx.state;

    let metadata = match scene.metadata {
        MetadataRequest::Neutral => build_neutral_metadata(state.raw()),
        MetadataRequest::Levels { peak, avg, gamut } => build_metadata(peak, avg, gamut, &state.native_primaries()),
    };

    let max_tile = ProfileCurve::max_tile(state.max_pq_code());
    FrameOutput {
        test: ctx.test,
        color_mode: state.color_mode(),
        metadata,
        metadata_dirty: false,
        remaining_seconds: (desc.timer != TimerKind::None).then(|| ctx.timer.remaining()),
        flash_on: matches!(desc.timer, TimerKind::Blink { .. }) && ctx.timer.is_on(),
        nits: scene.nits,
        patches: scene.patches,
        selected: scene.selected,
        checkerboard: (desc.strategy == Some(Strategy::Checkerboard)).then_some(ctx.selection.checkerboard),
        profile_tile: (desc.strategy == Some(Strategy::ProfileCurve))
            .then(|| (ctx.selection.profile_tile.max(0) as usize, max_tile)),
        subtitle_visible: ctx.selection.subtitle_visible,
        show_text: ctx.show_text,
        resource_valid: desc.resource.is_none() || ctx.resource_valid,
        defaults_in_use: state.defaults_in_use(),
    }
}

/// Luminance of an adjustable level in the current mode.
fn level_nits(value: f32, mode: ColorMode, sdr_white: f32) -> f32 {
    match mode {
        ColorMode::Hdr => pq::code_to_nits(value),
        ColorMode::Sdr => srgb::code_to_nits(value, sdr_white),
    }
}

fn scene(ctx: &FrameContext<'_>, desc: &TestDescriptor) -> Scene {
    use MetadataRequest::Neutral;
    use TestId as T;

    let state = ctx.state;
    let sel = ctx.selection;
    let mode = state.color_mode();
    let adj = state.adjusted().max_luminance;
    let adj_ff = state.adjusted().max_full_frame_luminance;
    let slider = state.slider_factor();
    let gray = |nits: f32| Patch::gray(nits, desc.slider, slider);
    let color = sel.color.rem_euclid(4) as usize;
    let effective = state
        .effective()
        .unwrap_or_else(|| EffectiveValues::seed(state.raw(), mode));

    match ctx.test {
        T::PqLevelsInNits => Scene::new(
            MetadataRequest::native(10000.0, 180.0),
            10000.0,
            PQ_LEVEL_NITS.iter().map(|&n| gray(n)).collect(),
        ),
        T::WarmUp => Scene::new(MetadataRequest::native(180.0, 180.0), 180.0, vec![gray(180.0)]),
        T::TenPercentPeak | T::FlashTest | T::RiseFallTime => {
            Scene::new(MetadataRequest::native(adj, adj * 0.1), adj, vec![gray(adj)])
        }
        T::TenPercentPeakMax | T::FlashTestMax => {
            Scene::new(MetadataRequest::native(10000.0, 1000.0), 10000.0, vec![gray(10000.0)])
        }
        T::LongDurationWhite => Scene::new(MetadataRequest::native(adj, adj), adj, vec![gray(adj)]),
        T::FullFramePeak => Scene::new(MetadataRequest::native(10000.0, 10000.0), 10000.0, vec![gray(10000.0)]),
        T::BlackLevelHdrCorners => {
            let n = adj.clamp(400.0, 600.0);
            Scene::new(MetadataRequest::native(n, n * 0.1), n, vec![gray(n)])
        }
        T::DualCornerBox => {
            let code = if state.tier() > Tier::Hdr400 {
                CORNER_BOX_CODES.1
            } else {
                CORNER_BOX_CODES.0
            };
            let n = pq::code_to_nits(code);
            Scene::new(MetadataRequest::native(n, n * 0.1), n, vec![gray(n)])
        }
        T::StaticContrastRatio => {
            let n = level_nits(state.static_contrast, mode, 80.0);
            Scene::new(MetadataRequest::native(n, n * 0.5), n, vec![gray(0.0), gray(n)])
        }
        T::ActiveDimming | T::ActiveDimmingDark => {
            let code = if ctx.test == T::ActiveDimming {
                state.active_dimming
            } else {
                state.active_dimming_dark
            };
            let n = pq::code_to_nits(code);
            Scene::new(MetadataRequest::native(adj, adj * 0.5), n, vec![gray(0.0), gray(n)])
        }
        T::ActiveDimmingSplit => Scene::new(
            MetadataRequest::native(adj, adj * 0.5),
            50.0,
            vec![gray(0.0), gray(50.0), gray(5.0)],
        ),
        T::ColorPatches10 | T::ColorPatches => {
            let opr = if ctx.test == T::ColorPatches10 { 0.1 } else { 1.0 };
            let patches = color_patches(&state.native_primaries(), adj, slider);
            Scene::new(MetadataRequest::native(adj, adj * opr), adj, patches).selected(sel.color.rem_euclid(4))
        }
        T::ColorPatchesMax => Scene::new(
            MetadataRequest::Levels {
                peak: adj,
                avg: adj,
                gamut: GamutSelector::Bt2100,
            },
            pq::code_to_nits(hdrcal_color::BT2020_PRIMARY_CODE),
            bt2020_patches(),
        )
        .selected(sel.color.rem_euclid(4)),
        T::ColorPatches709 => {
            Scene::new(Neutral, SDR_BOOST_LEVELS[color], rec709_patches(color)).selected(sel.color.rem_euclid(4))
        }
        T::BitDepthPrecision => Scene::new(
            MetadataRequest::native(adj, 2.0),
            adj,
            vec![Patch::from_working(Vec3::splat(GRADIENT_BASE))],
        ),
        T::ProfileCurve | T::XRiteColors => {
            let max_tile = ProfileCurve::max_tile(state.max_pq_code());
            let tile = (sel.profile_tile.max(0) as usize).min(max_tile);
            let n = ProfileCurve::tile_nits(tile, state.max_pq_code());
            let metadata = if ctx.test == T::ProfileCurve {
                MetadataRequest::native(n, n * 0.1)
            } else {
                MetadataRequest::native(adj, adj * 0.1)
            };
            Scene::new(metadata, n, vec![gray(n)])
        }
        T::LocalDimmingContrast => Scene::new(MetadataRequest::native(adj, adj * 0.7), adj, vec![gray(adj)])
            .selected(sel.dimming_bars),
        T::BlackLevelHdrVsSdr => {
            Scene::new(MetadataRequest::native(adj, 100.0), 200.0, vec![gray(200.0), gray(0.0)])
        }
        T::BlackLevelCrush => {
            let idx = sel.black_level.rem_euclid(BLACK_CRUSH_NITS.len() as i32);
            let n = BLACK_CRUSH_NITS[idx as usize];
            Scene::new(MetadataRequest::native(adj, n), n, vec![gray(n), gray(0.0)]).selected(idx)
        }
        T::SubtitleFlicker => {
            let mut patches = vec![gray(5.0), gray(10.0)];
            if sel.subtitle_visible {
                patches.push(gray(200.0));
            }
            Scene::new(MetadataRequest::native(adj, 5.5), 200.0, patches)
        }
        T::SharpeningFilter | T::FullFrameSdrWhite => {
            let n = SDR_BOOST_LEVELS[color];
            Scene::new(Neutral, n, vec![gray(n)]).selected(color as i32)
        }
        T::FullFrameSdrWhiteWithHdr => {
            let n = if color == 0 { adj } else { SDR_WITH_HDR_HIGHLIGHTS[color - 1] };
            Scene::new(Neutral, n, vec![gray(240.0), gray(n)]).selected(color as i32)
        }
        T::ToneMapSpike => {
            let n = TONE_MAP_SPIKE_NITS[color];
            Scene::new(MetadataRequest::native(n, n * 0.1), n, vec![gray(n)]).selected(color as i32)
        }
        T::CalibrateMaxEffectiveValue => {
            let n = level_nits(effective.max, mode, 80.0);
            Scene::new(MetadataRequest::native(adj, 600.0), n, vec![gray(adj), gray(n)])
        }
        T::CalibrateMaxEffectiveFullFrameValue => {
            let n = level_nits(effective.max_full_frame, mode, 270.0);
            Scene::new(MetadataRequest::native(adj_ff, adj_ff), n, vec![gray(adj_ff), gray(n)])
        }
        T::CalibrateMinEffectiveValue => {
            let n = level_nits(effective.min, mode, 80.0);
            Scene::new(MetadataRequest::native(2.0, 1.8), n, vec![gray(2.0), gray(0.0), gray(n)])
        }
        T::StaticGradient => Scene::new(Neutral, 0.0, vec![Patch::from_working(Vec3::splat(GRADIENT_BASE))]),
        T::AnimatedGrayGradient => {
            let t = ctx.total_seconds;
            let v = GRADIENT_BASE * t.sin() + GRADIENT_BASE;
            Scene::new(Neutral, 0.0, vec![Patch::from_working(Vec3::splat(v))])
        }
        T::AnimatedColorGradient => {
            let t = ctx.total_seconds;
            let end = Vec3::new((t * 2.0).sin(), t.sin(), (t * 0.5).sin()).map(|s| GRADIENT_BASE * s + GRADIENT_BASE);
            Scene::new(Neutral, 0.0, vec![Patch::from_working(end)])
        }
        T::BlackLevelSdrTunnel => Scene::new(MetadataRequest::native(96.0, 26.0), 96.0, vec![gray(96.0)]),
        T::StartOfTest
        | T::ConnectionProperties
        | T::PanelCharacteristics
        | T::ResetInstructions
        | T::EndOfMandatoryTests
        | T::TextQuality
        | T::OnePixelLinesBw
        | T::OnePixelLinesRg
        | T::EndOfTest
        | T::Cooldown => Scene::neutral(),
    }
}
