//! Calibration state: cached display info plus every value derived from it.
//!
//! The state is the single context object the sequencer carries around. It
//! holds the raw/adjusted descriptor pair, the staleness flag that gates
//! re-querying the provider, the tier guess, and the user-adjustable
//! calibration values that depend on the display (static contrast, active
//! dimming levels, effective max/min).

use hdrcal_core::ColorMode;
use hdrcal_primaries::Primaries;
use hdrcal_transfer::{apply_pq, pq};
use tracing::{debug, info, trace, warn};

use crate::descriptor::{DisplayDescriptor, DisplayInfo};
use crate::provider::DisplayProvider;
use crate::tier::Tier;

/// Raw (max, max full frame, min) triples the OS reports when the panel
/// provides no usable EDID luminance data.
pub const OS_DEFAULT_LUMINANCES: [(f32, f32, f32); 3] =
    [(270.0, 270.0, 0.5), (550.0, 450.0, 0.5), (1499.0, 799.0, 0.01)];

/// Cap on the luminance used to seed the static contrast test.
pub const STATIC_CONTRAST_MAX_NITS: f32 = 500.0;

/// Nominal SDR white for 8-bit static contrast seeding.
pub const SDR_CONTRAST_WHITE_NITS: f32 = 270.0;

/// Initial PQ code (10-bit) for the 50 nit active dimming patch.
pub const ACTIVE_DIMMING_SEED: f32 = 452.0;

/// Initial PQ code (10-bit) for the 5 nit active dimming patch.
pub const ACTIVE_DIMMING_DARK_SEED: f32 = 256.0;

/// Distance in PQ codes the effective-value seeds sit inside the reported range.
const EFFECTIVE_PQ_MARGIN: f32 = 5.0;

/// True when `raw` matches one of the OS fallback luminance triples.
pub fn is_os_default(raw: &DisplayDescriptor) -> bool {
    OS_DEFAULT_LUMINANCES.iter().any(|&(max, ff, min)| {
        raw.max_luminance == max && raw.max_full_frame_luminance == ff && raw.min_luminance == min
    })
}

/// User-tunable effective luminance bounds.
///
/// Units follow the color mode they were seeded in: 10-bit PQ codes in HDR,
/// 8-bit sRGB codes in SDR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveValues {
    /// Brightest small-window level.
    pub max: f32,
    /// Brightest full-frame level.
    pub max_full_frame: f32,
    /// Darkest distinguishable level.
    pub min: f32,
}

impl EffectiveValues {
    /// Seeds from the raw descriptor.
    pub fn seed(raw: &DisplayDescriptor, mode: ColorMode) -> Self {
        match mode {
            ColorMode::Hdr => Self {
                max: pq::nits_to_code(raw.max_luminance) - EFFECTIVE_PQ_MARGIN,
                max_full_frame: pq::nits_to_code(raw.max_full_frame_luminance) - EFFECTIVE_PQ_MARGIN,
                min: pq::nits_to_code(raw.min_luminance) + EFFECTIVE_PQ_MARGIN,
            },
            ColorMode::Sdr => Self {
                max: 250.0,
                max_full_frame: 250.0,
                min: 15.0,
            },
        }
    }
}

/// What [`CalibrationState::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// State was not stale; provider not queried.
    Cached,
    /// New descriptors installed.
    Refreshed,
    /// Provider reported no monitor; descriptors zeroed.
    Missing,
}

/// Display info and everything calibrated against it.
#[derive(Debug, Clone)]
pub struct CalibrationState {
    info: DisplayInfo,
    stale: bool,
    defaults_in_use: bool,
    tier: Tier,
    tier_pinned: bool,
    slider_factor: f32,
    max_pq_code: f32,
    effective: Option<EffectiveValues>,
    effective_mode: ColorMode,
    /// Static contrast patch level; PQ code in HDR, 8-bit code in SDR.
    pub static_contrast: f32,
    /// 50 nit active dimming patch, PQ code.
    pub active_dimming: f32,
    /// 5 nit active dimming patch, PQ code.
    pub active_dimming_dark: f32,
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationState {
    /// Empty, stale state. Nothing is known until the first refresh.
    pub fn new() -> Self {
        Self {
            info: DisplayInfo::default(),
            stale: true,
            defaults_in_use: false,
            tier: Tier::default(),
            tier_pinned: false,
            slider_factor: 1.0,
            max_pq_code: 0.0,
            effective: None,
            effective_mode: ColorMode::Sdr,
            static_contrast: 0.0,
            active_dimming: ACTIVE_DIMMING_SEED,
            active_dimming_dark: ACTIVE_DIMMING_DARK_SEED,
        }
    }

    /// State already refreshed from `info`.
    pub fn with_info(info: DisplayInfo) -> Self {
        let mut state = Self::new();
        state.refresh_display_info(info);
        state
    }

    /// Queries `provider` if the state is stale.
    ///
    /// A provider error leaves both descriptors zeroed and raises the
    /// defaults-in-use flag; calibration continues on fallback values.
    pub fn update<P: DisplayProvider + ?Sized>(&mut self, provider: &mut P) -> RefreshOutcome {
        if !self.stale {
            return RefreshOutcome::Cached;
        }
        match provider.query() {
            Ok(info) => {
                self.refresh_display_info(info);
                RefreshOutcome::Refreshed
            }
            Err(e) => {
                warn!(error = %e, "display data unavailable, using zeroed descriptors");
                self.refresh_display_info(DisplayInfo::default());
                self.defaults_in_use = true;
                RefreshOutcome::Missing
            }
        }
    }

    /// Installs a new raw/adjusted pair and recomputes every derived value.
    ///
    /// Both descriptors are swapped together; there is no observable state
    /// where one is new and the other old.
    pub fn refresh_display_info(&mut self, info: DisplayInfo) {
        trace!(monitor = %info.adjusted.monitor_name, "refresh_display_info");
        let previous_mode = self.color_mode();
        self.info = info;
        self.stale = false;

        let raw = &self.info.raw;
        let adjusted = &self.info.adjusted;

        self.defaults_in_use = is_os_default(raw);
        if self.defaults_in_use {
            warn!(
                max = raw.max_luminance,
                max_ff = raw.max_full_frame_luminance,
                min = raw.min_luminance,
                "panel reports OS default luminance values"
            );
        }

        if !self.tier_pinned {
            self.tier = Tier::classify(raw.max_luminance);
        }

        self.slider_factor = if adjusted.max_luminance > 0.0 {
            raw.max_luminance / adjusted.max_luminance
        } else {
            1.0
        };
        self.max_pq_code = pq::nits_to_code(raw.max_luminance).round();

        let mode = self.color_mode();
        let max_nits = adjusted.max_luminance.min(STATIC_CONTRAST_MAX_NITS);
        self.static_contrast = match mode {
            ColorMode::Hdr => apply_pq(max_nits / pq::L_MAX) * pq::CODE_MAX,
            ColorMode::Sdr => max_nits / SDR_CONTRAST_WHITE_NITS * 255.0,
        };

        if mode != previous_mode {
            self.effective = None;
        }

        info!(
            monitor = %self.info.adjusted.monitor_name,
            mode = %mode,
            tier = %self.tier,
            max_nits = raw.max_luminance,
            "display info refreshed"
        );
        debug!(
            slider_factor = self.slider_factor,
            max_pq_code = self.max_pq_code,
            static_contrast = self.static_contrast,
            "derived display values"
        );
    }

    /// Forces the next [`update`](Self::update) to query the provider.
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    /// True until the next successful refresh.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Panel-reported descriptor.
    #[inline]
    pub fn raw(&self) -> &DisplayDescriptor {
        &self.info.raw
    }

    /// OS-adjusted descriptor.
    #[inline]
    pub fn adjusted(&self) -> &DisplayDescriptor {
        &self.info.adjusted
    }

    /// Both descriptors.
    #[inline]
    pub fn info(&self) -> &DisplayInfo {
        &self.info
    }

    /// HDR when the adjusted output carries ST.2084 over BT.2020.
    #[inline]
    pub fn color_mode(&self) -> ColorMode {
        self.info.adjusted.color_mode()
    }

    /// Native gamut of the panel, from the adjusted descriptor.
    pub fn native_primaries(&self) -> Primaries {
        self.info.adjusted.primaries()
    }

    /// Raw descriptor matched an OS fallback or no monitor was found.
    #[inline]
    pub fn defaults_in_use(&self) -> bool {
        self.defaults_in_use
    }

    /// Current testing tier.
    #[inline]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Overrides the tier guess; later refreshes keep it.
    pub fn set_tier(&mut self, tier: Tier) {
        debug!(from = %self.tier, to = %tier, "tier override");
        self.tier = tier;
        self.tier_pinned = true;
    }

    /// Raw max luminance over adjusted max luminance.
    ///
    /// Greater than 1 when the OS brightness slider dims HDR output.
    #[inline]
    pub fn slider_factor(&self) -> f32 {
        self.slider_factor
    }

    /// 10-bit PQ code of the raw peak luminance, rounded.
    #[inline]
    pub fn max_pq_code(&self) -> f32 {
        self.max_pq_code
    }

    /// Effective values, seeding them on first use.
    pub fn effective_values(&mut self) -> &mut EffectiveValues {
        self.init_effective_values();
        let mode = self.effective_mode;
        self.effective
            .get_or_insert_with(|| EffectiveValues::seed(&self.info.raw, mode))
    }

    /// Effective values if already seeded.
    #[inline]
    pub fn effective(&self) -> Option<EffectiveValues> {
        self.effective
    }

    /// Seeds effective values unless already seeded for the current mode.
    pub fn init_effective_values(&mut self) {
        let mode = self.color_mode();
        if self.effective.is_some() && self.effective_mode == mode {
            return;
        }
        let seeded = EffectiveValues::seed(&self.info.raw, mode);
        debug!(?seeded, %mode, "effective values seeded");
        self.effective = Some(seeded);
        self.effective_mode = mode;
    }
}
