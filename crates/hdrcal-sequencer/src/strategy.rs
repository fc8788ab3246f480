//! The few tests whose behavior does not fit the descriptor table.
//!
//! - [`Checkerboard`] - Layout selection for contrast and dimming tests
//! - [`ProfileCurve`] - PQ code ladder with a per-panel brightest tile
//! - [`color_patches`] - Panel primaries driven at a target white

use hdrcal_color::{BT2020_PRIMARY_CODE, PanelPatches, bt2020_code_patches, panel_patches, rec709_bars};
use hdrcal_core::Result;
use hdrcal_math::Vec3;
use hdrcal_primaries::{Primaries, SRGB};
use hdrcal_transfer::pq;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::frame::Patch;

/// Checkerboard layout for contrast measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkerboard {
    /// 6x4 squares.
    #[default]
    Cb6x4,
    /// 4x3 squares.
    Cb4x3,
    /// 4x3 squares, inverted.
    Cb4x3Not,
}

impl Checkerboard {
    /// Layouts in selection order.
    pub const ALL: [Checkerboard; 3] = [Checkerboard::Cb6x4, Checkerboard::Cb4x3, Checkerboard::Cb4x3Not];

    /// Steps through [`Checkerboard::ALL`], wrapping at both ends.
    pub fn step(self, forward: bool) -> Self {
        let n = Self::ALL.len();
        let i = self as usize;
        let j = if forward { (i + 1) % n } else { (i + n - 1) % n };
        Self::ALL[j]
    }

    /// (columns, rows).
    pub const fn grid(self) -> (u32, u32) {
        match self {
            Checkerboard::Cb6x4 => (6, 4),
            Checkerboard::Cb4x3 | Checkerboard::Cb4x3Not => (4, 3),
        }
    }
}

/// ST.2084 profile curve ladder.
///
/// Tiles 0..=2 (peak, black, near black) are always shown; above that the
/// ladder stops at the first code brighter than the panel can reach.
pub struct ProfileCurve;

impl ProfileCurve {
    /// 10-bit codes per tile.
    pub const CODES: [u16; 44] = [
        1023, 0, 8, 16, 24, 36, 48, 56, 64, 120, 156, 256, 340, 384, 452, 488, 520, 592, 616, 636, 660, 664, 668, 692,
        704, 708, 712, 728, 744, 756, 760, 764, 768, 788, 804, 808, 812, 828, 840, 844, 872, 892, 920, 1023,
    ];

    /// Index of the first tile always subject to the panel limit.
    const FIRST_LIMITED: usize = 3;

    /// Highest selectable tile for a panel whose peak encodes to `max_pq_code`.
    ///
    /// ```rust
    /// use hdrcal_sequencer::ProfileCurve;
    ///
    /// assert_eq!(ProfileCurve::max_tile(769.0), 33);
    /// assert_eq!(ProfileCurve::max_tile(1023.0), 43);
    /// assert_eq!(ProfileCurve::max_tile(0.0), 3);
    /// ```
    pub fn max_tile(max_pq_code: f32) -> usize {
        (Self::FIRST_LIMITED..Self::CODES.len())
            .find(|&i| Self::CODES[i] as f32 > max_pq_code)
            .unwrap_or(Self::CODES.len() - 1)
    }

    /// Code displayed on `tile`, limited to the panel peak.
    pub fn tile_code(tile: usize, max_pq_code: f32) -> f32 {
        let code = Self::CODES[tile.min(Self::CODES.len() - 1)] as f32;
        code.min(max_pq_code.max(0.0))
    }

    /// Luminance of `tile` in nits.
    pub fn tile_nits(tile: usize, max_pq_code: f32) -> f32 {
        pq::code_to_nits(Self::tile_code(tile, max_pq_code))
    }
}

/// Patches for the panel-primaries screens.
///
/// A panel whose reported primaries are degenerate (e.g. a zeroed
/// descriptor) falls back to sRGB so the screen still shows something
/// meaningful.
pub fn color_patches(native: &Primaries, nits: f32, slider_factor: f32) -> Vec<Patch> {
    let patches = match panel_patches(native, nits) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "panel primaries unusable, falling back to sRGB");
            match fallback_patches(nits) {
                Ok(p) => p,
                Err(_) => return Vec::new(),
            }
        }
    };
    debug!(nits, slider_factor, "color patches");
    patches
        .all()
        .iter()
        .map(|c| Patch::new(c.working, c.hdr10_codes(slider_factor)))
        .collect()
}

fn fallback_patches(nits: f32) -> Result<PanelPatches> {
    panel_patches(&SRGB, nits)
}

/// Red, green and blue bars in the working space at an SDR boost level.
pub fn rec709_patches(level_index: usize) -> Vec<Patch> {
    rec709_bars(level_index)
        .iter()
        .map(|&w| Patch::from_working(w))
        .collect()
}

/// BT.2020 primaries and white at the fixed saturation code.
pub fn bt2020_patches() -> Vec<Patch> {
    let code = BT2020_PRIMARY_CODE;
    let codes = [
        Vec3::new(code, 0.0, 0.0),
        Vec3::new(0.0, code, 0.0),
        Vec3::new(0.0, 0.0, code),
        Vec3::splat(code),
    ];
    bt2020_code_patches(code)
        .iter()
        .zip(codes)
        .map(|(&w, c)| Patch::new(w, c))
        .collect()
}
