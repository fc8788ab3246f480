//! CLI command implementations

pub mod coverage;
pub mod info;
pub mod metadata;
pub mod run;
pub mod tier;

use crate::ProfileArg;
use crate::config::Profile;
use anyhow::Result;
use hdrcal_display::CalibrationState;

/// Loads the profile and queries it once, the way the sequencer would.
pub fn load_state(arg: &ProfileArg) -> Result<(Profile, CalibrationState)> {
    let profile = Profile::load(arg.profile.as_deref())?;
    let mut provider = profile.provider();
    let mut state = CalibrationState::new();
    state.update(&mut provider);
    state.init_effective_values();
    Ok((profile, state))
}

/// Formats a chromaticity pair.
pub fn format_xy(xy: (f32, f32)) -> String {
    format!("({:.4}, {:.4})", xy.0, xy.1)
}
