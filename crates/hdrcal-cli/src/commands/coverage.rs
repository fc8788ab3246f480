//! Gamut coverage command.

use super::{format_xy, load_state};
use crate::CoverageArgs;
use anyhow::{Result, bail};
use hdrcal_primaries::{CoverageReport, gamut_area};

/// Runs the coverage command.
pub fn run(args: CoverageArgs) -> Result<()> {
    let (profile, state) = load_state(&args.profile)?;
    let panel = state.native_primaries();
    if gamut_area(&panel) <= 0.0 {
        bail!("profile '{}' has no usable primaries", profile.name);
    }

    let report = CoverageReport::for_panel(&panel);
    println!("Panel primaries: R{} G{} B{}", format_xy(panel.r), format_xy(panel.g), format_xy(panel.b));
    println!("  u'v' area:         {:.5}", report.area);
    println!("  Visible locus:     {:.1}%", report.visible_fraction * 100.0);
    for (name, coverage) in &report.coverage {
        println!("  {:<18} {:.1}%", format!("{name}:"), coverage * 100.0);
    }
    Ok(())
}
