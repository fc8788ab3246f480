//! Display info command.
//!
//! Prints the raw and adjusted descriptors plus everything the calibration
//! state derives from them.

use super::{format_xy, load_state};
use crate::InfoArgs;
use anyhow::Result;
use hdrcal_display::DisplayDescriptor;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    let (profile, state) = load_state(&args.profile)?;

    println!("Profile:      {}", profile.name);
    if profile.info.is_none() {
        println!("  No active display; OS default luminances in use");
    }
    print_descriptor("Raw", state.raw(), verbose);
    print_descriptor("Adjusted", state.adjusted(), verbose);

    println!("Calibration");
    println!("  Color mode:      {}", state.color_mode());
    println!("  Testing tier:    {} ({} nits)", state.tier(), state.tier().luminance());
    println!("  Max PQ code:     {:.0}", state.max_pq_code());
    println!("  Slider factor:   {:.3}", state.slider_factor());
    println!("  Static contrast: {:.1}", state.static_contrast);
    if let Some(e) = state.effective() {
        println!(
            "  Effective:       max {:.1} / full frame {:.1} / min {:.1}",
            e.max, e.max_full_frame, e.min
        );
    }
    if state.defaults_in_use() {
        println!("  Warning: luminances are OS defaults, results may be meaningless");
    }
    Ok(())
}

fn print_descriptor(label: &str, d: &DisplayDescriptor, verbose: bool) {
    println!("{label}");
    println!("  Max luminance:   {:.2} nits", d.max_luminance);
    println!("  Full frame:      {:.2} nits", d.max_full_frame_luminance);
    println!("  Min luminance:   {:.4} nits", d.min_luminance);
    println!("  Color space:     {}", d.color_space);
    if verbose {
        println!("  Red:             {}", format_xy(d.red));
        println!("  Green:           {}", format_xy(d.green));
        println!("  Blue:            {}", format_xy(d.blue));
        println!("  White:           {}", format_xy(d.white));
        println!("  Bits per color:  {}", d.bits_per_color);
        println!("  Device:          {} ({})", d.monitor_name, d.device_name);
        println!("  Connection:      {}", d.connection);
        println!("  Resolution:      {}x{}", d.resolution.0, d.resolution.1);
    }
}
