//! Metadata command.

use super::load_state;
use crate::MetadataArgs;
use anyhow::Result;
use hdrcal_metadata::{Hdr10Metadata, build_metadata, build_neutral_metadata};

/// Runs the metadata command.
pub fn run(args: MetadataArgs) -> Result<()> {
    let (_, state) = load_state(&args.profile)?;
    let md = if args.neutral {
        build_neutral_metadata(state.raw())
    } else {
        build_metadata(args.peak, args.avg, args.gamut.into(), &state.native_primaries())
    };
    print_metadata(&md);
    Ok(())
}

/// Prints the fields in their encoded form.
pub fn print_metadata(md: &Hdr10Metadata) {
    println!("MaxCLL:            {}", md.max_cll);
    println!("MaxFALL:           {}", md.max_fall);
    println!("Mastering max:     {}", md.max_mastering);
    println!("Mastering min:     {}", md.min_mastering);
    println!("Red:               {:?}", md.red);
    println!("Green:             {:?}", md.green);
    println!("Blue:              {:?}", md.blue);
    println!("White:             {:?}", md.white);
}
