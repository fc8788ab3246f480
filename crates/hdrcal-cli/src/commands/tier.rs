//! Tier classification command.

use crate::TierArgs;
use anyhow::Result;
use hdrcal_display::Tier;
use hdrcal_display::tier::SAFETY_MARGIN;
use hdrcal_transfer::pq;

/// Runs the tier command.
pub fn run(args: TierArgs) -> Result<()> {
    for nits in args.nits {
        let tier = Tier::classify(nits);
        println!(
            "{:>10.2} nits  PQ {:>4.0}  -> {} (needs {:.0})",
            nits,
            pq::nits_to_code(nits),
            tier,
            tier.threshold() as f64 * SAFETY_MARGIN
        );
    }
    Ok(())
}
