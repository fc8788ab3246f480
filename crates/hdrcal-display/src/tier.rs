//! DisplayHDR testing tiers.
//!
//! The tier is guessed from the panel's raw peak luminance. Each published
//! threshold is relaxed by [`SAFETY_MARGIN`] so that a 1000 nit panel
//! measuring 975 nits still lands in DisplayHDR 1000. Tiers are scanned from
//! brightest to dimmest and the first match wins; anything below every
//! threshold is DisplayHDR 400.

use std::fmt;

/// Fraction of the published threshold a panel must reach.
pub const SAFETY_MARGIN: f64 = 0.97;

/// DisplayHDR certification tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[allow(missing_docs)]
pub enum Tier {
    #[default]
    Hdr400,
    Hdr500,
    Hdr600,
    Hdr1000,
    Hdr1400,
    Hdr2000,
    Hdr3000,
    Hdr4000,
    Hdr6000,
    Hdr10000,
}

impl Tier {
    /// All tiers, dimmest first.
    pub const ALL: [Tier; 10] = [
        Tier::Hdr400,
        Tier::Hdr500,
        Tier::Hdr600,
        Tier::Hdr1000,
        Tier::Hdr1400,
        Tier::Hdr2000,
        Tier::Hdr3000,
        Tier::Hdr4000,
        Tier::Hdr6000,
        Tier::Hdr10000,
    ];

    /// Published peak-luminance threshold in nits.
    pub const fn threshold(self) -> f32 {
        match self {
            Tier::Hdr400 => 400.0,
            Tier::Hdr500 => 500.0,
            Tier::Hdr600 => 600.0,
            Tier::Hdr1000 => 1000.0,
            Tier::Hdr1400 => 1400.0,
            Tier::Hdr2000 => 2000.0,
            Tier::Hdr3000 => 3000.0,
            Tier::Hdr4000 => 4000.0,
            Tier::Hdr6000 => 6000.0,
            Tier::Hdr10000 => 10000.0,
        }
    }

    /// Nominal test luminance for the tier.
    ///
    /// DisplayHDR 1000 tests at 1015.27 nits, PQ code 770.
    pub const fn luminance(self) -> f32 {
        match self {
            Tier::Hdr1000 => 1015.27,
            other => other.threshold(),
        }
    }

    /// Classifies a raw peak luminance.
    ///
    /// ```rust
    /// use hdrcal_display::Tier;
    ///
    /// assert_eq!(Tier::classify(971.0), Tier::Hdr1000);
    /// assert_eq!(Tier::classify(969.0), Tier::Hdr600);
    /// assert_eq!(Tier::classify(0.0), Tier::Hdr400);
    /// ```
    pub fn classify(raw_max_luminance: f32) -> Self {
        let nits = raw_max_luminance as f64;
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|t| nits >= SAFETY_MARGIN * t.threshold() as f64)
            .unwrap_or(Tier::Hdr400)
    }

    /// Position in [`Tier::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Tier at `index`, clamped to the valid range.
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.clamp(0, Self::ALL.len() as i64 - 1) as usize]
    }

    /// Name as printed on the certification logo.
    pub const fn name(self) -> &'static str {
        match self {
            Tier::Hdr400 => "DisplayHDR400",
            Tier::Hdr500 => "DisplayHDR500",
            Tier::Hdr600 => "DisplayHDR600",
            Tier::Hdr1000 => "DisplayHDR1000",
            Tier::Hdr1400 => "DisplayHDR1400",
            Tier::Hdr2000 => "DisplayHDR2000",
            Tier::Hdr3000 => "DisplayHDR3000",
            Tier::Hdr4000 => "DisplayHDR4000",
            Tier::Hdr6000 => "DisplayHDR6000",
            Tier::Hdr10000 => "DisplayHDR10000",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
