//! Renderer working space.
//!
//! The render layer takes linear values where 1.0 is [`WORKING_WHITE_NITS`],
//! the scRGB convention. HDR patches above 80 nits are therefore > 1.0.

/// Luminance of working-space 1.0.
pub const WORKING_WHITE_NITS: f32 = 80.0;

/// Nits to working-space linear.
#[inline]
pub fn nits_to_working(nits: f32) -> f32 {
    nits / WORKING_WHITE_NITS
}

/// Working-space linear to nits.
#[inline]
pub fn working_to_nits(v: f32) -> f32 {
    v * WORKING_WHITE_NITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_white() {
        assert_eq!(nits_to_working(80.0), 1.0);
        assert_eq!(working_to_nits(12.5), 1000.0);
    }
}
