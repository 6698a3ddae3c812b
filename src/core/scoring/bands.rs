// Piecewise threshold tables mapping a measurement to a sub-score

/// Slack on both ends of a band. Angles come out of `acos` and can land a few
/// ulps past an inclusive edge the landmarks sit exactly on.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Closed interval `[min, max]` worth `score`
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub min: f64,
    pub max: f64,
    pub score: u8,
}

impl Band {
    pub const fn new(min: f64, max: f64, score: u8) -> Self {
        Self { min, max, score }
    }

    fn contains(&self, value: f64) -> bool {
        value >= self.min - EDGE_TOLERANCE && value <= self.max + EDGE_TOLERANCE
    }
}

/// Nested bands, tightest first. A value takes the score of the first band
/// containing it, so `[50,100]` followed by `[40,115]` gives the second score
/// to `[40,50)` and `(100,115]`.
#[derive(Debug, Clone, Copy)]
pub struct BandTable {
    bands: &'static [Band],
    fallback: u8,
}

impl BandTable {
    pub const fn new(bands: &'static [Band], fallback: u8) -> Self {
        Self { bands, fallback }
    }

    pub fn score(&self, value: f64) -> u8 {
        self.bands
            .iter()
            .find(|band| band.contains(value))
            .map(|band| band.score)
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: BandTable = BandTable::new(
        &[Band::new(50.0, 100.0, 100), Band::new(40.0, 115.0, 85)],
        40,
    );

    #[test]
    fn test_inner_band_wins() {
        assert_eq!(TABLE.score(50.0), 100);
        assert_eq!(TABLE.score(75.0), 100);
        assert_eq!(TABLE.score(100.0), 100);
    }

    #[test]
    fn test_outer_band_both_sides() {
        assert_eq!(TABLE.score(49.9), 85);
        assert_eq!(TABLE.score(40.0), 85);
        assert_eq!(TABLE.score(100.1), 85);
        assert_eq!(TABLE.score(115.0), 85);
    }

    #[test]
    fn test_edges_absorb_rounding() {
        assert_eq!(TABLE.score(100.000_000_000_000_03), 100);
        assert_eq!(TABLE.score(49.999_999_999_999_99), 100);
        assert_eq!(TABLE.score(115.000_01), 40);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(TABLE.score(39.9), 40);
        assert_eq!(TABLE.score(115.1), 40);
        assert_eq!(TABLE.score(f64::NAN), 40);
    }
}
