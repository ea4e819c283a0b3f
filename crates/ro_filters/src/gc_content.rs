use ro_sequence::Base;
use ro_sequence::gc_count;

use crate::Rejection;
use crate::SequenceFilter;

/// GC content as an integer percentage.
///
/// Halves round to the nearest even integer (12.5 -> 12, 13.5 -> 14), which
/// decides acceptance for lengths where a bound is hit exactly on a half.
/// An empty sequence has 0%.
pub fn gc_percent(sequence: &[Base]) -> u8 {
    if sequence.is_empty() {
        return 0;
    }
    let pct = (100 * gc_count(sequence)) as f64 / sequence.len() as f64;
    pct.round_ties_even() as u8
}

/// Inclusive GC percentage window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GcContent {
    min: u8,
    max: u8,
}

impl GcContent {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }
}

impl SequenceFilter for GcContent {
    fn rejection(&self) -> Rejection {
        Rejection::GcContent
    }

    fn accepts(&self, sequence: &[Base]) -> bool {
        (self.min..=self.max).contains(&gc_percent(sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ro_sequence::NucleotideVec;

    fn seq(s: &str) -> NucleotideVec {
        NucleotideVec::try_from(s).unwrap()
    }

    #[test]
    fn test_gc_percent() {
        assert_eq!(gc_percent(&seq("AAAA")), 0);
        assert_eq!(gc_percent(&seq("GCGC")), 100);
        assert_eq!(gc_percent(&seq("ACGT")), 50);
        assert_eq!(gc_percent(&seq("ACG")), 67);
        assert_eq!(gc_percent(&[]), 0);
    }

    #[test]
    fn test_gc_percent_rounds_half_to_even() {
        // 1/8 = 12.5% and 3/8 = 37.5%
        assert_eq!(gc_percent(&seq("GAAAAAAA")), 12);
        assert_eq!(gc_percent(&seq("GCGAAAAA")), 38);
        // 27/200 = 13.5%
        let s = format!("{}{}", "G".repeat(27), "A".repeat(173));
        assert_eq!(gc_percent(&seq(&s)), 14);
        // 1/40 = 2.5%
        let s = format!("C{}", "T".repeat(39));
        assert_eq!(gc_percent(&seq(&s)), 2);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let filter = GcContent::new(40, 60);
        // 4 of 10 -> 40%
        assert!(filter.accepts(&seq("GGCCAAAATT")));
        // 6 of 10 -> 60%
        assert!(filter.accepts(&seq("GGCCGCAATT")));
        // 3 of 10 -> 30%
        assert!(!filter.accepts(&seq("GGCAAAAATT")));
        // 7 of 10 -> 70%
        assert!(!filter.accepts(&seq("GGCCGCCATT")));
    }

    #[test]
    fn test_rounding_decides_boundary() {
        // 5 of 8 = 62.5% rounds to 62, accepted by [40, 62].
        let filter = GcContent::new(40, 62);
        assert!(filter.accepts(&seq("GGGCCAAT")));
        // 7 of 20 = 35%, 29 of 80 = 36.25% -> 36
        let filter = GcContent::new(36, 60);
        assert!(!filter.accepts(&seq(&format!("{}{}", "G".repeat(7), "A".repeat(13)))));
        assert!(filter.accepts(&seq(&format!("{}{}", "G".repeat(29), "A".repeat(51)))));
    }
}
