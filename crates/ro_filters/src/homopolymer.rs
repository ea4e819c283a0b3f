use ro_sequence::Base;

use crate::Rejection;
use crate::SequenceFilter;

/// Length of the longest run of one repeated base (0 for an empty sequence).
pub fn longest_homopolymer(sequence: &[Base]) -> usize {
    let mut iter = sequence.iter();
    let Some(mut last) = iter.next() else {
        return 0;
    };

    let mut best = 1;
    let mut run = 1;
    for b in iter {
        if b == last {
            run += 1;
            best = best.max(run);
        } else {
            run = 1;
            last = b;
        }
    }
    best
}

/// Upper bound on the longest homopolymer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomopolymerLimit {
    max_run: usize,
}

impl HomopolymerLimit {
    pub fn new(max_run: usize) -> Self {
        Self { max_run }
    }

    pub fn max_run(&self) -> usize {
        self.max_run
    }
}

impl SequenceFilter for HomopolymerLimit {
    fn rejection(&self) -> Rejection {
        Rejection::Homopolymer
    }

    fn accepts(&self, sequence: &[Base]) -> bool {
        longest_homopolymer(sequence) <= self.max_run
    }
}
