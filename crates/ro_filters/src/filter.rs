use std::fmt;
use serde::{Serialize, Deserialize};
use ro_sequence::Base;

use crate::GcContent;
use crate::HomopolymerLimit;
use crate::ForbiddenSites;

/// Which filter turned a candidate down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    GcContent,
    Homopolymer,
    ForbiddenSite,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::GcContent => "GC content",
            Rejection::Homopolymer => "homopolymer run",
            Rejection::ForbiddenSite => "forbidden site",
        };
        write!(f, "{}", s)
    }
}

/// A stateless acceptance predicate on a whole candidate.
pub trait SequenceFilter {
    fn rejection(&self) -> Rejection;

    fn accepts(&self, sequence: &[Base]) -> bool;

    /// `None` if accepted, otherwise the reason.
    fn check(&self, sequence: &[Base]) -> Option<Rejection> {
        if self.accepts(sequence) {
            None
        } else {
            Some(self.rejection())
        }
    }
}

/// The three oligo filters, evaluated cheapest first.
///
/// The order only affects which [`Rejection`] is reported for a candidate
/// that fails several filters; acceptance is the conjunction of all three.
#[derive(Debug, Clone)]
pub struct OligoFilters {
    gc: GcContent,
    homopolymer: HomopolymerLimit,
    sites: ForbiddenSites,
}

impl OligoFilters {
    pub fn new(gc: GcContent, homopolymer: HomopolymerLimit, sites: ForbiddenSites) -> Self {
        Self { gc, homopolymer, sites }
    }

    pub fn gc(&self) -> &GcContent {
        &self.gc
    }

    pub fn homopolymer(&self) -> &HomopolymerLimit {
        &self.homopolymer
    }

    pub fn sites(&self) -> &ForbiddenSites {
        &self.sites
    }

    pub fn first_rejection(&self, sequence: &[Base]) -> Option<Rejection> {
        self.gc.check(sequence)
            .or_else(|| self.homopolymer.check(sequence))
            .or_else(|| self.sites.check(sequence))
    }

    pub fn accepts(&self, sequence: &[Base]) -> bool {
        self.first_rejection(sequence).is_none()
    }
}
