//! # randoligo
//!
//! Random DNA oligonucleotides that respect GC content, homopolymer and
//! forbidden-site constraints.
//!
//! This crate re-exports the main functionality from its submodules.

pub mod input_parsers;
pub mod filter_parsers;
pub mod sampling_parsers;

pub mod sequence {
    pub use ::ro_sequence::*;
}

pub mod filters {
    pub use ::ro_filters::*;
}

pub mod sampling {
    pub use ::ro_sampling::*;
}

