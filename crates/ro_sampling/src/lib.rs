//! # ro_sampling
//!
//! Rejection sampling of random oligonucleotides: draw a uniform candidate,
//! test it against [`ro_filters::OligoFilters`], keep or discard it, until
//! enough sequences are found or the attempt budget runs out.

/// Validated, serializable run configuration.
pub mod config;

/// Where accepted sequences go: CSV tables or memory.
pub mod sink;

/// Outcome and statistics of a run.
pub mod report;

mod generator;
mod sampler;

pub use config::*;
pub use sink::*;
pub use report::*;
pub use generator::*;
pub use sampler::*;

