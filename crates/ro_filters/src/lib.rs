
/// Pattern errors.
mod error;

/// The `SequenceFilter` trait and the combined `OligoFilters`.
mod filter;

/// GC content in percent.
mod gc_content;

/// Longest run of a single base.
mod homopolymer;

/// Forbidden sites on both strands, compiled once into a regex set.
mod forbidden_sites;

pub use error::*;
pub use filter::*;
pub use gc_content::*;
pub use homopolymer::*;
pub use forbidden_sites::*;

