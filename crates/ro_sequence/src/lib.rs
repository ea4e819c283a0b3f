
/// Base, NucleotideVec, reverse complement, ....
mod nucleotides;

pub use nucleotides::*;

