use std::fmt;
use std::borrow::Borrow;
use std::ops::Deref;
use std::str::FromStr;

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::StandardUniform;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    InvalidChar(char, usize),
    Empty,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::InvalidChar(c, i) => {
                write!(f, "Unsupported nucleotide '{}' at position {}", c, i)
            }
            SequenceError::Empty => {
                write!(f, "Empty nucleotide sequence")
            }
        }
    }
}

impl std::error::Error for SequenceError {}


#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Base { A, C, G, T }
pub const BCOUNT: usize = 4; // 4 Base variants, the order of random draws.

impl Base {
    pub const ALL: [Base; BCOUNT] = [Base::A, Base::C, Base::G, Base::T];

    /// Watson-Crick complement: A<->T, C<->G.
    pub fn complement(self) -> Base {
        match self {
            Base::A => Base::T,
            Base::C => Base::G,
            Base::G => Base::C,
            Base::T => Base::A,
        }
    }

    pub fn is_gc(self) -> bool {
        matches!(self, Base::G | Base::C)
    }
}

impl TryFrom<char> for Base {
    type Error = SequenceError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Base::A),
            'C' => Ok(Base::C),
            'G' => Ok(Base::G),
            'T' => Ok(Base::T),
            _ => Err(SequenceError::InvalidChar(c, 0)),
        }
    }
}

impl From<Base> for char {
    fn from(b: Base) -> Self {
        match b {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
        }
    }
}

impl From<Base> for u8 {
    fn from(b: Base) -> Self {
        char::from(b) as u8
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

/// Uniform draw over {A, C, G, T}, so `rng.random::<Base>()` just works.
impl Distribution<Base> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Base {
        Base::ALL[rng.random_range(0..BCOUNT)]
    }
}


#[derive(Clone, Hash, Debug, Eq, PartialEq, Default)]
pub struct NucleotideVec(pub Vec<Base>);

impl Deref for NucleotideVec {
    type Target = [Base];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<[Base]> for NucleotideVec {
    fn borrow(&self) -> &[Base] {
        &self.0
    }
}

impl FromIterator<Base> for NucleotideVec {
    fn from_iter<I: IntoIterator<Item = Base>>(iter: I) -> Self {
        NucleotideVec(iter.into_iter().collect())
    }
}

impl TryFrom<&str> for NucleotideVec {
    type Error = SequenceError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut vec = Vec::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            match Base::try_from(c) {
                Ok(b) => vec.push(b),
                Err(SequenceError::InvalidChar(c, _)) => {
                    return Err(SequenceError::InvalidChar(c, i));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(NucleotideVec(vec))
    }
}

impl FromStr for NucleotideVec {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NucleotideVec::try_from(s)
    }
}

impl fmt::Display for NucleotideVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.0 {
            write!(f, "{}", base)?;
        }
        Ok(())
    }
}

impl NucleotideVec {
    /// ASCII text of the sequence, one byte per base.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().map(|&b| u8::from(b)).collect()
    }

    pub fn reverse_complement(&self) -> NucleotideVec {
        reverse_complement(&self.0)
    }

    pub fn gc_count(&self) -> usize {
        gc_count(&self.0)
    }
}

/// Reverse the order and complement every base.
pub fn reverse_complement(sequence: &[Base]) -> NucleotideVec {
    sequence.iter().rev().map(|b| b.complement()).collect()
}

/// Number of G and C bases.
pub fn gc_count(sequence: &[Base]) -> usize {
    sequence.iter().filter(|b| b.is_gc()).count()
}
