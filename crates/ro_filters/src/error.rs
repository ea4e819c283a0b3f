use std::fmt;
use std::error::Error;

use ro_sequence::SequenceError;

#[derive(Debug)]
pub enum PatternError {
    Empty,                                   // "" would match every candidate
    NotReverseComplementable(String, usize), // pattern and offending byte offset
    InvalidLiteral(String, SequenceError),   // literal that is not plain DNA
    Compile(regex::Error),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Empty => {
                write!(f, "Forbidden pattern must not be empty")
            }
            PatternError::NotReverseComplementable(p, i) => {
                write!(f, "Cannot reverse complement pattern '{}': unsupported syntax at offset {}", p, i)
            }
            PatternError::InvalidLiteral(p, e) => {
                write!(f, "Literal pattern '{}' is not a DNA sequence: {}", p, e)
            }
            PatternError::Compile(e) => {
                write!(f, "Failed to compile forbidden patterns: {}", e)
            }
        }
    }
}

impl Error for PatternError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PatternError::InvalidLiteral(_, e) => Some(e),
            PatternError::Compile(e) => Some(e),
            _ => None,
        }
    }
}

impl From<regex::Error> for PatternError {
    fn from(e: regex::Error) -> Self { PatternError::Compile(e) }
}

