use std::fmt;
use std::error::Error;
use std::ops::RangeInclusive;
use serde::{Serialize, Deserialize};

use ro_filters::ForbiddenPattern;
use ro_filters::ForbiddenSites;
use ro_filters::GcContent;
use ro_filters::HomopolymerLimit;
use ro_filters::OligoFilters;
use ro_filters::PatternError;

pub const LENGTH_RANGE: RangeInclusive<usize> = 2..=9999;
pub const TARGET_RANGE: RangeInclusive<usize> = 1..=9999;

pub const DEFAULT_LENGTH: usize = 61;
pub const DEFAULT_TARGET: usize = 1;
pub const DEFAULT_GC_MIN: u8 = 40;
pub const DEFAULT_GC_MAX: u8 = 60;
pub const DEFAULT_MAX_HOMOPOLYMER: usize = 6;
pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;
pub const DEFAULT_SEED: u64 = 0;
/// Type IIS sites, BbsI (GAAGAC) and BsaI (GGTCTC) among them.
pub const DEFAULT_FORBIDDEN: [&str; 3] = ["GAAGAC", "GGTCTC", "CACCTCGC"];

#[derive(Debug)]
pub enum ConfigError {
    Length(usize),
    Target(usize),
    GcOrder { min: u8, max: u8 },
    GcMinTooLow(u8),
    GcMaxTooHigh(u8),
    Homopolymer(usize),
    AttemptBudget,
    Pattern(PatternError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(n) => write!(f, "Sequence length {} is outside of {}..={}",
                n, LENGTH_RANGE.start(), LENGTH_RANGE.end()),
            Self::Target(m) => write!(f, "Number of sequences {} is outside of {}..={}",
                m, TARGET_RANGE.start(), TARGET_RANGE.end()),
            Self::GcOrder { min, max } =>
                write!(f, "GC minimum ({min}%) must be less than GC maximum ({max}%)"),
            Self::GcMinTooLow(min) =>
                write!(f, "GC minimum ({min}%) must be greater than 0%"),
            Self::GcMaxTooHigh(max) =>
                write!(f, "GC maximum ({max}%) must be less than 100%"),
            Self::Homopolymer(h) =>
                write!(f, "Maximum homopolymer length ({h}) must be at least 1"),
            Self::AttemptBudget =>
                write!(f, "Attempt budget must allow at least one candidate"),
            Self::Pattern(e) => write!(f, "{}", e),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PatternError> for ConfigError {
    fn from(e: PatternError) -> Self { Self::Pattern(e) }
}

/// Everything that defines one sampling run.
///
/// Two runs with equal configurations (seed included) produce the same
/// sequences in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Length N of every sequence.
    pub length: usize,
    /// Number M of sequences to accept.
    pub target: usize,
    /// Inclusive GC percentage window.
    pub gc_min: u8,
    pub gc_max: u8,
    pub max_homopolymer: usize,
    /// Sites forbidden on either strand.
    pub forbidden: Vec<ForbiddenPattern>,
    /// Total number of candidates drawn before giving up.
    pub max_attempts: usize,
    pub seed: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            target: DEFAULT_TARGET,
            gc_min: DEFAULT_GC_MIN,
            gc_max: DEFAULT_GC_MAX,
            max_homopolymer: DEFAULT_MAX_HOMOPOLYMER,
            forbidden: DEFAULT_FORBIDDEN.iter().map(|&s| ForbiddenPattern::from(s)).collect(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: DEFAULT_SEED,
        }
    }
}

impl SamplerConfig {
    /// Check the numeric bounds, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LENGTH_RANGE.contains(&self.length) {
            return Err(ConfigError::Length(self.length));
        }
        if !TARGET_RANGE.contains(&self.target) {
            return Err(ConfigError::Target(self.target));
        }
        if self.gc_min >= self.gc_max {
            return Err(ConfigError::GcOrder { min: self.gc_min, max: self.gc_max });
        }
        if self.gc_min == 0 {
            return Err(ConfigError::GcMinTooLow(self.gc_min));
        }
        if self.gc_max >= 100 {
            return Err(ConfigError::GcMaxTooHigh(self.gc_max));
        }
        if self.max_homopolymer < 1 {
            return Err(ConfigError::Homopolymer(self.max_homopolymer));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::AttemptBudget);
        }
        Ok(())
    }

    /// Compile the filters; forbidden sites are expanded by their reverse
    /// complements here, once per run.
    pub fn build_filters(&self) -> Result<OligoFilters, ConfigError> {
        Ok(OligoFilters::new(
            GcContent::new(self.gc_min, self.gc_max),
            HomopolymerLimit::new(self.max_homopolymer),
            ForbiddenSites::new(&self.forbidden)?,
        ))
    }
}
