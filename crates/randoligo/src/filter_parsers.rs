use clap::Args;
use log::debug;
use ro_filters::ForbiddenPattern;
use ro_filters::ForbiddenSites;
use ro_filters::GcContent;
use ro_filters::HomopolymerLimit;
use ro_filters::OligoFilters;
use ro_filters::PatternError;
use ro_sampling::{DEFAULT_GC_MIN, DEFAULT_GC_MAX, DEFAULT_MAX_HOMOPOLYMER, DEFAULT_FORBIDDEN};

/// Acceptance filter parameters.
#[derive(Debug, Args)]
pub struct FilterArguments {
    /// Minimum GC content in percent (inclusive).
    #[arg(long, default_value_t = DEFAULT_GC_MIN)]
    pub gc_min: u8,

    /// Maximum GC content in percent (inclusive).
    #[arg(long, default_value_t = DEFAULT_GC_MAX)]
    pub gc_max: u8,

    /// Longest allowed run of a single nucleotide.
    #[arg(long, default_value_t = DEFAULT_MAX_HOMOPOLYMER)]
    pub max_homopolymer: usize,

    /// Sites forbidden on both strands (regex by default, or "literal:SITE").
    #[arg(short, long, value_name = "SITE", num_args = 1..,
        default_values_t = DEFAULT_FORBIDDEN.map(String::from))]
    pub forbidden: Vec<String>,

    /// Do not check for any forbidden sites.
    #[arg(long, conflicts_with = "forbidden")]
    pub no_forbidden: bool,
}

impl FilterArguments {
    pub fn patterns(&self) -> Vec<ForbiddenPattern> {
        if self.no_forbidden {
            return Vec::new();
        }
        self.forbidden.iter().map(|s| ForbiddenPattern::from(s.as_str())).collect()
    }

    pub fn build_filters(&self) -> Result<OligoFilters, PatternError> {
        debug!("GC content: {}..={} %", self.gc_min, self.gc_max);
        debug!("Max homopolymer: {}", self.max_homopolymer);
        Ok(OligoFilters::new(
            GcContent::new(self.gc_min, self.gc_max),
            HomopolymerLimit::new(self.max_homopolymer),
            ForbiddenSites::new(&self.patterns())?,
        ))
    }
}
