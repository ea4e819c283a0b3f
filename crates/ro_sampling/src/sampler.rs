use rand::Rng;
use log::{debug, info, warn};

use ro_sequence::NucleotideVec;
use ro_filters::OligoFilters;

use crate::ConfigError;
use crate::SamplerConfig;
use crate::MemorySink;
use crate::SequenceSink;
use crate::SinkError;
use crate::RejectionCounts;
use crate::RunOutcome;
use crate::RunReport;
use crate::random_sequence;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SamplerState {
    Sampling,
    Accepting(NucleotideVec),
    Exhausted,
    Done,
}

/// Draws random candidates until `target` pass all filters or
/// `max_attempts` candidates have been drawn.
///
/// Construction validates the configuration and compiles the filters, so a
/// sampler that exists can run. Accepted sequences go to the sink as soon
/// as they are found, and the sink is finished on both terminal states.
#[derive(Debug)]
pub struct RejectionSampler<'a> {
    config: &'a SamplerConfig,
    filters: OligoFilters,
}

impl<'a> RejectionSampler<'a> {
    pub fn new(config: &'a SamplerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let filters = config.build_filters()?;
        Ok(Self { config, filters })
    }

    pub fn config(&self) -> &SamplerConfig {
        self.config
    }

    pub fn filters(&self) -> &OligoFilters {
        &self.filters
    }

    /// Run to completion; `on_accept` sees the running count and each
    /// accepted sequence right after it was appended to the sink.
    pub fn run<R, S, F>(
        &self,
        rng: &mut R,
        sink: &mut S,
        mut on_accept: F,
    ) -> Result<RunReport, SinkError>
    where
        R: Rng,
        S: SequenceSink,
        F: FnMut(usize, &NucleotideVec),
    {
        let mut attempts = 0;
        let mut accepted = 0;
        let mut rejections = RejectionCounts::default();

        let mut state = SamplerState::Sampling;
        let outcome = loop {
            state = match state {
                SamplerState::Sampling if accepted >= self.config.target => SamplerState::Done,
                SamplerState::Sampling if attempts >= self.config.max_attempts => SamplerState::Exhausted,
                SamplerState::Sampling => {
                    attempts += 1;
                    let candidate = random_sequence(rng, self.config.length);
                    match self.filters.first_rejection(&candidate) {
                        None => SamplerState::Accepting(candidate),
                        Some(r) => {
                            rejections.record(r);
                            SamplerState::Sampling
                        }
                    }
                }
                SamplerState::Accepting(candidate) => {
                    sink.append(&candidate)?;
                    accepted += 1;
                    info!("{}", candidate);
                    on_accept(accepted, &candidate);
                    SamplerState::Sampling
                }
                SamplerState::Done => break RunOutcome::Done,
                SamplerState::Exhausted => break RunOutcome::Exhausted,
            };
        };

        sink.finish()?;

        if outcome == RunOutcome::Exhausted {
            warn!("Attempt budget exhausted: {} of {} sequences after {} attempts",
                accepted, self.config.target, attempts);
        }
        debug!("Rejections: {:?}", rejections);

        Ok(RunReport {
            outcome,
            target: self.config.target,
            accepted,
            attempts,
            max_attempts: self.config.max_attempts,
            seed: self.config.seed,
            rejections,
        })
    }

    /// Run into memory and return the accepted sequences with the report.
    pub fn collect<R: Rng>(&self, rng: &mut R) -> Result<(Vec<NucleotideVec>, RunReport), SinkError> {
        let mut sink = MemorySink::new();
        let report = self.run(rng, &mut sink, |_, _| {})?;
        Ok((sink.into_inner(), report))
    }
}
