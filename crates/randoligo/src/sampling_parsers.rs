use std::path::PathBuf;
use clap::Args;
use chrono::NaiveDateTime;
use log::debug;

use ro_sampling::SamplerConfig;
use ro_sampling::timestamped_filename;
use ro_sampling::{DEFAULT_LENGTH, DEFAULT_TARGET, DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED, DEFAULT_PREFIX};

use crate::filter_parsers::FilterArguments;

#[derive(Debug, Args)]
pub struct SamplingArguments {
    /// Length of every sequence (N).
    #[arg(short = 'n', long, default_value_t = DEFAULT_LENGTH)]
    pub length: usize,

    /// Number of sequences to generate (M).
    #[arg(short = 'm', long, default_value_t = DEFAULT_TARGET)]
    pub count: usize,

    /// Give up after this many random candidates.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Seed of the random number generator.
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

impl SamplingArguments {
    pub fn build_config(&self, filters: &FilterArguments) -> SamplerConfig {
        let config = SamplerConfig {
            length: self.length,
            target: self.count,
            gc_min: filters.gc_min,
            gc_max: filters.gc_max,
            max_homopolymer: filters.max_homopolymer,
            forbidden: filters.patterns(),
            max_attempts: self.max_attempts,
            seed: self.seed,
        };
        debug!("{:?}", config);
        config
    }
}

#[derive(Debug, Args)]
pub struct OutputArguments {
    /// Output table (defaults to <PREFIX><yymmddHHMMSS>.csv).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Prefix of the timestamped default output file.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Keep sequences in memory and write the table once at the end.
    #[arg(long)]
    pub buffered: bool,

    /// Store configuration and run statistics in this JSON file.
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,
}

impl OutputArguments {
    pub fn output_path(&self, now: &NaiveDateTime) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => PathBuf::from(timestamped_filename(&self.prefix, now)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use chrono::NaiveDate;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        sampling: SamplingArguments,
        #[command(flatten)]
        filters: FilterArguments,
        #[command(flatten)]
        output: OutputArguments,
    }

    #[test]
    fn test_default_config() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        let config = cli.sampling.build_config(&cli.filters);
        assert_eq!(config, SamplerConfig::default());
    }

    #[test]
    fn test_config_from_args() {
        let cli = TestCli::try_parse_from([
            "test", "-n", "20", "-m", "5", "--gc-min", "40", "--gc-max", "60",
            "--max-homopolymer", "6", "-f", "GAAGAC", "--seed", "7", "--max-attempts", "1000",
        ]).unwrap();
        let config = cli.sampling.build_config(&cli.filters);
        assert_eq!(config.length, 20);
        assert_eq!(config.target, 5);
        assert_eq!(config.forbidden.len(), 1);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_attempts, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_path() {
        let now = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
            .and_hms_opt(23, 59, 58).unwrap();

        let cli = TestCli::try_parse_from(["test"]).unwrap();
        assert_eq!(cli.output.output_path(&now), PathBuf::from("RandomNucleotides241231235958.csv"));

        let cli = TestCli::try_parse_from(["test", "--prefix", "lib_"]).unwrap();
        assert_eq!(cli.output.output_path(&now), PathBuf::from("lib_241231235958.csv"));

        let cli = TestCli::try_parse_from(["test", "-o", "out.csv", "--buffered"]).unwrap();
        assert_eq!(cli.output.output_path(&now), PathBuf::from("out.csv"));
        assert!(cli.output.buffered);
    }
}
