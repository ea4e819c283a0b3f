use std::io::Write;
use clap::Parser;
use clap::ArgAction;
use colored::*;
use anyhow::Result;
use env_logger::Builder;
use chrono::Local;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use rand::SeedableRng;
use rand::rngs::StdRng;

use ro_sequence::NucleotideVec;
use ro_sampling::CsvSink;
use ro_sampling::MemorySink;
use ro_sampling::RejectionSampler;
use ro_sampling::RunSummary;

use randoligo::filter_parsers::FilterArguments;
use randoligo::sampling_parsers::SamplingArguments;
use randoligo::sampling_parsers::OutputArguments;

#[derive(Debug, Parser)]
#[command(name = "ro-generate")]
#[command(version, about = "Generate random DNA oligos by rejection sampling")]
pub struct Cli {
    #[command(flatten, next_help_heading = "Sampling parameters")]
    sampling: SamplingArguments,

    #[command(flatten, next_help_heading = "Filter parameters")]
    filters: FilterArguments,

    #[command(flatten, next_help_heading = "Output")]
    output: OutputArguments,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            // no prefix, just the message
            writeln!(buf, "{}", record.args())
        })
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Nothing is written before the configuration is known to be valid.
    let config = cli.sampling.build_config(&cli.filters);
    let sampler = RejectionSampler::new(&config)?;

    println!("{}", "Parameters:".yellow());
    println!(" - length: {}\n - count: {}\n - GC content: {}..={} %\n - max homopolymer: {}",
        config.length, config.target, config.gc_min, config.gc_max, config.max_homopolymer);
    println!(" - forbidden sites: {}", sampler.filters().sites().effective_patterns().iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>().join(" "));
    println!(" - max attempts: {}\n - seed: {}", config.max_attempts, config.seed);

    let path = cli.output.output_path(&Local::now().naive_local());
    let mut rng = StdRng::seed_from_u64(config.seed);

    let pb = ProgressBar::new(config.target as u64);
    pb.set_style(
        ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
        .progress_chars("#>-"),
    );
    let on_accept = |_: usize, s: &NucleotideVec| {
        pb.suspend(|| println!("{}", s));
        pb.inc(1);
    };

    let report = if cli.output.buffered {
        let mut memory = MemorySink::new();
        let report = sampler.run(&mut rng, &mut memory, on_accept)?;
        let mut table = CsvSink::create(&path)?;
        table.write_all(memory.sequences())?;
        report
    } else {
        let mut table = CsvSink::create(&path)?;
        sampler.run(&mut rng, &mut table, on_accept)?
    };
    pb.finish_and_clear();

    println!("{}", report);
    if report.is_complete() {
        println!("{} {}", "Sequences written to".green(), path.display());
    } else {
        println!("{} {} of {} sequences found within {} attempts, written to {}",
            "Target not reached:".red(),
            report.accepted, report.target, report.attempts, path.display());
    }

    if let Some(summary) = &cli.output.summary {
        let json = RunSummary { config: &config, report: &report }.to_json_pretty()?;
        std::fs::write(summary, json)?;
    }

    Ok(())
}
