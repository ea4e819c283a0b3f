use std::io::Write;
use clap::Args;
use clap::Parser;
use clap::ArgAction;
use colored::*;
use anyhow::Result;
use env_logger::Builder;

use ro_filters::SequenceFilter;
use ro_filters::gc_percent;
use ro_filters::longest_homopolymer;

use randoligo::input_parsers::read_sequences_input;
use randoligo::filter_parsers::FilterArguments;


#[derive(Debug, Args)]
pub struct CheckInput {
    /// Input file (one sequence per line, FASTA-like or ro-generate table), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: String,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Parser)]
#[command(name = "ro-check")]
#[command(version, about = "Check sequences against the oligo filters")]
pub struct Cli {
    #[command(flatten)]
    pub check: CheckInput,

    #[command(flatten, next_help_heading = "Filter parameters")]
    pub filters: FilterArguments,
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
    init_logging(cli.check.verbose);

    let filters = cli.filters.build_filters()?;
    let sequences = read_sequences_input(&cli.check.input)?;

    println!("{} {:>4} {:>3} {}",
        "sequence".yellow(), "GC%".cyan(), "HP".cyan(), "forbidden".cyan());

    let mut passed = 0;
    for (header, sequence) in &sequences {
        if let Some(h) = header {
            println!("{}", h.yellow());
        }
        let hits = filters.sites().matching_patterns(sequence);
        let gc = format!("{:>4}", gc_percent(sequence));
        let hp = format!("{:>3}", longest_homopolymer(sequence));
        let gc = if filters.gc().accepts(sequence) { gc.normal() } else { gc.red() };
        let hp = if filters.homopolymer().accepts(sequence) { hp.normal() } else { hp.red() };

        let verdict = if filters.accepts(sequence) {
            passed += 1;
            "PASS".green()
        } else {
            "FAIL".red()
        };
        println!("{} {} {} {} {}",
            sequence, gc, hp,
            hits.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(",").red(),
            verdict);
    }
    println!("{} of {} sequences pass", passed, sequences.len());

    Ok(())
}
