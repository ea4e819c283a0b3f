use std::fs::File;
use std::io::{stdin, BufRead, BufReader, Cursor};
use std::path::Path;

use anyhow::{anyhow, Result};
use paste::paste;
use ro_sequence::NucleotideVec;
use ro_sampling::HEADER;

/// A sequence together with its FASTA header, if there was one.
pub type NamedSequence = (Option<String>, NucleotideVec);

// ============================================================
//  Sequence list parser (plain lines, FASTA, or our CSV tables)
// ============================================================

/// Reads one sequence per line.
///
/// Accepts what `ro-generate` writes (a `Sequence` header row followed by
/// one sequence per row) as well as FASTA-like input, where a `>` line names
/// the sequence that follows. Only the first whitespace- or comma-separated
/// token of a sequence line is used; empty lines are skipped.
pub fn read_sequences<R: BufRead>(reader: R) -> Result<Vec<NamedSequence>> {
    let mut result = Vec::new();
    let mut header: Option<String> = None;

    for (lnum, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line == HEADER {
            continue;
        }

        if line.starts_with('>') {
            header = Some(line.to_string());
            continue;
        }

        let token = line.split(|c: char| c.is_whitespace() || c == ',')
            .next()
            .unwrap_or(line);
        let sequence = NucleotideVec::try_from(token)
            .map_err(|e| anyhow!("Line {}: {}", lnum + 1, e))?;
        result.push((header.take(), sequence));
    }

    if result.is_empty() {
        return Err(anyhow!("No sequences found in input"));
    }
    Ok(result)
}

// ============================================================
//  Macro generating file/string/stdin/input helpers
// ============================================================

/// Generate input adapters for a base parser function `fn base<R: BufRead>(R) -> Result<T>`.
///
/// This expands into:
/// - `base_string(&str)`
/// - `base_file<P: AsRef<Path>>(P)`
/// - `base_stdin()`
/// - `base_input(&str)`  (dispatches "-" → stdin, otherwise → file)
macro_rules! define_input_variants {
    ($base:ident, $ret:ty) => {
        paste! {
            /// Read from a string buffer.
            pub fn [<$base _string>](s: &str) -> $ret {
                $base(Cursor::new(s))
            }

            /// Read from a file path.
            pub fn [<$base _file>]<P: AsRef<Path>>(path: P) -> $ret {
                let reader = BufReader::new(File::open(path)?);
                $base(reader)
            }

            /// Read from stdin.
            pub fn [<$base _stdin>]() -> $ret {
                let reader = BufReader::new(stdin());
                $base(reader)
            }

            /// Read either from stdin ("-") or a file path.
            pub fn [<$base _input>](s: &str) -> $ret {
                if s == "-" {
                    [<$base _stdin>]()
                } else {
                    [<$base _file>](s)
                }
            }
        }
    };
}

type SequencesResult = Result<Vec<NamedSequence>>;

define_input_variants!(read_sequences, SequencesResult);

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_generated_table() {
        let input = "Sequence\nACGTACGT\nGGGCCCAA\n";
        let seqs = read_sequences_string(input).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].0, None);
        assert_eq!(seqs[0].1.to_string(), "ACGTACGT");
        assert_eq!(seqs[1].1.to_string(), "GGGCCCAA");
    }

    #[test]
    fn test_read_fasta_like() {
        let input = ">first\nacgt\n\n>second some comment\nTTTT extra\nCCCC,42\n";
        let seqs = read_sequences_string(input).unwrap();
        assert_eq!(seqs.len(), 3);
        assert_eq!(seqs[0], (Some(">first".into()), NucleotideVec::try_from("ACGT").unwrap()));
        assert_eq!(seqs[1].0.as_deref(), Some(">second some comment"));
        assert_eq!(seqs[1].1.to_string(), "TTTT");
        assert_eq!(seqs[2].0, None);
        assert_eq!(seqs[2].1.to_string(), "CCCC");
    }

    #[test]
    fn test_read_rejects_bad_input() {
        let err = read_sequences_string("ACGT\nACNT\n").unwrap_err();
        assert!(err.to_string().starts_with("Line 2:"));

        assert!(read_sequences_string("Sequence\n\n").is_err());
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Sequence\nGATTACA").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let seqs = read_sequences_input(&path).unwrap();
        assert_eq!(seqs.len(), 1);
        assert_eq!(seqs[0].1.to_string(), "GATTACA");
    }
}
