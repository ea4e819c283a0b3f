use std::fmt;
use std::io;
use std::io::Write;
use std::fs::File;
use std::path::Path;
use std::error::Error;
use chrono::NaiveDateTime;

use ro_sequence::NucleotideVec;

/// Column label of the output table.
pub const HEADER: &str = "Sequence";
pub const DEFAULT_PREFIX: &str = "RandomNucleotides";

#[derive(Debug)]
pub enum SinkError {
    Io(io::Error),
    Csv(csv::Error),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self { Self::Io(e) }
}

impl From<csv::Error> for SinkError {
    fn from(e: csv::Error) -> Self { Self::Csv(e) }
}

/// Receives accepted sequences in discovery order.
pub trait SequenceSink {
    fn append(&mut self, sequence: &NucleotideVec) -> Result<(), SinkError>;

    /// Make everything appended so far durable. Called once at the end of
    /// a run, whether or not the target was reached.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Keeps accepted sequences in memory, to be written in one go.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    sequences: Vec<NucleotideVec>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequences(&self) -> &[NucleotideVec] {
        &self.sequences
    }

    pub fn into_inner(self) -> Vec<NucleotideVec> {
        self.sequences
    }
}

impl SequenceSink for MemorySink {
    fn append(&mut self, sequence: &NucleotideVec) -> Result<(), SinkError> {
        self.sequences.push(sequence.clone());
        Ok(())
    }
}

/// One-column CSV table, flushed after every row.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl CsvSink<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap a writer and emit the header row.
    pub fn from_writer(writer: W) -> Result<Self, SinkError> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record([HEADER])?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    /// Number of sequence rows written (header excluded).
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn write_all(&mut self, sequences: &[NucleotideVec]) -> Result<(), SinkError> {
        for s in sequences {
            self.writer.write_record([s.to_string()])?;
            self.rows += 1;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer.into_inner()
            .map_err(|e| SinkError::Io(io::Error::other(e.to_string())))
    }
}

impl<W: Write> SequenceSink for CsvSink<W> {
    fn append(&mut self, sequence: &NucleotideVec) -> Result<(), SinkError> {
        self.write_all(std::slice::from_ref(sequence))
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// `<prefix><yymmddHHMMSS>.csv`; one-second resolution, existing files
/// with the same name get overwritten.
pub fn timestamped_filename(prefix: &str, time: &NaiveDateTime) -> String {
    format!("{}{}.csv", prefix, time.format("%y%m%d%H%M%S"))
}
