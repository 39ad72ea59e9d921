//! FASTA input.
//!
//! The CLI aligns the first record of each input file. Both single-line and
//! multi-line sequences are accepted.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! MKTAYIAKQRQISFVKSHFSRQ...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// One FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// The identifier (first word of the header, without '>')
    pub id: String,
    /// The residues, whitespace removed
    pub sequence: String,
}

/// Reads the first record of a FASTA file.
///
/// # Examples
///
/// ```no_run
/// use seqpair::fasta::first_record;
///
/// let record = first_record("insulin.fasta").unwrap();
/// println!("{}: {} residues", record.id, record.sequence.len());
/// ```
pub fn first_record<P: AsRef<Path>>(path: P) -> FastaResult<FastaRecord> {
    let file = File::open(path)?;
    parse_fasta(BufReader::new(file))?
        .into_iter()
        .next()
        .ok_or(FastaError::EmptyFile)
}

/// Parses FASTA content from a reader.
pub fn parse_fasta<R: BufRead>(reader: R) -> FastaResult<Vec<FastaRecord>> {
    let mut records = Vec::new();
    let mut current_id: Option<String> = None;
    let mut current_seq = String::new();
    let mut line_number = 0;

    for line_result in reader.lines() {
        line_number += 1;
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                if !current_seq.is_empty() {
                    records.push(FastaRecord {
                        id,
                        sequence: std::mem::take(&mut current_seq),
                    });
                }
            }

            // Take everything before the first space as ID
            let id = header.split_whitespace().next().unwrap_or(header);
            if id.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }

            current_id = Some(id.to_string());
            current_seq.clear();
        } else {
            if current_id.is_none() {
                return Err(FastaError::SequenceWithoutHeader(line_number));
            }
            current_seq.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    if let Some(id) = current_id {
        if !current_seq.is_empty() {
            records.push(FastaRecord {
                id,
                sequence: current_seq,
            });
        }
    }

    if records.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    Ok(records)
}

/// Parses FASTA content from a string.
pub fn parse_fasta_str(content: &str) -> FastaResult<Vec<FastaRecord>> {
    parse_fasta(content.as_bytes())
}
